//! Name filtering applied to listed resources before confirmation.

mod errors;
mod matcher;

pub use errors::FilterError;
pub use matcher::NameFilter;
