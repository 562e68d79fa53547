//! Resource suppliers and the facade that lists, selects and deletes across them.

mod errors;
mod handler;
mod traits;

pub use errors::{InventoryError, ListError};
pub use handler::Leftovers;
pub use traits::{AutoConfirm, Prompter, ResourceSupplier};
