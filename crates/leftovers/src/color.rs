//! CLI colour helpers.
//!
//! All functions respect `NO_COLOR`, `FORCE_COLOR`, and TTY detection via
//! `owo-colors`' `if_supports_color()`.

use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

// Accent (resource types): #7CB4C8
const ACCENT: (u8, u8, u8) = (124, 180, 200);

// Success: #6B8F5E
const GREEN: (u8, u8, u8) = (107, 143, 94);

// Warning: #C49A5C
const AMBER: (u8, u8, u8) = (196, 154, 92);

// Error: #B87060
const RED: (u8, u8, u8) = (184, 112, 96);

// Muted: #5C6370
const GRAY: (u8, u8, u8) = (92, 99, 112);

/// Call once from main.rs, before any threads exist, when `--no-color` is passed.
pub fn set_no_color() {
    // SAFETY: called at startup before the runtime spawns worker threads.
    unsafe { std::env::set_var("NO_COLOR", "1") };
}

/// Resource type names in listings.
pub fn accent(text: &str) -> String {
    text.if_supports_color(Stdout, |t| t.truecolor(ACCENT.0, ACCENT.1, ACCENT.2))
        .to_string()
}

/// Successful deletions.
pub fn success(text: &str) -> String {
    text.if_supports_color(Stdout, |t| t.truecolor(GREEN.0, GREEN.1, GREEN.2))
        .to_string()
}

pub fn bold(text: &str) -> String {
    text.if_supports_color(Stdout, |t| t.bold()).to_string()
}

pub fn muted(text: &str) -> String {
    text.if_supports_color(Stdout, |t| t.truecolor(GRAY.0, GRAY.1, GRAY.2))
        .to_string()
}

/// Error styling for stderr messages.
pub fn error(text: &str) -> String {
    text.if_supports_color(Stderr, |t| t.truecolor(RED.0, RED.1, RED.2))
        .to_string()
}

/// Warning styling for stderr messages.
pub fn warning(text: &str) -> String {
    text.if_supports_color(Stderr, |t| t.truecolor(AMBER.0, AMBER.1, AMBER.2))
        .to_string()
}

/// Secondary info on stderr.
pub fn hint(text: &str) -> String {
    text.if_supports_color(Stderr, |t| t.truecolor(GRAY.0, GRAY.1, GRAY.2))
        .to_string()
}
