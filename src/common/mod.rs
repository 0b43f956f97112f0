//! Common utilities shared by every command

pub mod error;
pub mod logging;
pub mod paths;
pub mod settings;

pub use error::{Error, JsonFailure, Result};
pub use logging::Verbosity;

/// Treat a blank option value the same as an absent one.
pub fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
