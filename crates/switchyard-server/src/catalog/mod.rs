//! The builtin handler catalog.
//!
//! Each module declares its descriptors with a `descriptor()`-style
//! constructor; [`build_registry`] assembles them once at startup.

pub mod calc;
pub mod files;
pub mod greeting;
pub mod template;

use serde_json::{Map, Value};
use switchyard::{HandlerError, HandlerRegistry, RegistryError};

/// Build the full builtin registry. Called once at process start; the
/// result is immutable for the life of the server.
pub fn build_registry() -> Result<HandlerRegistry, RegistryError> {
    HandlerRegistry::builder()
        .register(calc::add())
        .register(calc::subtract())
        .register(calc::multiply())
        .register(calc::divide())
        .register(files::read_text())
        .register(files::read_image())
        .register(template::user())
        .register(greeting::greeting())
        .build()
}

// Validated-argument accessors. The validator guarantees presence and kind
// for declared fields, so absence here is a core bug, not a client error.

pub(crate) fn num_arg(args: &Map<String, Value>, name: &str) -> Result<f64, HandlerError> {
    args.get(name)
        .and_then(Value::as_f64)
        .ok_or_else(|| HandlerError::Internal(format!("validated parameter {name} missing")))
}

pub(crate) fn str_arg(args: &Map<String, Value>, name: &str) -> Result<String, HandlerError> {
    args.get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| HandlerError::Internal(format!("validated parameter {name} missing")))
}
