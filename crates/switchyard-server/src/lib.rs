//! Reference server for the switchyard protocol core.
//!
//! Wires the built-in catalog into a dispatcher and exposes it over the
//! stdio transport, plus HTTP when the `http` feature is enabled.

use std::sync::Arc;

use switchyard::{Dispatcher, RegistryError, ServerInfo};

pub mod catalog;
pub mod config;
pub mod transport;

/// Build a dispatcher over the full built-in catalog.
pub fn build_dispatcher() -> Result<Dispatcher, RegistryError> {
    let registry = catalog::build_registry()?;
    Ok(Dispatcher::new(Arc::new(registry)).with_server_info(ServerInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Method dispatch server with calculator, file, template, and prompt capabilities.".to_string(),
    }))
}
