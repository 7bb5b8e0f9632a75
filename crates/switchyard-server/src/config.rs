//! Listener configuration.

use std::env;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3200";
const ADDR_ENV: &str = "SWITCHYARD_ADDR";

/// Resolve the HTTP listen address: explicit flag, then environment,
/// then the default.
pub fn resolve_listen_addr(explicit: Option<&str>) -> String {
    if let Some(addr) = explicit {
        return addr.to_string();
    }
    match env::var(ADDR_ENV) {
        Ok(addr) if !addr.trim().is_empty() => addr,
        _ => DEFAULT_ADDR.to_string(),
    }
}
