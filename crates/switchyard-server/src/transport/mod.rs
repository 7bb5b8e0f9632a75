//! Transport layer: line-delimited stdio and optional HTTP.

pub mod framing;
#[cfg(feature = "http")]
pub mod http;
pub mod stdio;

#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use stdio::StdioTransport;
