//! Method dispatch and response envelopes for an MCP-style request
//! protocol.
//!
//! A transport hands the [`Dispatcher`] a [`Request`] carrying a method
//! string (`"<category>/<name>"` or the literal `describe`), a parameter
//! object, and a streaming flag. The dispatcher resolves the method against
//! an immutable [`HandlerRegistry`], validates the parameters against the
//! handler's declared [`InputSchema`], invokes the handler, and normalizes
//! every outcome into one [`ResponseEnvelope`] or, for streaming-capable
//! handlers, an ordered sequence of [`StreamFrame`]s ending in exactly one
//! terminal frame.
//!
//! Leaf handler bodies are external: the core owns calling them, never
//! their logic.

pub mod describe;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod progress;
pub mod registry;
pub mod schema;

pub use describe::{CapabilityEntry, DescribeResponse, DescribeService, ServerInfo};
pub use dispatch::{Dispatcher, Method, Request};
pub use envelope::{ResponseEnvelope, StreamFrame, WireError};
pub use error::{DispatchError, ErrorKind, FieldError, HandlerError};
pub use progress::ProgressSink;
pub use registry::{
    Category, HandlerContext, HandlerDescriptor, HandlerRegistry, RegistryBuilder, RegistryError,
};
pub use schema::{InputSchema, ParamKind, ParamSpec};
