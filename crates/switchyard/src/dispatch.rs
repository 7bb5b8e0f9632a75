//! Method resolution and request dispatch.
//!
//! Every outcome (success, invalid parameters, handler error, panic) is
//! normalized into one envelope or one terminal frame. Nothing escapes to
//! the transport as a raw error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::mpsc;

use crate::describe::{DescribeService, ServerInfo};
use crate::envelope::{ResponseEnvelope, StreamFrame};
use crate::error::{DispatchError, HandlerError};
use crate::progress::ProgressSink;
use crate::registry::{Category, HandlerContext, HandlerDescriptor, HandlerRegistry};

/// A parsed method string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// The literal `describe`; routed straight to the describe service.
    Describe,
    Call { category: Category, name: String },
}

impl Method {
    /// Parse `"describe"` or `"<category>/<name>"`.
    ///
    /// Anything that does not fit the grammar is `MalformedMethod`. A
    /// well-formed method with an unrecognized category collapses into
    /// `UnknownMethod`, same as an unregistered name; category existence
    /// is not itself meaningful to clients.
    pub fn parse(raw: &str) -> Result<Method, DispatchError> {
        if raw == "describe" {
            return Ok(Method::Describe);
        }

        let Some((prefix, name)) = raw.split_once('/') else {
            return Err(DispatchError::MalformedMethod(raw.to_string()));
        };
        if prefix.is_empty() || name.is_empty() || name.contains('/') {
            return Err(DispatchError::MalformedMethod(raw.to_string()));
        }

        match Category::parse(prefix) {
            Some(category) => Ok(Method::Call {
                category,
                name: name.to_string(),
            }),
            None => Err(DispatchError::UnknownMethod(raw.to_string())),
        }
    }
}

/// An incoming protocol request, transport-agnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    #[serde(default)]
    pub params: Map<String, Value>,
    #[serde(default)]
    pub stream: bool,
}

impl Request {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Map::new(),
            stream: false,
        }
    }

    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }
}

/// Routes requests to registered handlers and normalizes every outcome.
///
/// Cheap to clone; the registry is shared, immutable state.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
    describe: DescribeService,
}

impl Dispatcher {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        let describe = DescribeService::new(Arc::clone(&registry));
        Self { registry, describe }
    }

    /// Override the identity reported by `describe`.
    pub fn with_server_info(mut self, server: ServerInfo) -> Self {
        self.describe = self.describe.with_server(server);
        self
    }

    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        &self.registry
    }

    /// One-shot dispatch: exactly one envelope per request.
    pub async fn dispatch(&self, request: Request) -> ResponseEnvelope {
        let method = request.method.clone();
        match self.resolve_and_run(request, ProgressSink::inert()).await {
            Ok(data) => ResponseEnvelope::success(data),
            Err(err) => {
                tracing::debug!(%method, kind = ?err.kind(), "dispatch failed: {err}");
                ResponseEnvelope::failure(&err)
            }
        }
    }

    /// Streaming dispatch: an ordered frame sequence ending in exactly one
    /// terminal frame.
    ///
    /// A handler that is not streaming capable silently falls back to
    /// one-shot semantics; the stream then carries only the terminal frame.
    /// Dropping the receiver cancels the stream: once the emitter observes
    /// the closed channel no further frames are attempted.
    pub fn dispatch_streaming(&self, request: Request) -> mpsc::Receiver<StreamFrame> {
        let (tx, rx) = mpsc::channel(16);
        let dispatcher = self.clone();
        tokio::spawn(async move {
            let method = request.method.clone();
            let progress = ProgressSink::live(tx.clone());
            let terminal = match dispatcher.resolve_and_run(request, progress).await {
                Ok(data) => StreamFrame::complete(data),
                Err(err) => {
                    tracing::debug!(%method, kind = ?err.kind(), "streaming dispatch failed: {err}");
                    StreamFrame::failed(&err)
                }
            };
            let _ = tx.send(terminal).await;
        });
        rx
    }

    async fn resolve_and_run(
        &self,
        request: Request,
        progress: ProgressSink,
    ) -> Result<Value, DispatchError> {
        match Method::parse(&request.method)? {
            Method::Describe => serde_json::to_value(self.describe.describe())
                .map_err(|err| DispatchError::Internal(err.to_string())),
            Method::Call { category, name } => {
                let descriptor = self
                    .registry
                    .lookup(category, &name)
                    .cloned()
                    .ok_or_else(|| DispatchError::UnknownMethod(request.method.clone()))?;

                // Validation failures short-circuit: the handler is never
                // called with invalid input.
                let args = descriptor
                    .input_schema
                    .validate(&request.params)
                    .map_err(DispatchError::InvalidParams)?;

                let progress = if descriptor.streaming_capable {
                    progress
                } else {
                    ProgressSink::inert()
                };

                run_handler(descriptor, args, progress).await
            }
        }
    }
}

/// Invoke the handler body on its own task so an unexpected panic is
/// contained as `InternalError` instead of tearing down the transport.
///
/// For streaming dispatch the task is aborted as soon as the client
/// disconnects, so a handler that never checks its sink still releases
/// whatever it holds.
async fn run_handler(
    descriptor: Arc<HandlerDescriptor>,
    args: Map<String, Value>,
    progress: ProgressSink,
) -> Result<Value, DispatchError> {
    let disconnect = progress.clone();
    let future = descriptor.invoke(HandlerContext { args, progress });
    let mut task = tokio::spawn(future);

    tokio::select! {
        result = &mut task => match result {
            Ok(Ok(data)) => Ok(data),
            Ok(Err(err)) => {
                if let HandlerError::Internal(msg) = &err {
                    tracing::error!(
                        category = %descriptor.category,
                        name = %descriptor.name,
                        "handler failure: {msg}"
                    );
                }
                Err(err.into())
            }
            Err(_join_err) => {
                tracing::error!(
                    category = %descriptor.category,
                    name = %descriptor.name,
                    "handler panicked"
                );
                Err(DispatchError::Internal(format!(
                    "handler {}/{} failed unexpectedly",
                    descriptor.category, descriptor.name
                )))
            }
        },
        _ = disconnect.closed() => {
            task.abort();
            tracing::debug!(
                category = %descriptor.category,
                name = %descriptor.name,
                "client disconnected, handler aborted"
            );
            // Nobody is listening for this; the channel is already closed.
            Err(DispatchError::Internal(format!(
                "handler {}/{} cancelled by client disconnect",
                descriptor.category, descriptor.name
            )))
        }
    }
}
