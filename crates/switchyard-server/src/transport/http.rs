//! HTTP transport behind the `http` feature.
//!
//! `POST /rpc` takes the same request body as the stdio transport. One-shot
//! requests return a JSON envelope; streaming requests return newline-
//! delimited frames as they are produced.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::info;

use switchyard::Dispatcher;

use super::framing;

pub struct HttpTransport {
    dispatcher: Arc<Dispatcher>,
}

impl HttpTransport {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/rpc", post(handle_rpc))
            .route("/health", get(handle_health))
            .with_state(Arc::clone(&self.dispatcher))
    }

    pub async fn run(self, addr: &str) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(%addr, "serving on http");
        axum::serve(listener, self.router()).await
    }
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn handle_rpc(State(dispatcher): State<Arc<Dispatcher>>, body: String) -> Response {
    let request = match framing::parse_request(&body) {
        Ok(request) => request,
        Err(envelope) => return (StatusCode::BAD_REQUEST, Json(envelope)).into_response(),
    };

    if request.stream {
        let frames = dispatcher.dispatch_streaming(request);
        let body = Body::from_stream(
            ReceiverStream::new(frames).map(|frame| Ok::<_, Infallible>(framing::frame(&frame))),
        );
        ([(header::CONTENT_TYPE, "application/x-ndjson")], body).into_response()
    } else {
        Json(dispatcher.dispatch(request).await).into_response()
    }
}
