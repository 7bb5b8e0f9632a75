#![cfg(feature = "http")]

//! Router-level tests for the HTTP transport, no listener required.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use switchyard::{ErrorKind, ResponseEnvelope, StreamFrame};
use switchyard_server::build_dispatcher;
use switchyard_server::transport::HttpTransport;

fn router() -> axum::Router {
    HttpTransport::new(build_dispatcher().expect("catalog builds")).router()
}

fn rpc(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/rpc")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let response = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn rpc_dispatches_a_tool_call() {
    let response = router()
        .oneshot(rpc(r#"{"method":"tools/add","params":{"a":2,"b":3}}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let envelope: ResponseEnvelope = serde_json::from_str(&body_text(response).await).unwrap();
    match envelope {
        ResponseEnvelope::Success { data } => assert_eq!(data, json!({ "result": 5.0 })),
        ResponseEnvelope::Failure { error } => panic!("unexpected failure: {error:?}"),
    }
}

#[tokio::test]
async fn unparseable_body_is_a_bad_request() {
    let response = router().oneshot(rpc("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let envelope: ResponseEnvelope = serde_json::from_str(&body_text(response).await).unwrap();
    match envelope {
        ResponseEnvelope::Failure { error } => assert_eq!(error.kind, ErrorKind::MalformedMethod),
        ResponseEnvelope::Success { .. } => panic!("expected failure"),
    }
}

#[tokio::test]
async fn streaming_request_returns_ndjson_frames() {
    let response = router()
        .oneshot(rpc(
            r#"{"method":"prompts/greeting","params":{"prompt":"Hi."},"stream":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/x-ndjson"
    );

    let text = body_text(response).await;
    let frames: Vec<StreamFrame> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert!(frames.len() >= 2, "expected progress plus terminal: {text}");
    let (terminal, progress) = frames.split_last().unwrap();
    assert!(progress.iter().all(|frame| !frame.is_terminal()));
    match terminal {
        StreamFrame::Complete { result } => assert_eq!(result["content"], "Hello! Hi."),
        other => panic!("expected completion, got {other:?}"),
    }
}
