//! Resources: read text and image files from disk.
//!
//! Files are opened per call and released before the response is built; the
//! catalog holds no cross-request state.

use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use base64::Engine;
use serde_json::json;
use switchyard::{Category, HandlerContext, HandlerDescriptor, HandlerError, InputSchema, ParamKind};

use super::str_arg;

const MIME_BY_EXTENSION: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
];

fn path_schema() -> InputSchema {
    InputSchema::new().required("path", ParamKind::String)
}

fn mime_for(path: &str) -> &'static str {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .and_then(|ext| {
            MIME_BY_EXTENSION
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or("application/octet-stream")
}

/// Map an I/O failure to the client-facing taxonomy without leaking
/// anything beyond the path and the domain cause.
fn read_error(path: &str, err: std::io::Error) -> HandlerError {
    match err.kind() {
        IoErrorKind::NotFound => HandlerError::NotFound(format!("file not found: {path}")),
        IoErrorKind::InvalidData => HandlerError::Domain(format!("file is not valid UTF-8: {path}")),
        IoErrorKind::PermissionDenied => HandlerError::Domain(format!("permission denied: {path}")),
        _ => HandlerError::Domain(format!("could not read file: {path}")),
    }
}

pub fn read_text() -> HandlerDescriptor {
    HandlerDescriptor::new(
        Category::Resource,
        "read_text",
        "Read a UTF-8 text file at the given path.",
        path_schema(),
        |ctx: HandlerContext| async move {
            let path = str_arg(&ctx.args, "path")?;
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| read_error(&path, err))?;
            Ok(json!({ "content": content }))
        },
    )
}

pub fn read_image() -> HandlerDescriptor {
    HandlerDescriptor::new(
        Category::Resource,
        "read_image",
        "Read an image file and return it as a base64 data URL.",
        path_schema(),
        |ctx: HandlerContext| async move {
            let path = str_arg(&ctx.args, "path")?;
            ctx.progress.report(format!("reading {path}")).await;
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|err| read_error(&path, err))?;

            ctx.progress
                .report(format!("encoding {} bytes", bytes.len()))
                .await;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
            let mime = mime_for(&path);
            Ok(json!({ "image_data": format!("data:{mime};base64,{encoded}") }))
        },
    )
    .streaming()
}
