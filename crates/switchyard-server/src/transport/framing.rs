//! Newline-delimited JSON framing.

use switchyard::{ErrorKind, Request, ResponseEnvelope, WireError};

/// Parse one line of text as a request.
///
/// An unparseable line becomes a `MalformedMethod` error envelope rather
/// than an error type of its own; a client that cannot form a request also
/// cannot have named a method.
pub fn parse_request(line: &str) -> Result<Request, ResponseEnvelope> {
    let trimmed = line.trim();
    serde_json::from_str(trimmed).map_err(|err| ResponseEnvelope::Failure {
        error: WireError {
            kind: ErrorKind::MalformedMethod,
            message: format!("invalid request: {err}"),
        },
    })
}

/// Serialize a value to a JSON line with a trailing newline.
pub fn frame(value: &impl serde::Serialize) -> String {
    let mut json = serde_json::to_string(value).unwrap_or_default();
    json.push('\n');
    json
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_request_line() {
        let request =
            parse_request(r#"{"method":"tools/add","params":{"a":1,"b":2}}"#).expect("valid");
        assert_eq!(request.method, "tools/add");
        assert!(!request.stream);
    }

    #[test]
    fn unparseable_line_becomes_malformed_method_envelope() {
        let envelope = parse_request("not json").expect_err("invalid");
        match envelope {
            ResponseEnvelope::Failure { error } => {
                assert_eq!(error.kind, ErrorKind::MalformedMethod);
            }
            ResponseEnvelope::Success { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn frame_terminates_with_newline() {
        let envelope = ResponseEnvelope::success(serde_json::json!({ "ok": true }));
        let line = frame(&envelope);
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
    }
}
