//! Error taxonomy shared by the dispatcher, validator, and wire envelope.

use serde::{Deserialize, Serialize};

use crate::schema::ParamKind;

/// Stable error tags carried on every failure envelope and failed frame.
///
/// Clients branch on the tag; the accompanying message is display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    MalformedMethod,
    UnknownMethod,
    MissingParameter,
    TypeMismatch,
    DomainError,
    NotFound,
    InternalError,
}

/// A single parameter validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A required parameter was absent.
    Missing(String),
    /// A parameter was present but could not be coerced to its declared kind.
    Mismatch { name: String, expected: ParamKind },
}

impl FieldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::Missing(_) => ErrorKind::MissingParameter,
            FieldError::Mismatch { .. } => ErrorKind::TypeMismatch,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            FieldError::Missing(name) => name,
            FieldError::Mismatch { name, .. } => name,
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::Missing(name) => write!(f, "missing required parameter: {name}"),
            FieldError::Mismatch { name, expected } => {
                write!(f, "parameter {name} must be a {expected}")
            }
        }
    }
}

/// Everything the dispatcher can report to a client.
///
/// All of these convert to a `Failure` envelope or a terminal `Failed`
/// frame at the dispatch boundary; none escape to crash the serving
/// process.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error("malformed method: {0:?}")]
    MalformedMethod(String),

    #[error("unknown method: {0}")]
    UnknownMethod(String),

    #[error("invalid parameters: {}", format_fields(.0))]
    InvalidParams(Vec<FieldError>),

    #[error("{0}")]
    Domain(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl DispatchError {
    /// The wire tag for this error.
    ///
    /// For `InvalidParams` the first field error (schema declaration order)
    /// decides the tag; the message still names every failed field.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::MalformedMethod(_) => ErrorKind::MalformedMethod,
            DispatchError::UnknownMethod(_) => ErrorKind::UnknownMethod,
            DispatchError::InvalidParams(errors) => errors
                .first()
                .map(FieldError::kind)
                .unwrap_or(ErrorKind::InternalError),
            DispatchError::Domain(_) => ErrorKind::DomainError,
            DispatchError::NotFound(_) => ErrorKind::NotFound,
            DispatchError::Internal(_) => ErrorKind::InternalError,
        }
    }
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors a leaf handler may signal.
///
/// Mapped to the public taxonomy at the dispatch boundary: `Domain` →
/// `DomainError`, `NotFound` → `NotFound`, `Internal` → `InternalError`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HandlerError {
    #[error("{0}")]
    Domain(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<HandlerError> for DispatchError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::Domain(msg) => DispatchError::Domain(msg),
            HandlerError::NotFound(msg) => DispatchError::NotFound(msg),
            HandlerError::Internal(msg) => DispatchError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_params_kind_follows_first_field_error() {
        let err = DispatchError::InvalidParams(vec![
            FieldError::Missing("a".to_string()),
            FieldError::Mismatch {
                name: "b".to_string(),
                expected: ParamKind::Number,
            },
        ]);
        assert_eq!(err.kind(), ErrorKind::MissingParameter);
        let message = err.to_string();
        assert!(message.contains("missing required parameter: a"));
        assert!(message.contains("parameter b must be a number"));
    }

    #[test]
    fn error_kind_serializes_as_variant_name() {
        let json = serde_json::to_string(&ErrorKind::UnknownMethod).unwrap();
        assert_eq!(json, "\"UnknownMethod\"");
    }
}
