//! The uniform wire shapes: one-shot envelopes and streaming frames.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DispatchError, ErrorKind};

/// Error payload carried by failure envelopes and failed frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&DispatchError> for WireError {
    fn from(err: &DispatchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Terminal outcome of a one-shot dispatch. Exactly one arm is populated.
///
/// Wire shape: `{"status":"success","data":…}` or
/// `{"status":"error","error":{"kind":…,"message":…}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ResponseEnvelope {
    #[serde(rename = "success")]
    Success { data: Value },
    #[serde(rename = "error")]
    Failure { error: WireError },
}

impl ResponseEnvelope {
    pub fn success(data: Value) -> Self {
        Self::Success { data }
    }

    pub fn failure(err: &DispatchError) -> Self {
        Self::Failure {
            error: WireError::from(err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// One unit of a streaming response.
///
/// A stream is a finite, non-empty sequence of frames ending in exactly one
/// `Complete` or `Failed` frame; no frames follow the terminal. The
/// terminal carries the same value the one-shot path would have produced
/// for identical input; streaming is an alternate delivery schedule, never
/// a different answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum StreamFrame {
    #[serde(rename = "processing")]
    Progress { message: String },
    #[serde(rename = "complete")]
    Complete { result: Value },
    #[serde(rename = "error")]
    Failed { error: WireError },
}

impl StreamFrame {
    pub fn complete(result: Value) -> Self {
        Self::Complete { result }
    }

    pub fn failed(err: &DispatchError) -> Self {
        Self::Failed {
            error: WireError::from(err),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }
}
