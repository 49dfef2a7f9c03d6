//! Reply payloads.

use crate::id::RequestId;
use serde::{Deserialize, Serialize};

/// The single reply produced for one input.
///
/// Every submission terminates in exactly one payload: a success, a domain
/// error, or a timeout/shutdown error synthesized by the session machinery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Success {
        request_id: RequestId,
    },
    Error {
        request_id: RequestId,
        message: String,
    },
}

impl Payload {
    pub fn success(request_id: RequestId) -> Self {
        Payload::Success { request_id }
    }

    pub fn error(request_id: RequestId, message: impl Into<String>) -> Self {
        Payload::Error {
            request_id,
            message: message.into(),
        }
    }

    pub fn request_id(&self) -> &RequestId {
        match self {
            Payload::Success { request_id } => request_id,
            Payload::Error { request_id, .. } => request_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Payload::Success { .. })
    }

    /// Error message, if this payload is an error.
    pub fn message(&self) -> Option<&str> {
        match self {
            Payload::Success { .. } => None,
            Payload::Error { message, .. } => Some(message),
        }
    }
}
