//! The gateway's single outward response contract.
//!
//! Every error body the gateway emits is built here:
//!
//! | Signal                          | Status | Body                                   |
//! |---------------------------------|--------|----------------------------------------|
//! | reference missing               | 404    | `{"error": reason}`                    |
//! | store unreachable or unusable   | 500    | `{"error": "Internal server error"}`   |
//! | malformed request body          | 422    | `{"error": message}`                   |
//! | store answered a forwarded call | as-is  | as-is                                  |

use http::StatusCode;
use serde::Serialize;
use tracing::warn;

use crate::error::StoreResult;
use crate::store::StoreReply;
use crate::validator::ValidationResult;

pub const INTERNAL_ERROR: &str = "Internal server error";

/// Status and JSON body returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn error(status: StatusCode, message: &str) -> Reply {
    let body = serde_json::to_vec(&ErrorBody { error: message })
        .unwrap_or_else(|_| br#"{"error":"Internal server error"}"#.to_vec());
    Reply { status, body }
}

/// 404 naming the missing reference.
pub fn rejected(reason: &str) -> Reply {
    error(StatusCode::NOT_FOUND, reason)
}

/// 500 with the generic message. Details stay in the logs.
pub fn internal_error() -> Reply {
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
}

/// 422 for a body that failed to parse or violates a field constraint.
pub fn malformed(message: &str) -> Reply {
    error(StatusCode::UNPROCESSABLE_ENTITY, message)
}

/// `None` when validation passed and the write may go ahead.
pub fn from_validation(result: ValidationResult) -> Option<Reply> {
    match result {
        ValidationResult::Pass => None,
        ValidationResult::Fail { reason, .. } => Some(rejected(reason)),
        ValidationResult::Unavailable { .. } => Some(internal_error()),
    }
}

/// Pass a store's answer through untouched, or turn a failed call into a 500.
pub fn from_store(outcome: StoreResult<StoreReply>) -> Reply {
    match outcome {
        Ok(reply) => Reply {
            status: reply.status,
            body: reply.body,
        },
        Err(err) => {
            warn!(store = %err.store(), error = %err, "forwarded call failed");
            internal_error()
        }
    }
}
