//! Validate-then-forward for every guarded write.
//!
//! Each request moves through `Received -> Validating -> Rejected | Forwarding
//! -> Responded` exactly once. Nothing is retried and nothing is kept between
//! requests, so a reference that passed validation can still be gone by the
//! time the store commits the write.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::resolver::Resolver;
use crate::rules::{Operation, References};
use crate::store::{StoreWriter, WriteRequest};
use crate::translator::{self, Reply};
use crate::validator::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Received,
    Validating,
    Rejected,
    Forwarding,
    Responded,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Received => "received",
            Phase::Validating => "validating",
            Phase::Rejected => "rejected",
            Phase::Forwarding => "forwarding",
            Phase::Responded => "responded",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
pub struct Gateway {
    validator: Validator,
    writer: Arc<dyn StoreWriter>,
}

impl Gateway {
    pub fn new(resolver: Arc<dyn Resolver>, writer: Arc<dyn StoreWriter>) -> Self {
        Gateway {
            validator: Validator::new(resolver),
            writer,
        }
    }

    /// Run the checks for `operation`; forward `write` only if all pass.
    pub async fn dispatch(
        &self,
        operation: Operation,
        references: &References,
        write: WriteRequest,
    ) -> Reply {
        debug!(%operation, phase = %Phase::Received, "request phase");
        debug!(%operation, phase = %Phase::Validating, "request phase");

        let result = self.validator.validate(operation, references).await;
        if let Some(reply) = translator::from_validation(result) {
            debug!(%operation, phase = %Phase::Rejected, status = %reply.status, "request phase");
            return reply;
        }

        debug!(%operation, phase = %Phase::Forwarding, store = %write.store, "request phase");
        let reply = translator::from_store(self.writer.send(write).await);
        debug!(%operation, phase = %Phase::Responded, status = %reply.status, "request phase");
        reply
    }

    /// Forward a call that has no reference checks.
    pub async fn forward(&self, request: WriteRequest) -> Reply {
        translator::from_store(self.writer.send(request).await)
    }
}
