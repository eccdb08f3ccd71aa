//! Cross-store reference validation for the calgate gateway.
//!
//! Each store behind the gateway owns one kind of entity and enforces only
//! its own constraints. Before a write that references another store's
//! entity is forwarded, the gateway checks that the referenced entities exist:
//!
//! - [`rules`]: the ordered checks for each operation, as data
//! - [`resolver`] / [`client`]: one lookup per check against the owning store
//! - [`validator`]: runs the checks, stopping at the first failure
//! - [`translator`]: the only place outward error bodies are built
//! - [`gateway`]: validate, then forward and pass the store's answer through

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod resolver;
pub mod rules;
pub mod store;
pub mod translator;
pub mod validator;

pub use client::StoreClient;
pub use config::{GatewayConfig, StoreUrls};
pub use error::{ConfigError, StoreError, StoreResult};
pub use gateway::Gateway;
pub use rules::{Operation, References};
pub use store::{Store, StoreReply, StoreWriter, WriteRequest};
pub use translator::Reply;
pub use validator::{ValidationResult, Validator};
