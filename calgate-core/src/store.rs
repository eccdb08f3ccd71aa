//! Downstream stores and the write calls forwarded to them.

use std::fmt;

use async_trait::async_trait;
use http::{Method, StatusCode};
use serde_json::Value;

use crate::error::StoreResult;

/// The independently-owned services behind the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Store {
    /// Users and credentials
    Identity,
    Events,
    Invites,
    Rsvp,
    /// Calendar shares
    Shares,
}

impl Store {
    pub const ALL: [Store; 5] = [
        Store::Identity,
        Store::Events,
        Store::Invites,
        Store::Rsvp,
        Store::Shares,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Store::Identity => "identity",
            Store::Events => "events",
            Store::Invites => "invites",
            Store::Rsvp => "rsvp",
            Store::Shares => "shares",
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One call against a store's write (or read) endpoint.
///
/// Path segments are percent-encoded when the URL is built, so usernames
/// can be passed through as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRequest {
    pub store: Store,
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl WriteRequest {
    pub fn new<I, S>(store: Store, method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WriteRequest {
            store,
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I, S>(store: Store, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(store, Method::GET, segments)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter, skipping it when the value is absent.
    pub fn with_query(mut self, key: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }
}

/// A store's answer, kept verbatim for pass-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Sends write calls to the owning store.
#[async_trait]
pub trait StoreWriter: Send + Sync {
    async fn send(&self, request: WriteRequest) -> StoreResult<StoreReply>;
}
