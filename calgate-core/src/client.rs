//! HTTP client for the downstream stores.
//!
//! One `StoreClient` serves both existence lookups and forwarded writes.
//! Every call is bounded by the configured timeout; a timeout is reported
//! the same way as a refused connection.

use std::collections::HashMap;

use async_trait::async_trait;
use http::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::GatewayConfig;
use crate::error::{ConfigError, StoreError, StoreResult};
use crate::resolver::{EntityRef, Resolver};
use crate::store::{Store, StoreReply, StoreWriter, WriteRequest};

/// Events store body for `GET /events/{id}`
#[derive(Deserialize)]
struct EventEnvelope {
    event: EventVisibility,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventVisibility {
    is_public: bool,
}

#[derive(Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    bases: HashMap<Store, Url>,
}

impl StoreClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let mut bases = HashMap::new();
        for store in Store::ALL {
            bases.insert(store, config.stores.parse(store)?);
        }

        Ok(StoreClient { http, bases })
    }

    fn url<'a>(
        &self,
        store: Store,
        segments: impl IntoIterator<Item = &'a str>,
        query: &[(&str, &str)],
    ) -> StoreResult<Url> {
        let mut url = self
            .bases
            .get(&store)
            .cloned()
            .ok_or_else(|| unavailable(store, "no base URL configured"))?;

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| unavailable(store, "base URL cannot take a path"))?;
            path.pop_if_empty().extend(segments);
        }

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    async fn call(
        &self,
        store: Store,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> StoreResult<reqwest::Response> {
        debug!(%store, %method, %url, "calling store");

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| transport(store, e))
    }
}

fn unavailable(store: Store, reason: impl Into<String>) -> StoreError {
    StoreError::Unavailable {
        store,
        reason: reason.into(),
    }
}

fn transport(store: Store, err: reqwest::Error) -> StoreError {
    let reason = if err.is_timeout() {
        format!("timed out: {err}")
    } else {
        err.to_string()
    };
    StoreError::Unreachable { store, reason }
}

/// 2xx means present, 404 means absent. Anything else is not an answer.
fn presence(store: Store, status: StatusCode) -> StoreResult<bool> {
    if status.is_success() {
        Ok(true)
    } else if status == StatusCode::NOT_FOUND {
        Ok(false)
    } else {
        Err(unavailable(store, format!("lookup returned {status}")))
    }
}

#[async_trait]
impl Resolver for StoreClient {
    async fn exists(&self, entity: EntityRef<'_>) -> StoreResult<bool> {
        let (store, url) = match entity {
            EntityRef::User(username) => (
                Store::Identity,
                self.url(Store::Identity, ["users"], &[("username", username)])?,
            ),
            EntityRef::Event(id) => {
                let id = id.to_string();
                (
                    Store::Events,
                    self.url(Store::Events, ["events", id.as_str()], &[])?,
                )
            }
        };

        let response = self.call(store, Method::GET, url, None).await?;
        presence(store, response.status())
    }

    async fn event_visibility(&self, event_id: i64) -> StoreResult<Option<bool>> {
        let store = Store::Events;
        let id = event_id.to_string();
        let url = self.url(store, ["events", id.as_str()], &[])?;

        let response = self.call(store, Method::GET, url, None).await?;
        if !presence(store, response.status())? {
            return Ok(None);
        }

        let envelope: EventEnvelope = response.json().await.map_err(|e| {
            if e.is_decode() {
                unavailable(store, format!("unexpected event body: {e}"))
            } else {
                transport(store, e)
            }
        })?;

        Ok(Some(envelope.event.is_public))
    }
}

#[async_trait]
impl StoreWriter for StoreClient {
    async fn send(&self, request: WriteRequest) -> StoreResult<StoreReply> {
        let store = request.store;
        let query: Vec<(&str, &str)> = request
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let url = self.url(store, request.segments.iter().map(String::as_str), &query)?;

        let response = self
            .call(store, request.method, url, request.body.as_ref())
            .await?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| transport(store, e))?;

        Ok(StoreReply {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreUrls;

    fn client() -> StoreClient {
        let config = GatewayConfig {
            stores: StoreUrls {
                identity: "http://auth-service:8000/api".to_string(),
                shares: "http://calendars-service:8000/api/".to_string(),
                ..StoreUrls::default()
            },
            ..GatewayConfig::default()
        };
        StoreClient::new(&config).unwrap()
    }

    #[test]
    fn test_user_lookup_url_encodes_query() {
        let url = client()
            .url(Store::Identity, ["users"], &[("username", "ann marie&co")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://auth-service:8000/api/users?username=ann+marie%26co"
        );
    }

    #[test]
    fn test_path_segments_are_escaped() {
        let url = client()
            .url(Store::Shares, ["shares", "a/b", "c d"], &[])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://calendars-service:8000/api/shares/a%2Fb/c%20d"
        );
    }

    #[test]
    fn test_presence_classification() {
        assert_eq!(presence(Store::Identity, StatusCode::OK), Ok(true));
        assert_eq!(presence(Store::Identity, StatusCode::NOT_FOUND), Ok(false));
        assert!(matches!(
            presence(Store::Identity, StatusCode::BAD_GATEWAY),
            Err(StoreError::Unavailable {
                store: Store::Identity,
                ..
            })
        ));
    }
}
