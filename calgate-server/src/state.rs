use std::sync::Arc;

use anyhow::Result;
use calgate_core::resolver::Resolver;
use calgate_core::{Gateway, GatewayConfig, StoreClient, StoreWriter};

/// Shared application state
///
/// Holds no per-request data; every handler gets the same stateless gateway.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Arc::new(StoreClient::new(config)?);
        Ok(Self::from_parts(client.clone(), client))
    }

    pub fn from_parts(resolver: Arc<dyn Resolver>, writer: Arc<dyn StoreWriter>) -> Self {
        AppState {
            gateway: Gateway::new(resolver, writer),
        }
    }
}
