use std::fmt;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::info;
use url::Url;

use crate::core::client::{EndpointHandle, RpcEndpoint};
use crate::error::{SpammerError, SpammerResult};

/// The endpoints load is spread over. Worker `i` always talks to endpoint `i % len`.
#[derive(Clone)]
pub struct EndpointPool {
    endpoints: Vec<EndpointHandle>,
}

impl EndpointPool {
    pub fn new(endpoints: Vec<EndpointHandle>) -> SpammerResult<Self> {
        if endpoints.is_empty() {
            return Err(SpammerError::ConfigError("at least one RPC endpoint is required".to_string()));
        }
        Ok(Self { endpoints })
    }

    /// Dials and probes every URL. One unreachable endpoint fails the whole pool.
    pub async fn connect(urls: &[Url]) -> SpammerResult<Self> {
        if urls.is_empty() {
            return Err(SpammerError::ConfigError("at least one RPC endpoint is required".to_string()));
        }
        let endpoints = try_join_all(urls.iter().cloned().map(RpcEndpoint::connect)).await?;
        info!(endpoints = endpoints.len(), "Endpoint pool ready");
        Self::new(endpoints.into_iter().map(|endpoint| Arc::new(endpoint) as EndpointHandle).collect())
    }

    pub fn assign(&self, worker_index: usize) -> EndpointHandle {
        Arc::clone(&self.endpoints[worker_index % self.endpoints.len()])
    }

    /// First endpoint, used for funding and one-shot commands.
    pub fn primary(&self) -> EndpointHandle {
        self.assign(0)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl fmt::Debug for EndpointPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.endpoints.iter().map(|endpoint| endpoint.url())).finish()
    }
}
