use std::sync::Arc;

use crate::config::AppConfig;
use crate::upstream::UpstreamClient;

/// Shared handler state: configuration plus the pooled upstream HTTP client
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        Ok(Self {
            config: Arc::new(config),
            upstream,
        })
    }
}
