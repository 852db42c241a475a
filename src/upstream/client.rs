use std::time::Duration;

use anyhow::Context;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::params::Params;
use crate::config::UpstreamConfig;
use crate::error::ApiError;

/// Which part of the app is talking upstream; drives log labels and error wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Auth,
    Chat,
    Dashboard,
    UserProfile,
    Gift,
    Match,
    Wallet,
}

impl Area {
    pub fn name(&self) -> &'static str {
        match self {
            Area::Auth => "ExternalAuthService",
            Area::Chat => "ChatRepository",
            Area::Dashboard => "DashboardRepository",
            Area::UserProfile => "UserProfileRepository",
            Area::Gift => "GiftRepository",
            Area::Match => "MatchRepository",
            Area::Wallet => "WalletRepository",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Area::Auth => "External auth",
            Area::Chat => "Chat",
            Area::Dashboard => "Dashboard",
            Area::UserProfile => "User profile",
            Area::Gift => "Gift",
            Area::Match => "Match",
            Area::Wallet => "Wallet",
        }
    }

    pub fn unavailable_message(&self) -> String {
        match self {
            Area::Auth => "External auth service unavailable".to_string(),
            _ => format!("{} upstream service unavailable", self.label()),
        }
    }

    pub fn invalid_json_message(&self) -> String {
        match self {
            Area::Auth => "External auth service returned invalid JSON".to_string(),
            _ => format!("{} upstream returned invalid JSON", self.label()),
        }
    }

    pub fn failed_message(&self) -> String {
        match self {
            Area::Auth => "External auth request failed".to_string(),
            _ => format!("{} upstream request failed", self.label()),
        }
    }
}

/// How parameters travel to the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// GET with parameters in the query string
    Get,
    /// POST with parameters in the query string and repeated in a form body;
    /// several provider endpoints read `api_key`/`session_id` from the query even on POST
    PostForm,
    /// POST with parameters in the query string only
    PostQuery,
}

impl Transport {
    fn verb(&self) -> &'static str {
        match self {
            Transport::Get => "GET",
            Transport::PostForm | Transport::PostQuery => "POST",
        }
    }
}

/// Status the BFF reports when the provider answers non-2xx
pub fn translate_status(status: u16) -> u16 {
    if (400..500).contains(&status) {
        400
    } else {
        502
    }
}

fn preview(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}

/// Thin HTTP client for the upstream dating provider
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    preview_chars: usize,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build upstream HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            preview_chars: config.log_preview_chars,
        })
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str, params: &Params) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?.join(path)?;
        let pairs = params.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs.iter());
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, area: Area, path: &str, params: Params) -> Result<T, ApiError> {
        self.send(area, Transport::Get, path, params).await
    }

    pub async fn post_form<T: DeserializeOwned>(&self, area: Area, path: &str, params: Params) -> Result<T, ApiError> {
        self.send(area, Transport::PostForm, path, params).await
    }

    pub async fn post_query<T: DeserializeOwned>(&self, area: Area, path: &str, params: Params) -> Result<T, ApiError> {
        self.send(area, Transport::PostQuery, path, params).await
    }

    pub async fn send<T: DeserializeOwned>(
        &self,
        area: Area,
        transport: Transport,
        path: &str,
        params: Params,
    ) -> Result<T, ApiError> {
        let verb = transport.verb();
        let sanitized = params.sanitized();

        let url = self.build_url(path, &params).map_err(|e| {
            tracing::error!(area = area.name(), path, error = %e, "invalid upstream URL");
            ApiError::bad_gateway(area.unavailable_message())
        })?;

        tracing::info!(area = area.name(), path, params = ?sanitized, "{} upstream request", verb);

        let request = match transport {
            Transport::Get => self.http.get(url),
            Transport::PostForm => self.http.post(url).form(&params.pairs()),
            Transport::PostQuery => self.http.post(url),
        }
        .header(ACCEPT, "application/json");

        let response = request.send().await.map_err(|e| {
            tracing::error!(area = area.name(), path, params = ?sanitized, error = %e, "{} upstream network error", verb);
            ApiError::bad_gateway(area.unavailable_message())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(area = area.name(), path, error = %e, "{} upstream body read failed", verb);
            ApiError::bad_gateway(area.unavailable_message())
        })?;

        let payload: Value = serde_json::from_str(&body).map_err(|_| {
            tracing::error!(
                area = area.name(),
                path,
                status = status.as_u16(),
                preview = %preview(&body, self.preview_chars),
                "Failed to parse upstream JSON"
            );
            ApiError::bad_gateway(area.invalid_json_message())
        })?;

        tracing::info!(area = area.name(), path, status = status.as_u16(), ok = status.is_success(), "{} upstream response", verb);

        if !status.is_success() {
            tracing::error!(area = area.name(), path, status = status.as_u16(), payload = %payload, "{} upstream non-ok response", verb);

            let message = payload
                .get("error")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| area.failed_message());

            return Err(ApiError::http(message, translate_status(status.as_u16())));
        }

        serde_json::from_value(payload).map_err(|e| {
            tracing::error!(area = area.name(), path, error = %e, "upstream payload has unexpected shape");
            ApiError::bad_gateway(area.invalid_json_message())
        })
    }

    /// Reachability check for /health: any HTTP answer counts as reachable
    pub async fn ping(&self) -> Result<u16, String> {
        let response = self
            .http
            .get(&self.base_url)
            .timeout(Duration::from_secs(3))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Ok(response.status().as_u16())
    }
}
