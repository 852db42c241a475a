use serde::Deserialize;

use crate::error::ApiError;
use crate::upstream::{Area, LooseValue, Params, UpstreamClient};

#[derive(Debug, Default, Deserialize)]
pub struct SignInPayload {
    pub connected: Option<LooseValue>,
    pub session_id: Option<LooseValue>,
    pub user_id: Option<LooseValue>,
    pub token_login: Option<LooseValue>,
    pub lang: Option<LooseValue>,
    pub error: Option<LooseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignUpPayload {
    pub accepted: Option<LooseValue>,
    pub session_id: Option<LooseValue>,
    pub user_id: Option<LooseValue>,
    pub lang: Option<LooseValue>,
    pub error: Option<LooseValue>,
}

pub struct SignInRequest<'r> {
    pub login: &'r str,
    pub password: &'r str,
    pub remember_me: bool,
    pub browser: Option<&'r str>,
}

pub struct SignUpRequest<'r> {
    pub login: &'r str,
    pub password: &'r str,
    pub email: &'r str,
    pub sex: &'r str,
    pub looking_for: &'r str,
    pub birthday: &'r str,
    pub ip_address: Option<&'r str>,
    pub city: Option<&'r str>,
    pub browser: Option<&'r str>,
}

/// Account endpoints; the provider reads these parameters from the query string only
pub struct AuthRepository<'a> {
    client: &'a UpstreamClient,
}

impl<'a> AuthRepository<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self { client }
    }

    pub async fn sign_in(&self, request: SignInRequest<'_>) -> Result<SignInPayload, ApiError> {
        let params = Params::new()
            .set("login", request.login)
            .set("pass", request.password)
            .set_opt("rememberme", request.remember_me.then_some("1"))
            .set_opt("browser", request.browser)
            .set("api_key", self.client.api_key());

        self.client.post_query(Area::Auth, "/index_api/login", params).await
    }

    pub async fn sign_up(&self, request: SignUpRequest<'_>) -> Result<SignUpPayload, ApiError> {
        let params = Params::new()
            .set("login", request.login)
            .set("pass", request.password)
            .set("mail", request.email)
            .set("fast-part", "1")
            .set("sex", request.sex)
            .set("cherche1", request.looking_for)
            .set("birthday_date", request.birthday)
            .set("ip_adress", request.ip_address.unwrap_or("0.0.0.0"))
            .set_opt("city", request.city.and_then(city_code))
            .set_opt("browser", request.browser)
            .set("lang_ui", "en")
            .set("api_key", self.client.api_key());

        self.client.post_query(Area::Auth, "/index_api/subscribe", params).await
    }
}

/// City ids travel as numbers; very long digit runs fall back to the raw text
fn city_code(city: &str) -> Option<crate::upstream::params::Scalar> {
    use crate::upstream::params::Scalar;

    let trimmed = city.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        trimmed
            .parse::<i64>()
            .map(Scalar::Int)
            .unwrap_or_else(|_| Scalar::Text(trimmed.to_string())),
    )
}
