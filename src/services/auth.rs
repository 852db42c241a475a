use crate::error::ApiError;
use crate::models::auth::{SignInInput, SignInResult, SignUpInput, SignUpResult};
use crate::repositories::auth::{SignInRequest, SignUpRequest};
use crate::repositories::AuthRepository;
use crate::session::ClientMeta;
use crate::upstream::{LooseField, LooseValue, UpstreamClient};

/// Ids count only when present and not the provider's `0` placeholder
fn upstream_id(value: &Option<LooseValue>) -> Option<String> {
    match value {
        Some(LooseValue::Number(n)) if n.as_f64() == Some(0.0) => None,
        _ => value.text(),
    }
}

pub struct AuthService<'a> {
    repository: AuthRepository<'a>,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self {
            repository: AuthRepository::new(client),
        }
    }

    pub async fn sign_in(&self, input: &SignInInput, meta: &ClientMeta) -> Result<SignInResult, ApiError> {
        let payload = self
            .repository
            .sign_in(SignInRequest {
                login: &input.username,
                password: &input.password,
                remember_me: input.remember_me,
                browser: meta.user_agent.as_deref(),
            })
            .await?;

        let (Some(session_id), Some(user_id)) = (payload.session_id.text(), upstream_id(&payload.user_id)) else {
            return Err(ApiError::invalid_credentials("Invalid credentials"));
        };

        if !payload.connected.flag() {
            return Err(ApiError::invalid_credentials("Invalid credentials"));
        }

        tracing::info!(user_id = %user_id, "sign-in accepted");

        Ok(SignInResult {
            connected: 1,
            session_id,
            user_id,
            token_login: payload.token_login.text(),
            lang: payload.lang.text(),
        })
    }

    pub async fn sign_up(&self, input: &SignUpInput, meta: &ClientMeta) -> Result<SignUpResult, ApiError> {
        let payload = self
            .repository
            .sign_up(SignUpRequest {
                login: &input.username,
                password: &input.password,
                email: &input.email,
                sex: input.gender.as_api(),
                looking_for: input.looking_for.as_api(),
                birthday: &input.date_of_birth,
                ip_address: meta.ip_address.as_deref(),
                city: input.city.as_deref(),
                browser: meta.user_agent.as_deref(),
            })
            .await?;

        let session_id = payload.session_id.text();
        let user_id = upstream_id(&payload.user_id);

        match (payload.accepted.flag(), session_id, user_id) {
            (true, Some(session_id), Some(user_id)) => {
                tracing::info!(user_id = %user_id, "sign-up accepted");
                Ok(SignUpResult {
                    accepted: 1,
                    session_id,
                    user_id,
                    lang: payload.lang.text(),
                })
            }
            _ => Err(ApiError::validation_error(
                payload.error.text().unwrap_or_else(|| "Registration failed".to_string()),
            )),
        }
    }
}
