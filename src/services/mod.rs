//! Domain services: call a repository, check the provider's domain flags and
//! normalize the loosely-typed payload into the browser model.

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod gift;
pub mod matches;
pub mod user_profile;
pub mod wallet;

pub use auth::AuthService;
pub use chat::ChatService;
pub use dashboard::DashboardService;
pub use gift::GiftService;
pub use matches::MatchService;
pub use user_profile::UserProfileService;
pub use wallet::WalletService;

use crate::error::ApiError;
use crate::upstream::{LooseField, LooseValue};

/// The provider reports a dead session as `connected: 0` on an otherwise 200 answer
pub(crate) fn ensure_connected(connected: &Option<LooseValue>) -> Result<(), ApiError> {
    if connected.integer() == Some(0) {
        return Err(ApiError::auth_required("Session expired"));
    }
    Ok(())
}

/// Provider-supplied rejection text, or a fixed fallback
pub(crate) fn rejection(error: &Option<LooseValue>, fallback: &str) -> ApiError {
    ApiError::validation_error(error.text().unwrap_or_else(|| fallback.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn loose(v: serde_json::Value) -> Option<LooseValue> {
        serde_json::from_value(v).ok()
    }

    #[test]
    fn connected_zero_means_expired() {
        let err = ensure_connected(&loose(json!("0"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert_eq!(err.message, "Session expired");

        assert!(ensure_connected(&loose(json!(1))).is_ok());
        assert!(ensure_connected(&None).is_ok());
    }

    #[test]
    fn rejection_prefers_provider_text() {
        assert_eq!(rejection(&loose(json!("Nickname taken")), "Rejected").message, "Nickname taken");
        assert_eq!(rejection(&loose(json!("  ")), "Rejected").message, "Rejected");
    }
}
