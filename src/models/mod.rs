//! Internal response model returned to the browser.
//!
//! Field names are camelCase on the wire; absent optional fields are omitted
//! rather than sent as `null`.

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod gift;
pub mod matches;
pub mod user;
pub mod wallet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberGender {
    Man,
    Woman,
    Couple,
}

/// Numeric id when the provider gave one, otherwise a synthesized string key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Key(String),
}
