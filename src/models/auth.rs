use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Man,
    Woman,
    NonBinary,
    Other,
}

impl Gender {
    pub const VALUES: [&'static str; 4] = ["man", "woman", "non_binary", "other"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "man" => Some(Gender::Man),
            "woman" => Some(Gender::Woman),
            "non_binary" => Some(Gender::NonBinary),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }

    /// Provider code for `sex`; the provider uses the same spelling
    pub fn as_api(&self) -> &'static str {
        match self {
            Gender::Man => "man",
            Gender::Woman => "woman",
            Gender::NonBinary => "non_binary",
            Gender::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookingFor {
    Man,
    Women,
    Couple,
    Other,
}

impl LookingFor {
    pub const VALUES: [&'static str; 4] = ["man", "women", "couple", "other"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "man" => Some(LookingFor::Man),
            "women" => Some(LookingFor::Women),
            "couple" => Some(LookingFor::Couple),
            "other" => Some(LookingFor::Other),
            _ => None,
        }
    }

    pub fn as_api(&self) -> &'static str {
        match self {
            LookingFor::Man => "man",
            LookingFor::Women => "women",
            LookingFor::Couple => "couple",
            LookingFor::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInInput {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpInput {
    pub username: String,
    pub password: String,
    pub email: String,
    pub gender: Gender,
    pub looking_for: LookingFor,
    pub date_of_birth: String,
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResult {
    pub connected: u8,
    pub session_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResult {
    pub accepted: u8,
    pub session_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}
