use serde::Deserialize;

use crate::error::ApiError;
use crate::upstream::{lenient_list, Area, LooseValue, Params, UpstreamClient};

#[derive(Debug, Default, Deserialize)]
pub struct ContactBlock {
    pub m_id: Option<LooseValue>,
    pub pseudo: Option<LooseValue>,
    pub photo: Option<LooseValue>,
    pub nb_new: Option<LooseValue>,
    pub online: Option<LooseValue>,
    pub is_friend: Option<LooseValue>,
    /// A single string or a list of recent lines
    pub tab_last_msg: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoadContactsPayload {
    #[serde(default, deserialize_with = "lenient_list")]
    pub contacts: Vec<ContactBlock>,
}

/// One message ("eclair" in provider terms)
#[derive(Debug, Default, Deserialize)]
pub struct EclairBlock {
    pub id: Option<LooseValue>,
    pub exp: Option<LooseValue>,
    pub date: Option<LooseValue>,
    pub msg: Option<LooseValue>,
    pub p_extra: Option<LooseValue>,
    pub album_share: Option<LooseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoadMessagesPayload {
    #[serde(default, deserialize_with = "lenient_list")]
    pub eclairs: Vec<EclairBlock>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendMessagePayload {
    pub msg: Option<LooseValue>,
    pub date: Option<LooseValue>,
}

pub struct ChatRepository<'a> {
    client: &'a UpstreamClient,
}

impl<'a> ChatRepository<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self { client }
    }

    pub async fn load_contacts(&self, session_id: &str) -> Result<LoadContactsPayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("filter", 1i64)
            .set("api_key", self.client.api_key());

        self.client.get(Area::Chat, "/ajax_api/load_contacts", params).await
    }

    pub async fn load_messages(
        &self,
        session_id: &str,
        contact_id: i64,
        contact: Option<&str>,
    ) -> Result<LoadMessagesPayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("contact_id", contact_id)
            .set_opt("contact", contact)
            .set("api_key", self.client.api_key())
            .set("api-key", self.client.api_key());

        self.client.get(Area::Chat, "/ajax_api/load_messages", params).await
    }

    pub async fn send_message(
        &self,
        session_id: &str,
        contact_id: i64,
        contact: Option<&str>,
        message: &str,
    ) -> Result<SendMessagePayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("contact_id", contact_id)
            .set_opt("contact", contact)
            .set("msg", message)
            .set("api_key", self.client.api_key())
            .set("api-key", self.client.api_key());

        self.client.get(Area::Chat, "/ajax_api/send_message", params).await
    }
}
