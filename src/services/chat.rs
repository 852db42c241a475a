use serde_json::Value;

use crate::error::ApiError;
use crate::models::chat::{
    ChatMessage, ContactPreview, ContactsResponse, MessagesResponse, OnlineStatus, SendMessageInput,
    SendMessageResponse,
};
use crate::models::ItemId;
use crate::repositories::chat::{ContactBlock, EclairBlock};
use crate::repositories::ChatRepository;
use crate::upstream::{normalize_text, LooseField, UpstreamClient};

fn online_status(value: Option<String>) -> OnlineStatus {
    match value.map(|v| v.to_lowercase()).as_deref() {
        Some("green") => OnlineStatus::Online,
        Some("yellow") => OnlineStatus::Recent,
        _ => OnlineStatus::Offline,
    }
}

fn last_message_preview(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => normalize_text(Some(s)),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .find_map(|item| normalize_text(Some(item))),
        _ => None,
    }
}

pub(crate) fn to_contact_preview(contact: &ContactBlock) -> Option<ContactPreview> {
    let id = contact.m_id.positive_integer()?;

    Some(ContactPreview {
        id,
        username: contact.pseudo.text().unwrap_or_else(|| "Member".to_string()),
        avatar_url: contact.photo.text(),
        unread_count: contact.nb_new.non_negative_integer(),
        online_status: online_status(contact.online.text()),
        is_friend: contact.is_friend.integer().map(|v| v == 1),
        last_message_preview: last_message_preview(contact.tab_last_msg.as_ref()),
    })
}

pub(crate) fn to_chat_message(message: &EclairBlock, index: usize) -> ChatMessage {
    let id = match message.id.positive_integer() {
        Some(id) => ItemId::Number(id),
        None => ItemId::Key(format!(
            "{}-{}-{}",
            message.exp.text().unwrap_or_else(|| "unknown".to_string()),
            message.date.text().unwrap_or_else(|| "unknown".to_string()),
            index
        )),
    };

    ChatMessage {
        id,
        sender_id: message.exp.positive_integer(),
        text: message.msg.text(),
        sent_at: message.date.text(),
        extra: message.p_extra.text().or_else(|| message.album_share.text()),
    }
}

pub struct ChatService<'a> {
    repository: ChatRepository<'a>,
}

impl<'a> ChatService<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self {
            repository: ChatRepository::new(client),
        }
    }

    pub async fn get_contacts(&self, session_id: &str) -> Result<ContactsResponse, ApiError> {
        let payload = self.repository.load_contacts(session_id).await?;
        let contacts: Vec<_> = payload.contacts.iter().filter_map(to_contact_preview).collect();

        tracing::info!(contacts = contacts.len(), "chat contacts normalized");
        Ok(ContactsResponse { contacts })
    }

    pub async fn get_messages(
        &self,
        session_id: &str,
        contact_id: i64,
        contact: Option<&str>,
    ) -> Result<MessagesResponse, ApiError> {
        let payload = self.repository.load_messages(session_id, contact_id, contact).await?;
        let messages = payload
            .eclairs
            .iter()
            .enumerate()
            .map(|(index, message)| to_chat_message(message, index))
            .collect();

        Ok(MessagesResponse { messages })
    }

    pub async fn send_message(&self, session_id: &str, input: &SendMessageInput) -> Result<SendMessageResponse, ApiError> {
        let payload = self
            .repository
            .send_message(session_id, input.contact_id, input.contact.as_deref(), &input.message)
            .await?;

        Ok(SendMessageResponse {
            message: payload.msg.text(),
            date: payload.date.text(),
        })
    }
}
