// handlers/protected/chat.rs - /api/chat/* handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult, FieldError};
use crate::models::chat::{ContactsResponse, MessagesResponse, SendMessageInput, SendMessageResponse};
use crate::services::ChatService;
use crate::session::{parse_leading_int, Session};
use crate::state::AppState;
use crate::upstream::normalize_text;
use crate::validation::{BodyCheck, QueryParams};

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    #[serde(rename = "contactId")]
    pub contact_id: Option<String>,
    pub contact: Option<String>,
}

fn contact_id_error(message: &str) -> ApiError {
    ApiError::validation_fields(
        "Invalid contactId query parameter",
        vec![FieldError::new("contactId", message)],
    )
}

pub(crate) fn parse_contact_id(value: Option<&str>) -> ApiResult<i64> {
    let raw = value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| contact_id_error("contactId is required"))?;

    match parse_leading_int(raw) {
        Some(id) if id >= 1 => Ok(id),
        _ => Err(contact_id_error("contactId must be a positive integer")),
    }
}

pub(crate) fn parse_send_message(body: &Value) -> ApiResult<SendMessageInput> {
    let mut check = BodyCheck::new(body);
    let contact_id = check.positive_int("contactId", "contactId must be a positive integer");
    let contact = check.optional_nonblank("contact", "contact cannot be empty");
    let message = check.required_string("message", true, "Message cannot be empty");
    check.finish("Invalid message payload")?;

    let (Some(contact_id), Some(message)) = (contact_id, message) else {
        return Err(ApiError::validation_error("Invalid message payload"));
    };

    Ok(SendMessageInput {
        contact_id,
        contact,
        message,
    })
}

/// GET /api/chat/contacts - Conversation list for the signed-in member
pub async fn contacts_get(State(state): State<AppState>, session: Session) -> ApiResult<Json<ContactsResponse>> {
    let response = ChatService::new(&state.upstream)
        .get_contacts(&session.session_id)
        .await?;
    Ok(Json(response))
}

/// GET /api/chat/messages?contactId=&contact= - Thread with one contact
pub async fn messages_get(
    State(state): State<AppState>,
    session: Session,
    QueryParams(query): QueryParams<MessagesQuery>,
) -> ApiResult<Json<MessagesResponse>> {
    let contact_id = parse_contact_id(query.contact_id.as_deref())?;
    let contact = normalize_text(query.contact.as_deref());

    let response = ChatService::new(&state.upstream)
        .get_messages(&session.session_id, contact_id, contact.as_deref())
        .await?;
    Ok(Json(response))
}

/// POST /api/chat/send - Send a message to a contact
pub async fn send_post(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SendMessageResponse>> {
    let Json(body) = body?;
    let input = parse_send_message(&body)?;

    let response = ChatService::new(&state.upstream)
        .send_message(&session.session_id, &input)
        .await?;
    Ok(Json(response))
}
