//! Text-generation collaborator
//!
//! Produces guest greetings and department memos. Its output is phrasing
//! only: callers bound every call with a timeout and fall back to
//! [`templates`](super::templates) on any error.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::models::{Booking, Guest, Room, StaffEmailType};
use std::time::Duration;
use thiserror::Error;

use super::templates;

/// Arrival or departure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    In,
    Out,
}

/// Everything a memo may mention
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmailContext {
    pub hotel_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<Guest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
    /// Request details for service and food memos
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Department chosen by the engine when the event implies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Department-addressed memo text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEmail {
    pub subject: String,
    pub body: String,
    pub department: String,
}

impl GeneratedEmail {
    pub fn is_blank(&self) -> bool {
        self.subject.trim().is_empty() || self.body.trim().is_empty()
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Text generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Text generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed text generation response: {0}")]
    Malformed(String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;

/// 文本生成服务 trait
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Welcome (in) or farewell (out) line for the guest
    async fn check_in_out_message(
        &self,
        direction: Direction,
        guest: &Guest,
        room: &Room,
    ) -> GenerationResult<String>;

    async fn staff_email(
        &self,
        kind: StaffEmailType,
        context: &EmailContext,
    ) -> GenerationResult<GeneratedEmail>;
}

/// Deterministic generator; used when no endpoint is configured
#[derive(Debug, Clone)]
pub struct TemplateGenerator {
    hotel_name: String,
}

impl TemplateGenerator {
    pub fn new(hotel_name: impl Into<String>) -> Self {
        Self {
            hotel_name: hotel_name.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for TemplateGenerator {
    async fn check_in_out_message(
        &self,
        direction: Direction,
        guest: &Guest,
        room: &Room,
    ) -> GenerationResult<String> {
        Ok(templates::guest_message(direction, guest, room))
    }

    async fn staff_email(
        &self,
        kind: StaffEmailType,
        context: &EmailContext,
    ) -> GenerationResult<GeneratedEmail> {
        let mut context = context.clone();
        if context.hotel_name.is_empty() {
            context.hotel_name = self.hotel_name.clone();
        }
        Ok(templates::staff_email(kind, &context))
    }
}

#[derive(Serialize)]
#[serde(tag = "task", rename_all = "snake_case")]
enum GenerationRequest<'a> {
    GuestMessage {
        direction: Direction,
        hotel_name: &'a str,
        guest_name: &'a str,
        room_number: &'a str,
    },
    StaffEmail {
        #[serde(rename = "type")]
        kind: StaffEmailType,
        context: &'a EmailContext,
    },
}

#[derive(Deserialize)]
struct GuestMessageResponse {
    text: String,
}

/// HTTP 文本生成客户端
///
/// POSTs a JSON request to the configured endpoint; the response is
/// `{"text": ...}` for guest messages and `{"subject", "body", "department"}`
/// for memos.
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: Client,
    url: String,
    api_key: Option<String>,
    hotel_name: String,
}

impl HttpTextGenerator {
    pub fn new(
        url: &str,
        api_key: Option<String>,
        hotel_name: impl Into<String>,
        timeout: Duration,
    ) -> GenerationResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            api_key,
            hotel_name: hotel_name.into(),
        })
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        body: &GenerationRequest<'_>,
    ) -> GenerationResult<T> {
        let mut req = self.client.post(&self.url).json(body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let response = req.send().await?.error_for_status()?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| GenerationError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn check_in_out_message(
        &self,
        direction: Direction,
        guest: &Guest,
        room: &Room,
    ) -> GenerationResult<String> {
        let request = GenerationRequest::GuestMessage {
            direction,
            hotel_name: &self.hotel_name,
            guest_name: &guest.name,
            room_number: &room.number,
        };
        let response: GuestMessageResponse = self.post(&request).await?;
        let text = response.text.trim();
        if text.is_empty() {
            return Err(GenerationError::Malformed("empty guest message".to_string()));
        }
        Ok(text.to_string())
    }

    async fn staff_email(
        &self,
        kind: StaffEmailType,
        context: &EmailContext,
    ) -> GenerationResult<GeneratedEmail> {
        let request = GenerationRequest::StaffEmail { kind, context };
        let email: GeneratedEmail = self.post(&request).await?;
        if email.is_blank() {
            return Err(GenerationError::Malformed("empty subject or body".to_string()));
        }
        Ok(email)
    }
}
