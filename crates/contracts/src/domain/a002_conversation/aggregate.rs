use crate::domain::a001_document::aggregate::DocumentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Роль сообщения в чате
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// Сообщение чата
///
/// `sources` holds the display names of the documents the answer was built
/// from. It is only populated for assistant messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub sources: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: String, sources: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            sources,
            created_at: Utc::now(),
        }
    }

    /// Создать сообщение пользователя
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content.into(), Vec::new())
    }

    /// Создать сообщение ассистента
    pub fn assistant(content: impl Into<String>, sources: Vec<String>) -> Self {
        Self::new(ChatRole::Assistant, content.into(), sources)
    }

    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }

    pub fn has_citations(&self) -> bool {
        self.role == ChatRole::Assistant && !self.sources.is_empty()
    }
}

/// Тело запроса `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub active_file_ids: Vec<DocumentId>,
}

/// Ответ `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub sources_used: Option<Vec<String>>,
}

impl ChatResponse {
    pub fn into_message(self) -> ChatMessage {
        ChatMessage::assistant(self.response, self.sources_used.unwrap_or_default())
    }
}
