//! Client side of the NexusMind backend contract.
//!
//! - `GET /files`    -> list of documents
//! - `POST /upload`  -> multipart upload (field `file`)
//! - `POST /chat`    -> answer scoped to the active documents
//!
//! [`NexusApi`] is the seam between the state machine and the network;
//! [`HttpApi`] is the browser implementation.

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpApi;

use async_trait::async_trait;
use contracts::domain::a001_document::aggregate::{Document, UploadResponse};
use contracts::domain::a002_conversation::aggregate::{ChatRequest, ChatResponse};
use contracts::shared::api_error::ErrorBody;
use thiserror::Error;

/// Ошибки обращения к бэкенду
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never got an HTTP response (backend down, CORS, DNS).
    #[error("Failed to send request: {0}")]
    Transport(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u32),

    /// Non-2xx status. `body` is `None` when the error body was not JSON.
    #[error("HTTP {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        body: Option<ErrorBody>,
    },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the backend could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Timeout(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// What the client knows about a picked file before sending it anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    /// Declared MIME type as reported by the browser.
    pub content_type: String,
    pub size: u64,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size,
        }
    }
}

/// File contents as handed to the transport.
#[derive(Debug, Clone)]
pub enum FilePayload {
    /// A file straight from an `<input type="file">`.
    Blob(web_sys::Blob),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub descriptor: FileDescriptor,
    pub payload: FilePayload,
}

impl SelectedFile {
    pub fn from_bytes(descriptor: FileDescriptor, bytes: Vec<u8>) -> Self {
        Self {
            descriptor,
            payload: FilePayload::Bytes(bytes),
        }
    }

    pub fn from_web_file(file: web_sys::File) -> Self {
        let descriptor = FileDescriptor::new(file.name(), file.type_(), file.size() as u64);
        Self {
            descriptor,
            payload: FilePayload::Blob(file.into()),
        }
    }
}

/// Backend operations used by the client state machine.
///
/// Futures are not `Send`: everything runs on the browser event loop.
#[async_trait(?Send)]
pub trait NexusApi {
    async fn list_documents(&self) -> Result<Vec<Document>, ApiError>;

    async fn upload_document(&self, file: SelectedFile) -> Result<UploadResponse, ApiError>;

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ApiError>;
}
