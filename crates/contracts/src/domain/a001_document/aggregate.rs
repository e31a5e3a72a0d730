use serde::{Deserialize, Serialize};
use std::fmt;

/// Идентификатор документа, выданный бэкендом.
///
/// Opaque to the client: it is only compared and echoed back in chat requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Документ (элемент ответа `GET /files`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
}

impl Document {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(id),
            name: name.into(),
        }
    }
}

/// Ответ `POST /upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_id: DocumentId,
    pub file_name: String,
    #[serde(default)]
    pub chunks_created: u32,
    #[serde(default)]
    pub status: String,
}

/// Content types accepted for upload.
///
/// The backend enforces the same list; the client checks it first so that an
/// unsupported file never leaves the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentContentType {
    Pdf,
    PlainText,
    Docx,
    Doc,
}

impl DocumentContentType {
    pub const ALL: [DocumentContentType; 4] = [
        DocumentContentType::Pdf,
        DocumentContentType::PlainText,
        DocumentContentType::Docx,
        DocumentContentType::Doc,
    ];

    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.mime() == mime)
    }

    pub fn mime(&self) -> &'static str {
        match self {
            DocumentContentType::Pdf => "application/pdf",
            DocumentContentType::PlainText => "text/plain",
            DocumentContentType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentContentType::Doc => "application/msword",
        }
    }

    /// Value for the `accept` attribute of a file input.
    pub fn accept_attribute() -> String {
        let mut parts: Vec<&str> = vec![".pdf", ".txt", ".docx", ".doc"];
        parts.extend(Self::ALL.iter().map(|t| t.mime()));
        parts.join(",")
    }
}
