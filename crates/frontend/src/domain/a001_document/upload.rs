//! Upload Session: one attempt to add a document.
//!
//! ```text
//! idle -> validating -> uploading -> idle   (success, registry refreshed)
//! idle -> validating -> idle                (rejected, nothing sent)
//!         validating -> uploading -> idle   (failed, registry untouched)
//! ```
//!
//! Only one attempt may be in flight per client; the phase lives in
//! [`AppContext::upload_phase`] so every session sees it.

use crate::layout::global_context::AppContext;
use crate::shared::api::{ApiError, FileDescriptor, NexusApi, SelectedFile};
use contracts::domain::a001_document::aggregate::{DocumentContentType, UploadResponse};
use leptos::prelude::*;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Validating,
    Uploading,
}

impl UploadPhase {
    pub fn is_busy(&self) -> bool {
        !matches!(self, UploadPhase::Idle)
    }
}

/// Ошибки загрузки документа
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    #[error("another upload is already in progress")]
    Busy,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl UploadError {
    /// Text shown to the user. `base_url` names the backend in connectivity
    /// errors.
    pub fn user_message(&self, base_url: &str) -> String {
        match self {
            UploadError::UnsupportedType(_) => "Please upload a PDF, TXT, or DOCX file".to_string(),
            UploadError::Busy => "Please wait for the current upload to finish".to_string(),
            UploadError::Api(e) if e.is_connectivity() => format!(
                "Failed to connect to the server. Please make sure the backend is running on {}",
                base_url
            ),
            UploadError::Api(ApiError::Http {
                body: Some(body), ..
            }) => match body.detail_text() {
                Some(detail) => format!("Upload failed: {}", detail),
                None => "Upload failed".to_string(),
            },
            UploadError::Api(ApiError::Http {
                status,
                status_text,
                body: None,
            }) => format!("Server error: {} {}", status, status_text)
                .trim_end()
                .to_string(),
            UploadError::Api(e) => format!("Upload failed: {}", e),
        }
    }
}

/// Checks the declared content type against the upload allow-list.
pub fn validate_content_type(file: &FileDescriptor) -> Result<DocumentContentType, UploadError> {
    DocumentContentType::from_mime(&file.content_type)
        .ok_or_else(|| UploadError::UnsupportedType(file.content_type.clone()))
}

/// A single upload attempt.
pub struct UploadSession {
    ctx: AppContext,
}

impl UploadSession {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub fn phase(&self) -> UploadPhase {
        self.ctx.upload_phase.get_untracked()
    }

    fn set_phase(&self, phase: UploadPhase) {
        log::debug!("Upload phase: {:?} -> {:?}", self.phase(), phase);
        self.ctx.upload_phase.set(phase);
    }

    /// Validates `file` and, if accepted, submits it.
    pub async fn upload<A>(self, api: &A, file: SelectedFile) -> Result<UploadResponse, UploadError>
    where
        A: NexusApi + ?Sized,
    {
        self.validate(&file.descriptor)?;
        self.submit(api, file).await
    }

    /// Enters `validating`. On rejection the session returns to `idle`
    /// without touching the network; on acceptance it stays in
    /// `validating` until [`UploadSession::submit`].
    pub fn validate(&self, file: &FileDescriptor) -> Result<DocumentContentType, UploadError> {
        if self.phase().is_busy() {
            log::warn!("Upload of {} refused: another upload is active", file.name);
            return Err(UploadError::Busy);
        }
        self.set_phase(UploadPhase::Validating);

        match validate_content_type(file) {
            Ok(content_type) => Ok(content_type),
            Err(e) => {
                log::warn!("Upload of {} rejected: {}", file.name, e);
                self.set_phase(UploadPhase::Idle);
                Err(e)
            }
        }
    }

    /// Sends the file to `POST /upload` and refreshes the registry on
    /// success. Refused while another upload is in `uploading`, and for
    /// files outside the allow-list.
    async fn submit<A>(&self, api: &A, file: SelectedFile) -> Result<UploadResponse, UploadError>
    where
        A: NexusApi + ?Sized,
    {
        if self.phase() == UploadPhase::Uploading {
            log::warn!("Upload of {} refused: another upload is active", file.descriptor.name);
            return Err(UploadError::Busy);
        }
        if let Err(e) = validate_content_type(&file.descriptor) {
            self.set_phase(UploadPhase::Idle);
            return Err(e);
        }
        self.set_phase(UploadPhase::Uploading);

        let name = file.descriptor.name.clone();
        let result = api.upload_document(file).await;
        self.set_phase(UploadPhase::Idle);

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                log::error!("Upload error for {}: {}", name, e);
                return Err(e.into());
            }
        };
        log::info!(
            "Uploaded {} as {} ({} chunks)",
            response.file_name,
            response.file_id,
            response.chunks_created
        );

        // The upload itself succeeded; a stale list is reported but not fatal.
        if let Err(e) = self.ctx.refresh_documents(api).await {
            log::warn!("Registry refresh after upload failed: {}", e);
        }
        Ok(response)
    }
}
