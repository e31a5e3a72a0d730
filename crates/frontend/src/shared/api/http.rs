use super::{ApiError, FilePayload, NexusApi, SelectedFile};
use crate::shared::api_utils::ApiConfig;
use async_trait::async_trait;
use contracts::domain::a001_document::aggregate::{Document, UploadResponse};
use contracts::domain::a002_conversation::aggregate::{ChatRequest, ChatResponse};
use contracts::shared::api_error::ErrorBody;
use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use std::future::Future;
use web_sys::{Blob, BlobPropertyBag, FormData};

/// [`NexusApi`] over `fetch`.
#[derive(Debug, Clone)]
pub struct HttpApi {
    config: ApiConfig,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Races `request` against the configured timeout.
    async fn bounded<T, F>(&self, request: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let timeout = TimeoutFuture::new(self.config.timeout_ms);
        match select(Box::pin(request), timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(ApiError::Timeout(self.config.timeout_ms)),
        }
    }
}

#[async_trait(?Send)]
impl NexusApi for HttpApi {
    async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        let url = self.config.url("/files");
        self.bounded(async {
            let response = Request::get(&url)
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            read_json(response).await
        })
        .await
    }

    async fn upload_document(&self, file: SelectedFile) -> Result<UploadResponse, ApiError> {
        let url = self.config.url("/upload");
        let form = build_form(&file)?;
        self.bounded(async {
            let response = Request::post(&url)
                .body(form)
                .map_err(|e| ApiError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            read_json(response).await
        })
        .await
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ApiError> {
        let url = self.config.url("/chat");
        self.bounded(async {
            let response = Request::post(&url)
                .json(&request)
                .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            read_json(response).await
        })
        .await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let status_text = response.status_text();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    decode_body(status, status_text, &text)
}

/// Turns a response body into `T`, or into [`ApiError::Http`] for non-2xx.
fn decode_body<T: DeserializeOwned>(status: u16, status_text: String, text: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Http {
            status,
            status_text,
            body: ErrorBody::parse(text),
        });
    }

    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

fn build_form(file: &SelectedFile) -> Result<FormData, ApiError> {
    let js_err = |e: wasm_bindgen::JsValue| ApiError::Transport(format!("{e:?}"));
    let form = FormData::new().map_err(js_err)?;
    let name = &file.descriptor.name;
    match &file.payload {
        FilePayload::Blob(blob) => form
            .append_with_blob_and_filename("file", blob, name)
            .map_err(js_err)?,
        FilePayload::Bytes(bytes) => {
            let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
            let options = BlobPropertyBag::new();
            options.set_type(&file.descriptor.content_type);
            let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(js_err)?;
            form.append_with_blob_and_filename("file", &blob, name)
                .map_err(js_err)?
        }
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_body() {
        let docs: Vec<Document> =
            decode_body(200, "OK".into(), r#"[{"id":"a","name":"geo.pdf"}]"#).unwrap();
        assert_eq!(docs, vec![Document::new("a", "geo.pdf")]);
    }

    #[test]
    fn test_decode_error_status_keeps_detail() {
        let err = decode_body::<ChatResponse>(
            400,
            "Bad Request".into(),
            r#"{"detail":"No text could be extracted from the file"}"#,
        )
        .unwrap_err();

        match err {
            ApiError::Http { status, body, .. } => {
                assert_eq!(status, 400);
                assert_eq!(
                    body.and_then(|b| b.detail_text()).as_deref(),
                    Some("No text could be extracted from the file")
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_status_with_html_body() {
        let err = decode_body::<ChatResponse>(502, "Bad Gateway".into(), "<html></html>").unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 502,
                status_text: "Bad Gateway".into(),
                body: None,
            }
        );
    }

    #[test]
    fn test_decode_malformed_success_body() {
        let err = decode_body::<ChatResponse>(200, "OK".into(), "not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
