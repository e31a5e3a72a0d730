//! In-memory [`NexusApi`] for tests.

use super::{ApiError, FileDescriptor, NexusApi, SelectedFile};
use async_trait::async_trait;
use contracts::domain::a001_document::aggregate::{Document, UploadResponse};
use contracts::domain::a002_conversation::aggregate::{ChatRequest, ChatResponse};
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

pub type ChatResult = Result<ChatResponse, ApiError>;

pub enum ChatReply {
    Ready(ChatResult),
    /// Resolves when the paired sender fires.
    Deferred(oneshot::Receiver<ChatResult>),
}

#[derive(Default)]
pub struct MockApi {
    pub documents: RefCell<Vec<Document>>,
    pub list_error: RefCell<Option<ApiError>>,
    pub list_calls: Cell<usize>,
    /// Pending `list_documents` results, consumed in call order.
    pub list_replies: RefCell<VecDeque<oneshot::Receiver<Vec<Document>>>>,
    pub upload_error: RefCell<Option<ApiError>>,
    pub uploads: RefCell<Vec<FileDescriptor>>,
    pub chat_replies: RefCell<VecDeque<ChatReply>>,
    pub chat_requests: RefCell<Vec<ChatRequest>>,
}

impl MockApi {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        let api = Self::default();
        *api.documents.borrow_mut() = documents;
        api
    }

    pub fn reply(&self, response: &str, sources: Option<Vec<&str>>) {
        let response = ChatResponse {
            response: response.to_string(),
            sources_used: sources.map(|s| s.into_iter().map(String::from).collect()),
        };
        self.chat_replies
            .borrow_mut()
            .push_back(ChatReply::Ready(Ok(response)));
    }

    pub fn fail_chat(&self, error: ApiError) {
        self.chat_replies
            .borrow_mut()
            .push_back(ChatReply::Ready(Err(error)));
    }

    /// Queues a reply that stays pending until the returned sender is used.
    pub fn defer_chat(&self) -> oneshot::Sender<ChatResult> {
        let (tx, rx) = oneshot::channel();
        self.chat_replies
            .borrow_mut()
            .push_back(ChatReply::Deferred(rx));
        tx
    }

    /// Makes the next `list_documents` call wait for the returned sender.
    pub fn defer_list(&self) -> oneshot::Sender<Vec<Document>> {
        let (tx, rx) = oneshot::channel();
        self.list_replies.borrow_mut().push_back(rx);
        tx
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_requests.borrow().len()
    }

    pub fn upload_calls(&self) -> usize {
        self.uploads.borrow().len()
    }
}

pub fn http_error(status: u16) -> ApiError {
    ApiError::Http {
        status,
        status_text: "Internal Server Error".to_string(),
        body: None,
    }
}

#[async_trait(?Send)]
impl NexusApi for MockApi {
    async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if let Some(err) = self.list_error.borrow().clone() {
            return Err(err);
        }
        let deferred = self.list_replies.borrow_mut().pop_front();
        match deferred {
            Some(rx) => rx
                .await
                .map_err(|_| ApiError::Transport("list reply dropped".to_string())),
            None => Ok(self.documents.borrow().clone()),
        }
    }

    async fn upload_document(&self, file: SelectedFile) -> Result<UploadResponse, ApiError> {
        self.uploads.borrow_mut().push(file.descriptor.clone());
        if let Some(err) = self.upload_error.borrow().clone() {
            return Err(err);
        }
        let id = format!("doc-{}", self.documents.borrow().len() + 1);
        let name = file.descriptor.name.clone();
        self.documents
            .borrow_mut()
            .push(Document::new(id.clone(), name.clone()));
        Ok(UploadResponse {
            file_id: id.as_str().into(),
            file_name: name,
            chunks_created: 3,
            status: "success".to_string(),
        })
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ApiError> {
        self.chat_requests.borrow_mut().push(request);
        let reply = self.chat_replies.borrow_mut().pop_front();
        match reply {
            Some(ChatReply::Ready(result)) => result,
            Some(ChatReply::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Transport("reply dropped".to_string()))),
            None => Err(http_error(500)),
        }
    }
}
