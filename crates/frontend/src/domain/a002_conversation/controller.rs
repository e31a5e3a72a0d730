//! Conversation Controller: one chat exchange at a time.
//!
//! The user message is committed before the request goes out and is never
//! rolled back. The assistant message is committed whole once the request
//! resolves: either the answer with its citations or a fixed apology.

use super::conversation_log::ConversationLog;
use crate::layout::global_context::AppContext;
use crate::shared::api::NexusApi;
use contracts::domain::a002_conversation::aggregate::{ChatMessage, ChatRequest};
use leptos::prelude::*;

pub const CHAT_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error. Please make sure the backend is running and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input or an exchange already pending; nothing changed.
    Ignored,
    Answered,
    /// The request failed; the apology was appended instead.
    Failed,
    /// The exchange was reset while in flight; its reply was dropped.
    Discarded,
}

impl AppContext {
    /// Sends `user_text` scoped to the current active sources.
    pub async fn send<A>(&self, api: &A, user_text: &str) -> SendOutcome
    where
        A: NexusApi + ?Sized,
    {
        let text = user_text.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }

        let ticket = self
            .conversation
            .try_update(|log: &mut ConversationLog| {
                if log.is_pending() {
                    return None;
                }
                log.append(ChatMessage::user(text));
                log.begin_exchange()
            })
            .flatten();
        let Some(ticket) = ticket else {
            log::debug!("Send ignored: an exchange is already pending");
            return SendOutcome::Ignored;
        };

        // Captured now; later toggles or refreshes do not affect this request.
        let request = ChatRequest {
            message: text.to_string(),
            active_file_ids: self.active_sources.with_untracked(|set| set.snapshot()),
        };
        log::debug!(
            "Chat request with {} active source(s)",
            request.active_file_ids.len()
        );

        let (reply, outcome) = match api.chat(request).await {
            Ok(response) => (response.into_message(), SendOutcome::Answered),
            Err(e) => {
                log::error!("Chat error: {}", e);
                (
                    ChatMessage::assistant(CHAT_ERROR_MESSAGE, Vec::new()),
                    SendOutcome::Failed,
                )
            }
        };

        let committed = self
            .conversation
            .try_update(|log| log.complete_exchange(ticket, reply))
            .unwrap_or(false);
        if !committed {
            log::warn!("Dropped a reply for an exchange that was reset");
            return SendOutcome::Discarded;
        }
        outcome
    }

    /// Clears a stuck pending exchange so the user can send again. A reply
    /// that still arrives for it is dropped.
    pub fn reset_pending(&self) {
        let was_pending = self
            .conversation
            .try_update(|log| log.reset_pending())
            .unwrap_or(false);
        if was_pending {
            log::warn!("Pending exchange reset by user");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.conversation.with(|log| log.is_pending())
    }
}
