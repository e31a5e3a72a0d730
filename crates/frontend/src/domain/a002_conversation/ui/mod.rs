//! Chat UI
//!
//! - chat_panel.rs: message list, input and send/reset handling
//! - citation_badge.rs: source count with a hover list of source names

mod chat_panel;
mod citation_badge;

pub use chat_panel::ChatPanel;
pub use citation_badge::CitationBadge;
