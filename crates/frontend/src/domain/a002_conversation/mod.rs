//! Conversation: message history and the controller that talks to `/chat`.

pub mod controller;
pub mod conversation_log;
pub mod ui;
