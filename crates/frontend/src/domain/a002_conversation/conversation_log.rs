//! Conversation Log: append-only message history plus the pending exchange.

use contracts::domain::a002_conversation::aggregate::ChatMessage;

/// Identifies one chat exchange between `begin_exchange` and
/// `complete_exchange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeTicket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationLog {
    messages: Vec<ChatMessage>,
    pending: Option<ExchangeTicket>,
    issued: u64,
}

impl ConversationLog {
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Messages in order. The iterator can be cloned to restart it.
    pub fn messages(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Marks an exchange as pending. `None` if one already is.
    pub fn begin_exchange(&mut self) -> Option<ExchangeTicket> {
        if self.pending.is_some() {
            return None;
        }
        self.issued += 1;
        let ticket = ExchangeTicket(self.issued);
        self.pending = Some(ticket);
        Some(ticket)
    }

    /// Appends the reply and clears `pending`, but only if `ticket` is still
    /// the pending exchange. A reply for a reset exchange is discarded.
    pub fn complete_exchange(&mut self, ticket: ExchangeTicket, reply: ChatMessage) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.messages.push(reply);
        self.pending = None;
        true
    }

    /// Abandons the pending exchange, if any. Returns whether one was pending.
    pub fn reset_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pending_exchange() {
        let mut log = ConversationLog::default();
        let ticket = log.begin_exchange().unwrap();
        assert!(log.is_pending());
        assert!(log.begin_exchange().is_none());

        assert!(log.complete_exchange(ticket, ChatMessage::assistant("ok", vec![])));
        assert!(!log.is_pending());
        assert!(log.begin_exchange().is_some());
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut log = ConversationLog::default();
        let first = log.begin_exchange().unwrap();
        assert!(log.reset_pending());
        let second = log.begin_exchange().unwrap();

        assert!(!log.complete_exchange(first, ChatMessage::assistant("late", vec![])));
        assert!(log.is_empty());
        assert!(log.is_pending());

        assert!(log.complete_exchange(second, ChatMessage::assistant("fresh", vec![])));
        assert_eq!(log.last().unwrap().content, "fresh");
    }

    #[test]
    fn test_messages_iterator_restarts() {
        let mut log = ConversationLog::default();
        log.append(ChatMessage::user("q"));
        log.append(ChatMessage::assistant("a", vec!["geo.pdf".into()]));

        let iter = log.messages();
        let first_pass: Vec<&str> = iter.clone().map(|m| m.content.as_str()).collect();
        let second_pass: Vec<&str> = iter.map(|m| m.content.as_str()).collect();
        assert_eq!(first_pass, vec!["q", "a"]);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_reset_without_pending() {
        let mut log = ConversationLog::default();
        assert!(!log.reset_pending());
    }
}
