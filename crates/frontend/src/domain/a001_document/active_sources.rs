//! Active Source Set: the documents the conversation is scoped to.

use super::registry::DocumentRegistry;
use crate::layout::global_context::AppContext;
use contracts::domain::a001_document::aggregate::DocumentId;
use leptos::prelude::*;
use std::collections::HashMap;

/// Set of active document ids.
///
/// Membership and toggle are hash lookups. Each id remembers when it was
/// activated so that [`ActiveSourceSet::snapshot`] is deterministic.
#[derive(Debug, Clone, Default)]
pub struct ActiveSourceSet {
    members: HashMap<DocumentId, u64>,
    next_seq: u64,
}

impl ActiveSourceSet {
    /// Adds `id` if absent, removes it otherwise. Returns whether `id` is
    /// active afterwards.
    pub fn toggle(&mut self, id: &DocumentId) -> bool {
        if self.members.remove(id).is_some() {
            return false;
        }
        self.members.insert(id.clone(), self.next_seq);
        self.next_seq += 1;
        true
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.members.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Active ids in activation order, as sent with a chat request.
    pub fn snapshot(&self) -> Vec<DocumentId> {
        let mut ids: Vec<(&DocumentId, u64)> =
            self.members.iter().map(|(id, seq)| (id, *seq)).collect();
        ids.sort_by_key(|(_, seq)| *seq);
        ids.into_iter().map(|(id, _)| id.clone()).collect()
    }

    /// Drops ids the registry no longer lists and returns them.
    pub fn retain_known(&mut self, registry: &DocumentRegistry) -> Vec<DocumentId> {
        let stale: Vec<DocumentId> = self
            .members
            .keys()
            .filter(|id| !registry.contains(id))
            .cloned()
            .collect();
        for id in &stale {
            self.members.remove(id);
        }
        stale
    }
}

impl AppContext {
    pub fn toggle_source(&self, id: &DocumentId) {
        let active = self
            .active_sources
            .try_update(|set| set.toggle(id))
            .unwrap_or_default();
        log::debug!(
            "Source {} {}",
            id,
            if active { "activated" } else { "deactivated" }
        );
    }

    pub fn is_source_active(&self, id: &DocumentId) -> bool {
        self.active_sources.with(|set| set.contains(id))
    }

    pub fn active_source_count(&self) -> usize {
        self.active_sources.with(|set| set.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_document::aggregate::Document;
    use std::collections::HashSet;

    fn members(set: &ActiveSourceSet) -> HashSet<DocumentId> {
        set.snapshot().into_iter().collect()
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut set = ActiveSourceSet::default();
        set.toggle(&"a".into());
        let before = members(&set);

        assert!(set.toggle(&"b".into()));
        assert!(!set.toggle(&"b".into()));
        assert_eq!(members(&set), before);

        assert!(!set.toggle(&"a".into()));
        assert!(set.toggle(&"a".into()));
        assert_eq!(members(&set), before);
    }

    #[test]
    fn test_toggle_unknown_id_adds_it() {
        let mut set = ActiveSourceSet::default();
        assert!(set.toggle(&"not-in-registry".into()));
        assert!(set.contains(&"not-in-registry".into()));
    }

    #[test]
    fn test_snapshot_follows_activation_order() {
        let mut set = ActiveSourceSet::default();
        for id in ["c", "a", "b"] {
            set.toggle(&id.into());
        }
        set.toggle(&"a".into());
        set.toggle(&"a".into());
        let ids: Vec<String> = set.snapshot().into_iter().map(|id| id.0).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_retain_known() {
        let registry = DocumentRegistry::from_documents(vec![Document::new("a", "a.pdf")]);
        let mut set = ActiveSourceSet::default();
        set.toggle(&"a".into());
        set.toggle(&"gone".into());

        let stale = set.retain_known(&registry);
        assert_eq!(stale, vec![DocumentId::from("gone")]);
        assert_eq!(set.len(), 1);
        assert!(set.contains(&"a".into()));
    }

    #[test]
    fn test_context_toggle() {
        let (_owner, ctx) = AppContext::for_test();
        let id: DocumentId = "a".into();
        assert!(!ctx.is_source_active(&id));
        ctx.toggle_source(&id);
        assert!(ctx.is_source_active(&id));
        assert_eq!(ctx.active_source_count(), 1);
        ctx.toggle_source(&id);
        assert_eq!(ctx.active_source_count(), 0);
    }
}
