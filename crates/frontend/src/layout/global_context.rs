use crate::domain::a001_document::active_sources::ActiveSourceSet;
use crate::domain::a001_document::registry::DocumentRegistry;
use crate::domain::a001_document::upload::UploadPhase;
use crate::domain::a002_conversation::conversation_log::ConversationLog;
use crate::shared::api::HttpApi;
use crate::shared::api_utils::ApiConfig;
use leptos::prelude::*;

/// Application state shared by the sidebar and the chat.
///
/// Cheap to copy: every field is an arena handle. Components obtain it via
/// `use_context` and mutate state only through the operations implemented in
/// the `domain` modules (`refresh_documents`, `toggle_source`, `send`, ...).
#[derive(Clone, Copy)]
pub struct AppContext {
    pub registry: RwSignal<DocumentRegistry>,
    pub active_sources: RwSignal<ActiveSourceSet>,
    pub conversation: RwSignal<ConversationLog>,
    pub upload_phase: RwSignal<UploadPhase>,
    /// Number of registry refreshes issued so far; only the latest may apply.
    pub(crate) refresh_issued: StoredValue<u64>,
    config: StoredValue<ApiConfig>,
}

impl AppContext {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            registry: RwSignal::new(DocumentRegistry::default()),
            active_sources: RwSignal::new(ActiveSourceSet::default()),
            conversation: RwSignal::new(ConversationLog::default()),
            upload_phase: RwSignal::new(UploadPhase::Idle),
            refresh_issued: StoredValue::new(0),
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> ApiConfig {
        self.config.get_value()
    }

    pub fn api(&self) -> HttpApi {
        HttpApi::new(self.config())
    }
}

/// Context accessor for components.
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext not found")
}

#[cfg(test)]
impl AppContext {
    /// Fresh context under its own reactive owner. The signals live as long
    /// as the returned owner, so keep it bound for the whole test.
    pub(crate) fn for_test() -> (Owner, Self) {
        let owner = Owner::new();
        owner.set();
        let ctx = Self::new(ApiConfig::default());
        (owner, ctx)
    }
}
