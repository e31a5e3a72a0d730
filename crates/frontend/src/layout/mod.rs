pub mod global_context;

use crate::domain::a001_document::ui::SourcesPanel;
use crate::domain::a002_conversation::ui::ChatPanel;
use leptos::prelude::*;

/// Main application shell.
///
/// ```text
/// +-----------+------------------------------+
/// |  Sources  |            Chat              |
/// |  (Left)   |          (Center)            |
/// +-----------+------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout" style="display: flex; height: 100vh;">
            <SourcesPanel />
            <ChatPanel />
        </div>
    }
}
