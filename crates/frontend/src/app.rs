use crate::layout::global_context::AppContext;
use crate::layout::Shell;
use crate::shared::api_utils::ApiConfig;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::detect();
    log::info!("NexusMind backend: {}", config.base_url);

    // Provide the application state to the whole app via context.
    provide_context(AppContext::new(config));

    view! {
        <ConfigProvider>
            <Shell />
        </ConfigProvider>
    }
}
