//! Sources sidebar: upload area and the list of documents with their
//! active/inactive switches.

use crate::domain::a001_document::upload::{UploadPhase, UploadSession};
use crate::layout::global_context::use_app_context;
use crate::shared::api::SelectedFile;
use crate::shared::icons::icon;
use contracts::domain::a001_document::aggregate::{Document, DocumentContentType};
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn SourcesPanel() -> impl IntoView {
    let ctx = use_app_context();
    let notice = RwSignal::new(None::<String>);
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    // Load the registry once on mount
    Effect::new(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            let api = ctx.api();
            if let Err(e) = ctx.refresh_documents(&api).await {
                notice.set(Some(format!("Could not load sources: {}", e)));
            }
        });
    });

    let open_picker = move |_: leptos::ev::MouseEvent| {
        if ctx.upload_phase.get_untracked().is_busy() {
            return;
        }
        if let Some(input) = file_input_ref.get() {
            input.click();
        }
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let selected = SelectedFile::from_web_file(file);
        notice.set(None);

        wasm_bindgen_futures::spawn_local(async move {
            let api = ctx.api();
            match UploadSession::new(ctx).upload(&api, selected).await {
                // Reset so the same file can be picked again
                Ok(_) => input.set_value(""),
                Err(e) => notice.set(Some(e.user_message(&api.config().base_url))),
            }
        });
    };

    view! {
        <div style="width: 320px; height: 100%; display: flex; flex-direction: column; border-right: 1px solid var(--colorNeutralStroke2); background: var(--colorNeutralBackground2);">
            <div style="padding: 20px 16px; border-bottom: 1px solid var(--colorNeutralStroke2); background: var(--colorNeutralBackground1);">
                <div style="font-size: 20px; font-weight: 500;">"NexusMind"</div>
                <div style="font-size: 12px; color: var(--colorNeutralForeground3);">"Sources"</div>
            </div>

            <input
                type="file"
                node_ref=file_input_ref
                accept=DocumentContentType::accept_attribute()
                style="display: none;"
                on:change=on_file_change
            />

            <div
                style="margin: 16px; padding: 24px 16px; border: 2px dashed var(--colorNeutralStroke1); border-radius: 8px; text-align: center; cursor: pointer; background: var(--colorNeutralBackground1);"
                on:click=open_picker
            >
                {icon("upload")}
                <div style="margin-top: 8px; font-size: 14px;">
                    {move || match ctx.upload_phase.get() {
                        UploadPhase::Idle => "Click to upload a document",
                        UploadPhase::Validating => "Checking file...",
                        UploadPhase::Uploading => "Uploading...",
                    }}
                </div>
                <div style="font-size: 12px; color: var(--colorNeutralForeground3);">"PDF, TXT, DOCX"</div>
            </div>

            {move || {
                notice
                    .get()
                    .map(|text| {
                        view! {
                            <div style="margin: 0 16px 12px; padding: 10px 12px; background: var(--color-error-50); border: 1px solid var(--color-error-100); border-radius: 8px; font-size: 13px;">
                                <span style="color: var(--color-error);">{text}</span>
                            </div>
                        }
                    })
            }}

            <div style="padding: 8px 16px; font-size: 14px; font-weight: 500; text-transform: uppercase; letter-spacing: 0.5px; color: var(--colorNeutralForeground3);">
                {move || format!("Documents ({})", ctx.registry.with(|r| r.len()))}
            </div>

            <div style="flex: 1; overflow-y: auto; padding: 8px;">
                <Show
                    when=move || !ctx.registry.with(|r| r.is_empty())
                    fallback=|| view! {
                        <div style="padding: 16px; font-size: 13px; color: var(--colorNeutralForeground3);">
                            "No documents yet. Upload one to start."
                        </div>
                    }
                >
                    <For
                        each=move || ctx.registry.with(|r| r.documents().to_vec())
                        key=|doc| doc.id.clone()
                        let:doc
                    >
                        <DocumentRow doc=doc />
                    </For>
                </Show>
            </div>

            <div style="padding: 12px 16px; border-top: 1px solid var(--colorNeutralStroke2);">
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| {
                        wasm_bindgen_futures::spawn_local(async move {
                            let api = ctx.api();
                            match ctx.refresh_documents(&api).await {
                                Ok(_) => notice.set(None),
                                Err(e) => notice.set(Some(format!("Could not load sources: {}", e))),
                            }
                        });
                    }
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </div>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn DocumentRow(doc: Document) -> impl IntoView {
    let ctx = use_app_context();
    let is_active = {
        let id = doc.id.clone();
        move || ctx.is_source_active(&id)
    };
    let id = doc.id.clone();

    view! {
        <label style="display: flex; align-items: center; gap: 12px; padding: 10px 16px; margin: 4px 8px; border-radius: 4px; background: var(--colorNeutralBackground1); cursor: pointer;">
            <input
                type="checkbox"
                style="width: 18px; height: 18px; cursor: pointer;"
                prop:checked=is_active
                on:change=move |_| ctx.toggle_source(&id)
            />
            {icon("document")}
            <span
                title=doc.name.clone()
                style="flex: 1; font-size: 14px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;"
            >
                {doc.name.clone()}
            </span>
        </label>
    }
}
