//! Chat - main conversation area

use super::citation_badge::CitationBadge;
use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use contracts::domain::a002_conversation::aggregate::ChatMessage;
use leptos::prelude::*;
use thaw::*;

/// Header pill text, e.g. "1 source active" / "3 sources active".
pub(crate) fn active_sources_label(count: usize) -> String {
    let noun = if count == 1 { "source" } else { "sources" };
    format!("{} {} active", count, noun)
}

#[component]
#[allow(non_snake_case)]
pub fn ChatPanel() -> impl IntoView {
    let ctx = use_app_context();
    let draft = RwSignal::new(String::new());
    let messages_container_ref = NodeRef::<leptos::html::Div>::new();
    let is_pending = Signal::derive(move || ctx.is_pending());

    // Keep the newest message in view
    Effect::new(move |_| {
        ctx.conversation.with(|log| log.len());
        if let Some(container) = messages_container_ref.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    let handle_send = Callback::new(move |_: ()| {
        let text = draft.get_untracked();
        if text.trim().is_empty() || ctx.conversation.with_untracked(|log| log.is_pending()) {
            return;
        }
        draft.set(String::new());

        wasm_bindgen_futures::spawn_local(async move {
            let api = ctx.api();
            let outcome = ctx.send(&api, &text).await;
            log::debug!("Chat exchange finished: {:?}", outcome);
        });
    });

    view! {
        <div style="flex: 1; display: flex; flex-direction: column; overflow: hidden; background: var(--colorNeutralBackground1);">
            <div style="padding: 16px 24px; border-bottom: 1px solid var(--colorNeutralStroke2);">
                <span style="display: inline-flex; align-items: center; padding: 6px 12px; border-radius: 16px; background: var(--colorBrandBackground2); color: var(--colorBrandForeground1); font-size: 13px; font-weight: 500;">
                    {move || active_sources_label(ctx.active_source_count())}
                </span>
            </div>

            <div
                node_ref=messages_container_ref
                style="flex: 1; overflow-y: auto; padding: 24px; background: var(--colorNeutralBackground2);"
            >
                <Show when=move || ctx.conversation.with(|log| log.is_empty())>
                    <div style="text-align: center; margin-top: 80px; color: var(--colorNeutralForeground3);">
                        <div style="font-size: 18px; margin-bottom: 8px; color: var(--colorNeutralForeground1);">
                            "Start a conversation"
                        </div>
                        <div>"Ask questions about your documents"</div>
                    </div>
                </Show>

                <div style="max-width: 900px; margin: 0 auto; width: 100%; display: flex; flex-direction: column; gap: 24px;">
                    <For
                        each=move || ctx.conversation.with(|log| log.messages().cloned().collect::<Vec<_>>())
                        key=|msg| msg.id
                        let:msg
                    >
                        <MessageBubble msg=msg />
                    </For>

                    <Show when=move || is_pending.get()>
                        <Flex align=FlexAlign::Center style="gap: 12px; color: var(--colorNeutralForeground3); font-size: 13px;">
                            <span>"Thinking..."</span>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                size=ButtonSize::Small
                                on_click=move |_| ctx.reset_pending()
                            >
                                {icon("close")}
                                " Stop waiting"
                            </Button>
                        </Flex>
                    </Show>
                </div>
            </div>

            <div style="padding: 16px 24px; border-top: 1px solid var(--colorNeutralStroke2);">
                <Flex style="gap: 8px; align-items: flex-end; max-width: 900px; margin: 0 auto;">
                    <div style="flex: 1;">
                        <Textarea
                            value=draft
                            placeholder="Ask a question about your documents..."
                            attr:style="width: 100%; min-height: 44px; max-height: 200px; resize: vertical;"
                            disabled=is_pending
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" && !ev.shift_key() {
                                    ev.prevent_default();
                                    handle_send.run(());
                                }
                            }
                        />
                    </div>

                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=is_pending
                        on_click=move |_| handle_send.run(())
                    >
                        {icon("send")}
                        {move || if is_pending.get() { " Sending..." } else { " Send" }}
                    </Button>
                </Flex>
            </div>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn MessageBubble(msg: ChatMessage) -> impl IntoView {
    let is_user = msg.is_user();
    let sources = msg.sources.clone();

    view! {
        <div style=if is_user {
            "display: flex; flex-direction: column; align-items: flex-end;"
        } else {
            "display: flex; flex-direction: column; align-items: flex-start;"
        }>
            <div style="display: flex; align-items: flex-start; gap: 8px; max-width: 70%;">
                {(!is_user).then(|| view! { <CitationBadge sources=sources /> })}
                <div style=if is_user {
                    "padding: 12px 16px; border-radius: 18px; font-size: 14px; line-height: 1.6; white-space: pre-wrap; background: var(--colorBrandBackground); color: var(--colorNeutralForegroundOnBrand);"
                } else {
                    "padding: 12px 16px; border-radius: 18px; font-size: 14px; line-height: 1.6; white-space: pre-wrap; background: var(--colorNeutralBackground1); border: 1px solid var(--colorNeutralStroke2); box-shadow: 0 1px 2px rgba(0,0,0,0.1);"
                }>
                    {msg.content.clone()}
                </div>
            </div>
            <div style="font-size: 11px; opacity: 0.6; margin-top: 4px;">
                {msg.created_at.with_timezone(&chrono::Local).format("%H:%M").to_string()}
            </div>
        </div>
    }
}
