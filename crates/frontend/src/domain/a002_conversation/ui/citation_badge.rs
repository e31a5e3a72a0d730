use leptos::prelude::*;

/// Round badge with the number of sources an answer cites. Hovering shows
/// their names. Renders nothing when there are no sources.
#[component]
#[allow(non_snake_case)]
pub fn CitationBadge(sources: Vec<String>) -> impl IntoView {
    let hovered = RwSignal::new(false);
    let count = sources.len();

    (!sources.is_empty()).then(move || {
        view! {
            <div
                style="position: relative; flex-shrink: 0; margin-top: 4px;"
                on:mouseenter=move |_| hovered.set(true)
                on:mouseleave=move |_| hovered.set(false)
            >
                <div style=move || {
                    let (border, color) = if hovered.get() {
                        ("var(--colorBrandStroke1)", "var(--colorBrandForeground1)")
                    } else {
                        ("var(--colorNeutralStroke1)", "var(--colorNeutralForeground3)")
                    };
                    format!(
                        "width: 20px; height: 20px; border-radius: 50%; border: 1px solid {}; color: {}; display: flex; align-items: center; justify-content: center; font-size: 10px; font-weight: bold; cursor: pointer; background: var(--colorNeutralBackground1);",
                        border, color
                    )
                }>
                    {count}
                </div>
                <Show when=move || hovered.get()>
                    <div style="position: absolute; bottom: 100%; left: 0; margin-bottom: 8px; padding: 12px 16px; min-width: 200px; max-width: 300px; background: #202124; color: #ffffff; border-radius: 8px; font-size: 13px; line-height: 1.5; box-shadow: 0 4px 12px rgba(0,0,0,0.15); z-index: 1000;">
                        <div style="font-weight: 600; margin-bottom: 8px; font-size: 12px; text-transform: uppercase; letter-spacing: 0.5px;">
                            "Sources"
                        </div>
                        {sources
                            .iter()
                            .map(|name| {
                                view! {
                                    <div style="padding: 4px 0; border-bottom: 1px solid rgba(255,255,255,0.1); overflow: hidden; text-overflow: ellipsis; white-space: nowrap;">
                                        {name.clone()}
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </Show>
            </div>
        }
    })
}
