use leptos::prelude::*;
use std::collections::BTreeSet;

use crate::shared::icons::icon;

/// Dropdown with one checkbox per option.
///
/// Values are plain strings; callers map them to their typed ids.
#[component]
pub fn MultiSelect(
    #[prop(into)]
    label: String,
    /// (value, label) pairs
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    #[prop(into)]
    selected: Signal<BTreeSet<String>>,
    /// Replaces the selection
    on_change: Callback<BTreeSet<String>>,
    #[prop(optional, into)]
    placeholder: Option<String>,
) -> impl IntoView {
    let open = RwSignal::new(false);
    let placeholder = placeholder.unwrap_or_else(|| "Todos".to_string());

    let summary = move || {
        let sel = selected.get();
        match sel.len() {
            0 => placeholder.clone(),
            1 => options
                .with(|opts| {
                    opts.iter()
                        .find(|(v, _)| sel.contains(v))
                        .map(|(_, l)| l.clone())
                })
                .unwrap_or_else(|| "1 selecionado".to_string()),
            n => format!("{} selecionados", n),
        }
    };

    let toggle = move |value: String, checked: bool| {
        let mut next = selected.get_untracked();
        if checked {
            next.insert(value);
        } else {
            next.remove(&value);
        }
        on_change.run(next);
    };

    view! {
        <div class="multi-select">
            <label class="multi-select__label">{label}</label>
            <button
                type="button"
                class=move || if selected.get().is_empty() { "multi-select__trigger" } else { "multi-select__trigger multi-select__trigger--active" }
                on:click=move |_| open.update(|o| *o = !*o)
            >
                <span>{summary}</span>
                {icon("chevron-down")}
            </button>
            <Show when=move || open.get()>
                <div class="multi-select__popover" on:mouseleave=move |_| open.set(false)>
                    <For
                        each=move || options.get()
                        key=|(value, _)| value.clone()
                        children=move |(value, text)| {
                            let value_for_checked = value.clone();
                            view! {
                                <label class="multi-select__option">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || selected.get().contains(&value_for_checked)
                                        on:change=move |ev| toggle(value.clone(), event_target_checked(&ev))
                                    />
                                    <span>{text}</span>
                                </label>
                            }
                        }
                    />
                    <Show when=move || options.with(|o| o.is_empty())>
                        <div class="multi-select__empty">"Nenhuma opção"</div>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
