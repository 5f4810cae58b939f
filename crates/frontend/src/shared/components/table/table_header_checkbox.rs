//! Header checkbox selecting every visible row
//!
//! ```ignore
//! <TableHeaderCheckbox
//!     state=Signal::derive(move || header_state())
//!     on_change=Callback::new(move |check_all: bool| { ... })
//! />
//! ```

use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// Tri-state header checkbox. `indeterminate` is a DOM property only, so it
/// is pushed to the element from an effect.
#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)]
    state: Signal<CheckState>,

    /// Callback on click (true = select all visible, false = clear)
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        let current = state.get();
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(current == CheckState::Indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                title="Selecionar página"
                prop:checked=move || state.get() == CheckState::Checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}
