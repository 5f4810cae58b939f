//! Sortable table header cell
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Vencimento"
//!     sort_key=PayableSortKey::DueDate
//!     sort_state=Signal::derive(move || sort.get())
//!     on_sort=Callback::new(move |key| sort.update(|s| s.cycle(key)))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator, SortState};
use leptos::prelude::*;
use thaw::*;

/// Header cell that shows the sort indicator (▲▼⇅) and reports clicks
#[component]
pub fn SortableHeaderCell<K>(
    /// Header text
    #[prop(into)]
    label: String,

    /// Column this header sorts by
    sort_key: K,

    /// Current sort of the table
    #[prop(into)]
    sort_state: Signal<SortState<K>>,

    /// Called with `sort_key` on click
    on_sort: Callback<K>,

    /// Minimum column width
    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// Header alignment (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end;"
    } else {
        "cursor: pointer;"
    };

    let direction = move || sort_state.get().direction_of(sort_key);

    view! {
        <TableHeaderCell min_width=min_width>
            <div
                class="table__sortable-header"
                style=header_style
                on:click=move |_| on_sort.run(sort_key)
            >
                {label}
                <span class=move || get_sort_class(direction())>
                    {move || get_sort_indicator(direction())}
                </span>
            </div>
        </TableHeaderCell>
    }
}
