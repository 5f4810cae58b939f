//! Table cell for money values
//!
//! ```ignore
//! <TableCellMoney value=record.final_amount() />
//! <TableCellMoney value=record.remaining_amount() bold=true />
//! ```

use super::number_format::format_brl;
use leptos::prelude::*;
use thaw::*;

/// Right-aligned `R$ 1.234,56` cell
#[component]
pub fn TableCellMoney(
    #[prop(into)]
    value: Signal<f64>,

    /// Colour negative values red
    #[prop(optional, default = false)]
    color_negative: bool,

    #[prop(optional, default = false)]
    bold: bool,
) -> impl IntoView {
    let cell_style = move || {
        let mut styles = Vec::new();
        if color_negative && value.get() < 0.0 {
            styles.push("color: var(--color-error-700)");
        }
        if bold {
            styles.push("font-weight: 600");
        }
        styles.join("; ")
    };

    view! {
        <TableCell class="text-right">
            <span style=cell_style>
                {move || format_brl(value.get())}
            </span>
        </TableCell>
    }
}
