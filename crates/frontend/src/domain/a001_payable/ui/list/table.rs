use chrono::NaiveDate;
use contracts::domain::a001_payable::{PayableRecord, PayableStatus};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::table::{
    CheckState, SortableHeaderCell, TableCellCheckbox, TableCellMoney, TableHeaderCheckbox,
};
use crate::shared::date_utils::format_date;
use crate::shared::list_utils::{sorted, SortState, SortValue, Sortable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayableSortKey {
    Description,
    Supplier,
    Branch,
    Category,
    DueDate,
    OriginalAmount,
    FinalAmount,
    AmountPaid,
    RemainingAmount,
    Status,
}

impl Sortable for PayableRecord {
    type Key = PayableSortKey;

    fn sort_value(&self, key: PayableSortKey) -> SortValue {
        match key {
            PayableSortKey::Description => SortValue::Text(Some(self.description.clone())),
            PayableSortKey::Supplier => SortValue::Text(self.supplier.name.clone()),
            PayableSortKey::Branch => SortValue::Text(self.branch.name.clone()),
            PayableSortKey::Category => SortValue::Text(self.category.name.clone()),
            PayableSortKey::DueDate => SortValue::Date(Some(self.due_date)),
            PayableSortKey::OriginalAmount => SortValue::Number(Some(self.original_amount)),
            PayableSortKey::FinalAmount => SortValue::Number(Some(self.final_amount())),
            PayableSortKey::AmountPaid => SortValue::Number(Some(self.amount_paid)),
            PayableSortKey::RemainingAmount => SortValue::Number(Some(self.remaining_amount())),
            PayableSortKey::Status => SortValue::Text(Some(self.status.label().to_string())),
        }
    }
}

/// Presentation only; never consulted by sorting or filtering.
pub fn row_class(record: &PayableRecord, selected: bool, today: NaiveDate) -> String {
    let mut class = String::from("table__row");
    if record.is_overdue(today) {
        class.push_str(" table__row--overdue");
    }
    if selected {
        class.push_str(" table__row--selected");
    }
    class
}

fn status_class(status: PayableStatus) -> &'static str {
    match status {
        PayableStatus::Pending => "status-badge status-badge--warning",
        PayableStatus::Overdue => "status-badge status-badge--error",
        PayableStatus::Paid => "status-badge status-badge--success",
        PayableStatus::PartiallyPaid => "status-badge status-badge--info",
        PayableStatus::Cancelled => "status-badge status-badge--neutral",
    }
}

#[component]
pub fn StatusBadge(status: PayableStatus) -> impl IntoView {
    view! { <span class=status_class(status)>{status.label()}</span> }
}

#[component]
pub fn PayableTable(
    #[prop(into)] records: Signal<Vec<PayableRecord>>,
    #[prop(into)] is_selected: Callback<EntityId, bool>,
    #[prop(into)] header_state: Signal<CheckState>,
    on_toggle: Callback<EntityId>,
    on_header_toggle: Callback<bool>,
    on_open: Callback<PayableRecord>,
    #[prop(into)] today: Signal<NaiveDate>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    let sort_state = RwSignal::new(SortState::<PayableSortKey>::default());
    let on_sort = Callback::new(move |key| sort_state.update(|s| s.cycle(key)));
    let rows = Memo::new(move |_| sorted(&records.get(), &sort_state.get()));

    let header = move |label: &'static str, key: PayableSortKey, min_width: f64, align: &'static str| {
        view! {
            <SortableHeaderCell
                label=label
                sort_key=key
                sort_state=sort_state
                on_sort=on_sort
                min_width=min_width
                align=align
            />
        }
    };

    view! {
        <div class="table-wrapper" class:table-wrapper--loading=move || loading.get()>
            <Table attr:style="width: 100%; min-width: 1100px;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCheckbox state=header_state on_change=on_header_toggle />
                        {header("Descrição", PayableSortKey::Description, 200.0, "left")}
                        {header("Fornecedor", PayableSortKey::Supplier, 160.0, "left")}
                        {header("Filial", PayableSortKey::Branch, 110.0, "left")}
                        {header("Categoria", PayableSortKey::Category, 120.0, "left")}
                        {header("Vencimento", PayableSortKey::DueDate, 100.0, "left")}
                        {header("Valor original", PayableSortKey::OriginalAmount, 110.0, "right")}
                        {header("Valor final", PayableSortKey::FinalAmount, 110.0, "right")}
                        {header("Pago", PayableSortKey::AmountPaid, 100.0, "right")}
                        {header("Restante", PayableSortKey::RemainingAmount, 100.0, "right")}
                        {header("Status", PayableSortKey::Status, 100.0, "left")}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <Show
                        when=move || !rows.with(Vec::is_empty)
                        fallback=move || view! {
                            <TableRow>
                                <TableCell attr:colspan="11">
                                    <div class="table__empty">
                                        {move || if loading.get() { "Carregando..." } else { "Nenhuma conta encontrada" }}
                                    </div>
                                </TableCell>
                            </TableRow>
                        }
                    >
                        <For
                            each=move || rows.get()
                            // rows re-render when a refetch changes the payment state
                            key=|record| (record.id.clone(), record.status, record.amount_paid.to_bits())
                            children=move |record| {
                                let id = record.id.clone();
                                let checked = {
                                    let id = id.clone();
                                    Signal::derive(move || is_selected.run(id.clone()))
                                };
                                let toggle_id = id.clone();
                                let key_id = id.clone();
                                let record_click = record.clone();
                                let record_key = record.clone();
                                let description = record.description.clone();
                                let document_number = record.document_number.clone();
                                let supplier_name = record.supplier.display_name().to_string();
                                let branch_name = record.branch.display_name().to_string();
                                let category_name = record.category.display_name().to_string();
                                let class = {
                                    let record = record.clone();
                                    Signal::derive(move || row_class(&record, checked.get(), today.get()))
                                };

                                view! {
                                    <TableRow
                                        class=class
                                        attr:tabindex="0"
                                        attr:data-payable-id=id.to_string()
                                        on:click=move |_| on_open.run(record_click.clone())
                                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                                            match ev.code().as_str() {
                                                "Space" => {
                                                    ev.prevent_default();
                                                    on_toggle.run(key_id.clone());
                                                }
                                                "Enter" => on_open.run(record_key.clone()),
                                                _ => {}
                                            }
                                        }
                                    >
                                        <TableCellCheckbox
                                            checked=checked
                                            on_change=Callback::new(move |_| on_toggle.run(toggle_id.clone()))
                                        />
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <span class="table__primary">{description}</span>
                                                {document_number.map(|doc| view! {
                                                    <span class="table__secondary">{doc}</span>
                                                })}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {supplier_name}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {branch_name}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {category_name}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_date(record.due_date)}</TableCellLayout>
                                        </TableCell>
                                        <TableCellMoney value=record.original_amount />
                                        <TableCellMoney value=record.final_amount() bold=true />
                                        <TableCellMoney value=record.amount_paid />
                                        <TableCellMoney value=record.remaining_amount() color_negative=true />
                                        <TableCell>
                                            <StatusBadge status=record.status />
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </Show>
                </TableBody>
            </Table>
        </div>
    }
}
