use contracts::domain::a001_payable::{DateRange, PayableFilter, PayableStatus};
use contracts::domain::common::{EntityId, LookupOption};
use leptos::prelude::*;
use std::collections::BTreeSet;
use std::str::FromStr;

use super::PayableListContext;
use crate::domain::a001_payable::api::PayableLookups;
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::multi_select::MultiSelect;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::list_utils::SearchInput;

fn option_pairs(options: &[LookupOption]) -> Vec<(String, String)> {
    options
        .iter()
        .map(|o| (o.value.to_string(), o.label.clone()))
        .collect()
}

fn id_strings(ids: &BTreeSet<EntityId>) -> BTreeSet<String> {
    ids.iter().map(EntityId::to_string).collect()
}

fn to_ids(values: BTreeSet<String>) -> BTreeSet<EntityId> {
    values
        .iter()
        .filter_map(|v| EntityId::from_string(v).ok())
        .collect()
}

/// Multi-select over one id dimension of the filter.
fn id_dimension(
    ctx: PayableListContext,
    label: &'static str,
    options: fn(&PayableLookups) -> &[LookupOption],
    get: fn(&PayableFilter) -> &BTreeSet<EntityId>,
    set: fn(&mut PayableFilter, BTreeSet<EntityId>),
) -> impl IntoView {
    let lookups = ctx.records.lookups;
    let filter = ctx.filters.filter;
    view! {
        <MultiSelect
            label=label
            options=Signal::derive(move || lookups.with(|l| option_pairs(options(l))))
            selected=Signal::derive(move || filter.with(|f| id_strings(get(f))))
            on_change=Callback::new(move |values: BTreeSet<String>| {
                let ids = to_ids(values);
                ctx.update_filter(move |f| set(f, ids));
            })
        />
    }
}

fn date_dimension(
    ctx: PayableListContext,
    label: &'static str,
    get: fn(&PayableFilter) -> Option<DateRange>,
    set: fn(&mut PayableFilter, Option<DateRange>),
) -> impl IntoView {
    let filter = ctx.filters.filter;
    view! {
        <DateRangePicker
            label=label
            value=Signal::derive(move || filter.with(get))
            on_change=Callback::new(move |range| ctx.update_filter(move |f| set(f, range)))
        />
    }
}

#[component]
pub fn PayableFilterPanel() -> impl IntoView {
    let ctx = use_context::<PayableListContext>().expect("PayableListContext not found");
    let filter = ctx.filters.filter;
    let records = ctx.records;
    let is_expanded = RwSignal::new(false);

    // the search term counts as one more active filter
    let active_count = Signal::derive(move || {
        filter.with(|f| f.active_count() + usize::from(!f.search.trim().is_empty()))
    });

    let status_options: Vec<(String, String)> = PayableStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect();

    view! {
        <div class="payables-toolbar">
            <SearchInput
                value=Signal::derive(move || filter.with(|f| f.search.clone()))
                on_change=Callback::new(move |term: String| ctx.update_filter(move |f| f.search = term))
                placeholder="Buscar por descrição, documento ou fornecedor..."
            />
        </div>
        <FilterPanel
            is_expanded=is_expanded
            active_filters_count=active_count
            on_clear=Callback::new(move |_| ctx.update_filter(PayableFilter::clear))
            pagination_controls=move || view! {
                <PaginationControls
                    current_page=records.page
                    total_pages=records.total_pages
                    total_count=records.total_count
                    on_page_change=Callback::new(move |page| records.set_page(page))
                    disabled=records.loading
                />
            }
            filter_content=move || {
                let status_options = status_options.clone();
                view! {
                    <div class="filter-panel__grid">
                        <MultiSelect
                            label="Status"
                            options=Signal::derive(move || status_options.clone())
                            selected=Signal::derive(move || {
                                filter.with(|f| f.status.iter().map(|s| s.as_str().to_string()).collect())
                            })
                            on_change=Callback::new(move |values: BTreeSet<String>| {
                                let status: BTreeSet<PayableStatus> = values
                                    .iter()
                                    .filter_map(|v| PayableStatus::from_str(v).ok())
                                    .collect();
                                ctx.update_filter(move |f| f.status = status);
                            })
                        />
                        {id_dimension(ctx, "Filial", |l| l.branches.as_slice(), |f| &f.branch, |f, ids| f.branch = ids)}
                        {id_dimension(ctx, "Categoria", |l| l.categories.as_slice(), |f| &f.category, |f, ids| f.category = ids)}
                        {id_dimension(ctx, "Fornecedor", |l| l.suppliers.as_slice(), |f| &f.supplier, |f, ids| f.supplier = ids)}
                        {date_dimension(ctx, "Vencimento", |f| f.due, |f, r| f.due = r)}
                        {date_dimension(ctx, "Pagamento", |f| f.paid, |f, r| f.paid = r)}
                        {date_dimension(ctx, "Movimentação", |f| f.movement, |f, r| f.movement = r)}
                    </div>
                }
            }
        />
    }
}
