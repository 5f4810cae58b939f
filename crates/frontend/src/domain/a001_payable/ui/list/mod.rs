pub mod batch_actions;
pub mod filter_panel;
pub mod filters;
pub mod records;
pub mod selection;
pub mod stats;
pub mod table;

use contracts::domain::a001_payable::{PayableFilter, PayableRecord};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use thaw::*;

use self::batch_actions::BatchActionsBar;
use self::filter_panel::PayableFilterPanel;
use self::filters::{use_payable_filters, PayableFilters};
use self::records::{use_payable_records, PayableRecords};
use self::selection::SelectionCoordinator;
use self::stats::{use_payable_stats, PayableStatsCards, PayableStatsHook};
use self::table::PayableTable;
use super::details::form::model::PayableForm;
use super::details::form::{FormMode, PayableFormDialog};
use super::details::PayableDetails;
use super::payment_dialog::{PaymentDialog, PaymentDialogController};
use crate::shared::date_utils::today_local;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

/// Everything the list page children share.
#[derive(Clone, Copy)]
pub struct PayableListContext {
    pub filters: PayableFilters,
    pub records: PayableRecords,
    pub selection: SelectionCoordinator,
    pub stats: PayableStatsHook,
    pub dialog: PaymentDialogController,
}

impl PayableListContext {
    /// Applies a filter change. The result set is a different one, so the
    /// page goes back to 1 and the selection is dropped.
    pub fn update_filter(&self, f: impl FnOnce(&mut PayableFilter)) {
        self.filters.filter.update(f);
        self.records.page.set(1);
        self.selection.clear();
    }

    pub fn refresh(&self) {
        self.records.refetch();
        self.stats.refetch();
    }

    pub fn open_payment_for_selection(&self) {
        let (ids, known) = self.selection.state.with_untracked(|s| {
            let known = self.records.records.with_untracked(|p| s.selected_records(p));
            (s.selected.iter().cloned().collect::<Vec<_>>(), known)
        });
        self.dialog
            .open(ids, known, self.filters.filter.get_untracked());
    }

    pub fn open_payment_for(&self, record: PayableRecord) {
        self.dialog.open(
            vec![record.id.clone()],
            vec![record],
            self.filters.filter.get_untracked(),
        );
    }
}

#[component]
pub fn PayableList() -> impl IntoView {
    let notifications = use_notifications();
    let filters = use_payable_filters();
    let records = use_payable_records(filters.filter.into(), notifications);
    let ctx = PayableListContext {
        filters,
        records,
        selection: SelectionCoordinator::new(notifications),
        stats: use_payable_stats(),
        dialog: PaymentDialogController::new(notifications),
    };
    provide_context(ctx);

    let selection = ctx.selection;
    let details = RwSignal::new(Option::<PayableRecord>::None);
    let today = Signal::derive(today_local);

    let header_state = Signal::derive(move || {
        selection
            .state
            .with(|s| records.records.with(|page| s.check_state(page)))
    });

    let editing = RwSignal::new(Option::<(FormMode, PayableForm)>::None);
    let lookups = records.lookups;

    let on_payment_finished = Callback::new(move |failed: Vec<EntityId>| {
        ctx.refresh();
        selection.keep_failed(&failed);
    });

    view! {
        <PageFrame page_id="a001_payable--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Contas a pagar"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| editing.set(Some((FormMode::Create, PayableForm::default())))
                    >
                        {icon("plus")}
                        " Nova conta"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| ctx.refresh()
                        disabled=records.loading
                    >
                        {icon("refresh")}
                        {move || if records.loading.get() { " Atualizando..." } else { " Atualizar" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <PayableStatsCards hook=ctx.stats />
                <PayableFilterPanel />
                <BatchActionsBar />
                <PayableTable
                    records=records.records
                    is_selected=Callback::new(move |id: EntityId| selection.state.with(|s| s.contains(&id)))
                    header_state=header_state
                    on_toggle=Callback::new(move |id: EntityId| selection.toggle(&id))
                    on_header_toggle=Callback::new(move |checked: bool| {
                        if checked {
                            records.records.with_untracked(|page| selection.select_visible(page));
                        } else {
                            selection.clear();
                        }
                    })
                    on_open=Callback::new(move |record: PayableRecord| details.set(Some(record)))
                    today=today
                    loading=records.loading
                />
            </div>

            <PaymentDialog controller=ctx.dialog on_finished=on_payment_finished />

            {move || details.get().map(|record| view! {
                <PayableDetails
                    record=record
                    on_close=Callback::new(move |_| details.set(None))
                    on_pay=Callback::new(move |record: PayableRecord| {
                        details.set(None);
                        ctx.open_payment_for(record);
                    })
                    on_edit=Callback::new(move |record: PayableRecord| {
                        details.set(None);
                        let form = lookups.with_untracked(|l| PayableForm::from_record(&record, &l.payment_methods));
                        editing.set(Some((FormMode::Edit(record.id.clone()), form)));
                    })
                    on_changed=Callback::new(move |_| ctx.refresh())
                />
            })}

            {move || editing.get().map(|(mode, initial)| view! {
                <PayableFormDialog
                    mode=mode
                    initial=initial
                    lookups=lookups
                    on_close=Callback::new(move |_| editing.set(None))
                    on_saved=Callback::new(move |_| ctx.refresh())
                />
            })}
        </PageFrame>
    }
}
