use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::PayableListContext;
use crate::domain::a001_payable::api;
use crate::domain::a001_payable::export::export_payables;
use crate::shared::components::table::format_brl;
use crate::shared::date_utils::today_local;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;

#[component]
pub fn BatchActionsBar() -> impl IntoView {
    let ctx = use_context::<PayableListContext>().expect("PayableListContext not found");
    let notifications = use_notifications();
    let selection = ctx.selection;
    let page = ctx.records.records;

    let selected_count = Signal::derive(move || selection.state.with(|s| s.len()));
    let select_all_mode = Signal::derive(move || selection.state.with(|s| s.select_all_mode));
    let selected_total = Signal::derive(move || {
        selection
            .state
            .with(|s| page.with(|records| s.selected_total(records)))
    });

    let export_selected = move |_| {
        let records = selection
            .state
            .with_untracked(|s| page.with_untracked(|p| s.selected_records(p)));
        if records.is_empty() {
            notifications.info("Nada para exportar", Some("Nenhuma conta selecionada.".into()));
            return;
        }
        match export_payables(&records, today_local()) {
            Ok(filename) => notifications.success("Exportado", Some(format!("Arquivo {} gerado.", filename))),
            Err(e) => notifications.error("Erro ao exportar", Some(e)),
        }
    };

    let unresolved = Signal::derive(move || {
        selection
            .state
            .with(|s| page.with(|records| s.has_unresolved(records)))
    });

    // Every record of the current filter, not only the loaded page
    let exporting_all = RwSignal::new(false);
    let export_filtered = move |_| {
        if exporting_all.get_untracked() {
            return;
        }
        let filter = ctx.filters.filter.get_untracked();
        exporting_all.set(true);
        spawn_local(async move {
            let today = today_local();
            match api::fetch_all(&filter, today).await {
                Ok(records) if records.is_empty() => {
                    notifications.info("Nada para exportar", Some("Nenhuma conta encontrada.".into()))
                }
                Ok(records) => match export_payables(&records, today) {
                    Ok(filename) => notifications.success("Exportado", Some(format!("Arquivo {} gerado.", filename))),
                    Err(e) => notifications.error("Erro ao exportar", Some(e)),
                },
                Err(e) => notifications.error("Erro ao exportar", Some(e.to_string())),
            }
            exporting_all.set(false);
        });
    };

    let pay_selected = move |_| ctx.open_payment_for_selection();

    view! {
        <div class="batch-actions" class:batch-actions--active={move || selected_count.get() > 0}>
            <Show when=move || select_all_mode.get()>
                <div class="batch-actions__banner">
                    {move || format!("Todas as {} contas estão selecionadas", selected_count.get())}
                </div>
            </Show>
            <div class="batch-actions__row">
                <Show when=move || { selected_count.get() > 0 }>
                    <div class="batch-actions__summary">
                        <span><strong>{move || selected_count.get()}</strong>" itens selecionados"</span>
                        <span>"Total: "<strong>{move || format_brl(selected_total.get())}</strong></span>
                        <Show when=move || unresolved.get()>
                            <span class="batch-actions__hint">
                                "Algumas contas selecionadas não estão carregadas e ficam fora do total."
                            </span>
                        </Show>
                    </div>
                </Show>
                <Flex gap=FlexGap::Small justify=FlexJustify::End>
                    <Show when=move || { selected_count.get() > 0 }>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            size=ButtonSize::Small
                            on_click=move |_| selection.clear()
                        >
                            "Limpar seleção"
                        </Button>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        size=ButtonSize::Small
                        on_click=move |_| page.with_untracked(|p| selection.select_visible(p))
                    >
                        "Selecionar visíveis"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        size=ButtonSize::Small
                        disabled=selection.select_all_loading
                        on_click=move |_| selection.select_all(ctx.filters.filter.get_untracked())
                    >
                        {move || if selection.select_all_loading.get() { "Carregando..." } else { "Selecionar tudo" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        size=ButtonSize::Small
                        disabled=exporting_all
                        on_click=export_filtered
                    >
                        {icon("download")}
                        {move || if exporting_all.get() { " Exportando..." } else { " Exportar filtradas" }}
                    </Button>
                    <Show when=move || { selected_count.get() > 0 }>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            size=ButtonSize::Small
                            on_click=export_selected
                        >
                            {icon("download")}
                            " Exportar selecionadas"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            size=ButtonSize::Small
                            on_click=pay_selected
                        >
                            {icon("check")}
                            " Marcar como paga"
                        </Button>
                    </Show>
                </Flex>
            </div>
        </div>
    }
}
