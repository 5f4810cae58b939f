pub mod form;

use contracts::domain::a001_payable::PayableRecord;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::list::table::StatusBadge;
use crate::domain::a001_payable::api;
use crate::shared::components::table::format_brl;
use crate::shared::date_utils::{format_date, format_date_opt, today_local};
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notifications::use_notifications;

fn field_row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="details__row">
            <span class="details__label">{label}</span>
            <span class="details__value">{value}</span>
        </div>
    }
}

/// Side drawer with every field of one payable.
#[component]
pub fn PayableDetails(
    record: PayableRecord,
    on_close: Callback<()>,
    /// Opens the payment dialog for this record
    on_pay: Callback<PayableRecord>,
    /// Opens the edit form for this record
    on_edit: Callback<PayableRecord>,
    /// Called after a successful cancellation
    on_changed: Callback<()>,
) -> impl IntoView {
    let notifications = use_notifications();
    let cancelling = RwSignal::new(false);
    let settled = record.status.is_settled();
    let overdue = record.is_overdue(today_local());

    let cancel = {
        let id = record.id.clone();
        let description = record.description.clone();
        move |_| {
            if cancelling.get_untracked() {
                return;
            }
            let id = id.clone();
            let description = description.clone();
            cancelling.set(true);
            spawn_local(async move {
                match api::cancel(&id).await {
                    Ok(()) => {
                        notifications.success(&format!("Conta \"{}\" cancelada", description), None);
                        on_changed.run(());
                        on_close.run(());
                    }
                    Err(e) => notifications.error("Erro ao cancelar conta", Some(e.to_string())),
                }
                cancelling.set(false);
            });
        }
    };

    let pay_record = record.clone();
    let edit_record = record.clone();
    let title = record.description.clone();
    let recurrence = record
        .recurrence
        .map(|f| f.label().to_string())
        .unwrap_or_else(|| "Não".to_string());

    view! {
        <ModalFrame
            title=Signal::derive(move || title.clone())
            on_close=on_close
            drawer=true
        >
            <div class="details">
                <div class="details__status">
                    <StatusBadge status=record.status />
                    {overdue.then(|| view! { <span class="details__overdue">"Vencida"</span> })}
                </div>

                <h3 class="details__section">"Informações básicas"</h3>
                {field_row("Descrição", record.description.clone())}
                {field_row("Documento", record.document_number.clone().unwrap_or_else(|| "-".into()))}
                {field_row("Fornecedor", record.supplier.display_name().to_string())}
                {field_row("Filial", record.branch.display_name().to_string())}
                {field_row("Categoria", record.category.display_name().to_string())}
                {field_row("Forma de pagamento", record.payment_method_name.clone().unwrap_or_else(|| "-".into()))}
                {field_row("Recorrente", recurrence)}

                <h3 class="details__section">"Datas"</h3>
                {field_row("Emissão", format_date_opt(record.issue_date))}
                {field_row("Vencimento", format_date(record.due_date))}
                {field_row("Pagamento", format_date_opt(record.payment_date))}

                <h3 class="details__section">"Valores"</h3>
                {field_row("Valor original", format_brl(record.original_amount))}
                {field_row("Desconto", format_brl(record.discount))}
                {field_row("Juros", format_brl(record.interest))}
                {field_row("Multa", format_brl(record.penalty))}
                {field_row("Valor final", format_brl(record.final_amount()))}
                {field_row("Valor pago", format_brl(record.amount_paid))}
                {field_row("Valor restante", format_brl(record.remaining_amount()))}

                {record.notes.clone().filter(|n| !n.trim().is_empty()).map(|notes| view! {
                    <h3 class="details__section">"Observações"</h3>
                    <p class="details__notes">{notes}</p>
                })}

                <div class="details__actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=settled
                        on_click=move |_| on_pay.run(pay_record.clone())
                    >
                        {crate::shared::icons::icon("check")}
                        " Registrar pagamento"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=settled
                        on_click=move |_| on_edit.run(edit_record.clone())
                    >
                        {crate::shared::icons::icon("edit")}
                        " Editar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || settled || cancelling.get())
                        on_click=cancel
                    >
                        {move || if cancelling.get() { "Cancelando..." } else { "Cancelar conta" }}
                    </Button>
                </div>
            </div>
        </ModalFrame>
    }
}
