pub mod model;
pub mod saga;

use contracts::domain::a001_payable::{PayableFilter, PayableRecord};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::model::{DialogPhase, DraftField, PaymentDialogState, PaymentDraft};
use self::saga::{run_batch_payment, PaymentStep};
use crate::domain::a001_payable::api;
use crate::shared::components::table::format_brl;
use crate::shared::date_utils::{from_input_value, to_input_value, today_local};
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notifications::NotificationService;

/// Drives the payment dialog: resolves the target records, validates the
/// drafts and runs the payment saga.
#[derive(Clone, Copy)]
pub struct PaymentDialogController {
    pub state: RwSignal<PaymentDialogState>,
    notifications: NotificationService,
}

impl PaymentDialogController {
    pub fn new(notifications: NotificationService) -> Self {
        Self {
            state: RwSignal::new(PaymentDialogState::default()),
            notifications,
        }
    }

    /// Opens for `ids`. Records missing from `known` are looked up in the
    /// full dataset of `filter` while the dialog shows its loading state.
    pub fn open(&self, ids: Vec<EntityId>, known: Vec<PayableRecord>, filter: PayableFilter) {
        if ids.is_empty() {
            return;
        }
        let this = *self;
        let resolved = ids.iter().all(|id| known.iter().any(|r| &r.id == id));
        this.state.update(|s| s.open_loading(ids));

        if resolved {
            this.seed(&known);
            return;
        }

        spawn_local(async move {
            match api::fetch_all(&filter, today_local()).await {
                Ok(all) => this.seed(&all),
                Err(e) => {
                    this.notifications
                        .error("Erro ao carregar contas selecionadas", Some(e.to_string()));
                    this.close();
                }
            }
        });
    }

    fn seed(&self, records: &[PayableRecord]) {
        let mut missing = Vec::new();
        self.state
            .update(|s| missing = s.seed(records, today_local()));
        if !missing.is_empty() {
            log::warn!("payables: {} selected records no longer available", missing.len());
            self.notifications.info(
                "Algumas contas não foram encontradas",
                Some(format!("{} conta(s) ignorada(s)", missing.len())),
            );
        }
        if self.state.with_untracked(|s| s.drafts.is_empty()) {
            self.close();
        }
    }

    pub fn close(&self) {
        self.state.update(PaymentDialogState::close);
    }

    /// Validates and pays every draft in order. `on_finished` receives the
    /// ids whose payment failed, empty when all went through.
    pub fn submit(&self, on_finished: Callback<Vec<EntityId>>) {
        let mut validated = None;
        self.state.update(|s| validated = Some(s.begin_submit()));
        let steps: Vec<PaymentStep> = match validated {
            Some(Ok(requests)) if !requests.is_empty() => {
                requests.into_iter().map(PaymentStep::from).collect()
            }
            Some(Err(e)) => {
                self.notifications.error(
                    "Por favor, preencha todos os campos com valores válidos.",
                    Some(e.to_string()),
                );
                return;
            }
            _ => return,
        };

        let this = *self;
        let notifications = self.notifications;
        spawn_local(async move {
            log::info!("payables: paying {} records", steps.len());
            let report = run_batch_payment(
                steps,
                |id, request| async move { api::pay(&id, &request).await },
                |_, outcome| match &outcome.result {
                    Ok(()) => notifications.success(
                        &format!("Conta \"{}\" marcada como paga", outcome.step.description),
                        Some(format!("Valor: {}", format_brl(outcome.step.request.valor_pago))),
                    ),
                    Err(e) => notifications.error(
                        "Erro ao registrar pagamento",
                        Some(format!("{}: {}", outcome.step.description, e)),
                    ),
                },
            )
            .await;

            let failed = report.failed_ids();
            log::info!(
                "payables: batch paid {:.2} over {} records",
                report.paid_total(),
                report.succeeded().count()
            );
            if !report.all_succeeded() {
                log::warn!("payables: {} of {} payments failed", failed.len(), report.outcomes.len());
            }
            this.state.update(|s| s.finish_submit(&failed));
            on_finished.run(failed);
        });
    }
}

fn input_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{:.2}", value)
    }
}

#[component]
fn DraftCard(draft: PaymentDraft, controller: PaymentDialogController) -> impl IntoView {
    let state = controller.state;
    let id = StoredValue::new(draft.id.clone());
    let total = Signal::derive(move || {
        state.with(|s| {
            id.with_value(|id| s.drafts.iter().find(|d| &d.id == id).map(PaymentDraft::total))
                .unwrap_or_default()
        })
    });
    let disabled = Signal::derive(move || state.with(|s| s.phase == DialogPhase::Submitting));

    let number_input = move |field: DraftField, initial: f64| {
        view! {
            <label class="payment-draft__field">
                <span>{format!("{} (R$)", field.label())}</span>
                <input
                    type="number"
                    step="0.01"
                    min="0"
                    placeholder="0,00"
                    prop:value=input_value(initial)
                    prop:disabled=move || disabled.get()
                    on:change=move |ev| {
                        let text = event_target_value(&ev);
                        id.with_value(|id| state.update(|s| s.edit(id, field, &text)));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="payment-draft">
            <div class="payment-draft__header">
                <h4 class="payment-draft__title">{draft.description.clone()}</h4>
                <span class="payment-draft__meta">{draft.supplier_name.clone()}</span>
                <span class="payment-draft__meta">"Filial: " {draft.branch_name.clone()}</span>
            </div>
            <div class="payment-draft__grid">
                {number_input(DraftField::Amount, draft.amount)}
                {number_input(DraftField::Penalty, draft.penalty)}
                {number_input(DraftField::Interest, draft.interest)}
                <label class="payment-draft__field">
                    <span>"Data do pagamento"</span>
                    <input
                        type="date"
                        prop:value=to_input_value(draft.date)
                        prop:disabled=move || disabled.get()
                        on:change=move |ev| {
                            let date = from_input_value(&event_target_value(&ev));
                            id.with_value(|id| state.update(|s| s.set_date(id, date)));
                        }
                    />
                </label>
            </div>
            <div class="payment-draft__summary">
                <span>"Valor original: " {format_brl(draft.original_amount)}</span>
                <strong>"Total a pagar: " {move || format_brl(total.get())}</strong>
            </div>
        </div>
    }
}

#[component]
pub fn PaymentDialog(
    controller: PaymentDialogController,
    /// Called after a submission with the ids whose payment failed
    on_finished: Callback<Vec<EntityId>>,
) -> impl IntoView {
    let state = controller.state;
    let phase = Signal::derive(move || state.with(|s| s.phase));
    let count = Signal::derive(move || state.with(|s| s.target_ids.len()));

    view! {
        <Show when=move || phase.get() != DialogPhase::Closed>
            <ModalFrame
                title=Signal::derive(|| "Registrar pagamento".to_string())
                on_close=Callback::new(move |_| {
                    if phase.get_untracked() != DialogPhase::Submitting {
                        controller.close();
                    }
                })
            >
                <p class="modal__description">
                    {move || if count.get() == 1 {
                        "Preencha os dados do pagamento para a conta selecionada.".to_string()
                    } else {
                        format!("Pagamento em lote de {} contas. Preencha os dados de cada conta individualmente.", count.get())
                    }}
                </p>

                <Show
                    when=move || phase.get() != DialogPhase::Loading
                    fallback=|| view! {
                        <div class="modal__loading">
                            <Spinner label="Carregando dados..." />
                        </div>
                    }
                >
                    <div class="payment-dialog__drafts" class:payment-dialog__drafts--grid={move || count.get() > 1}>
                        <For
                            each=move || state.with(|s| s.drafts.clone())
                            key=|draft| draft.id.clone()
                            children=move |draft| view! { <DraftCard draft=draft controller=controller /> }
                        />
                    </div>
                </Show>

                {move || state.with(|s| s.validation_error.clone()).map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <Show when=move || { count.get() > 1 }>
                    <div class="payment-dialog__grand-total">
                        <span>{move || format!("Total de {} conta(s) selecionada(s)", count.get())}</span>
                        <strong>{move || format_brl(state.with(|s| s.grand_total()))}</strong>
                    </div>
                </Show>

                <div class="modal__footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| controller.close()
                        disabled=Signal::derive(move || phase.get() == DialogPhase::Submitting)
                    >
                        "Cancelar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| controller.submit(on_finished)
                        disabled=Signal::derive(move || phase.get() != DialogPhase::Ready)
                    >
                        {move || if phase.get() == DialogPhase::Submitting {
                            "Processando..."
                        } else {
                            "Confirmar pagamento"
                        }}
                    </Button>
                </div>
            </ModalFrame>
        </Show>
    }
}
