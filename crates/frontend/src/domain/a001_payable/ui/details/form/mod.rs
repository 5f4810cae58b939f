pub mod model;

use contracts::domain::a001_payable::RecurrenceFrequency;
use contracts::domain::common::{EntityId, LookupOption};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::model::PayableForm;
use crate::domain::a001_payable::api::{self, PayableLookups};
use crate::shared::date_utils::{from_input_value, to_input_value};
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notifications::use_notifications;

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

impl FormMode {
    fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Nova conta a pagar",
            FormMode::Edit(_) => "Editar conta a pagar",
        }
    }
}

/// Single-choice dropdown over one lookup list.
fn lookup_select(
    label: &'static str,
    form: RwSignal<PayableForm>,
    lookups: Signal<PayableLookups>,
    options: fn(&PayableLookups) -> &[LookupOption],
    get: fn(&PayableForm) -> &Option<EntityId>,
    set: fn(&mut PayableForm, Option<EntityId>),
    disabled: Signal<bool>,
) -> impl IntoView {
    let current = Memo::new(move |_| {
        form.with(|f| get(f).as_ref().map(|id| id.as_str().to_string()).unwrap_or_default())
    });

    view! {
        <label class="payable-form__field">
            <span>{label}</span>
            <select
                prop:value=move || current.get()
                prop:disabled=move || disabled.get()
                on:change=move |ev| {
                    let value = EntityId::from_string(&event_target_value(&ev)).ok();
                    form.update(|f| set(f, value));
                }
            >
                <option value="">"Selecione"</option>
                {move || lookups.with(|l| {
                    options(l)
                        .iter()
                        .map(|o| {
                            let value = o.value.as_str().to_string();
                            let selected = current.get() == value;
                            view! { <option value=value selected=selected>{o.label.clone()}</option> }
                        })
                        .collect_view()
                })}
            </select>
        </label>
    }
}

fn text_field(
    label: &'static str,
    form: RwSignal<PayableForm>,
    get: fn(&PayableForm) -> &String,
    set: fn(&mut PayableForm, String),
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <label class="payable-form__field">
            <span>{label}</span>
            <input
                type="text"
                prop:value=move || form.with(|f| get(f).clone())
                prop:disabled=move || disabled.get()
                on:change=move |ev| {
                    let text = event_target_value(&ev);
                    form.update(|f| set(f, text));
                }
            />
        </label>
    }
}

fn date_field(
    label: &'static str,
    form: RwSignal<PayableForm>,
    get: fn(&PayableForm) -> Option<chrono::NaiveDate>,
    set: fn(&mut PayableForm, Option<chrono::NaiveDate>),
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <label class="payable-form__field">
            <span>{label}</span>
            <input
                type="date"
                prop:value=move || form.with(|f| to_input_value(get(f)))
                prop:disabled=move || disabled.get()
                on:change=move |ev| {
                    let date = from_input_value(&event_target_value(&ev));
                    form.update(|f| set(f, date));
                }
            />
        </label>
    }
}

/// Create or edit dialog for one payable.
#[component]
pub fn PayableFormDialog(
    mode: FormMode,
    initial: PayableForm,
    #[prop(into)]
    lookups: Signal<PayableLookups>,
    on_close: Callback<()>,
    /// Called after the server accepted the record
    on_saved: Callback<()>,
) -> impl IntoView {
    let notifications = use_notifications();
    let form = RwSignal::new(initial);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    let disabled = Signal::derive(move || saving.get());
    let title = mode.title();
    let mode = StoredValue::new(mode);

    let submit = move |_| {
        if saving.get_untracked() {
            return;
        }
        let input = match form.with_untracked(PayableForm::to_input) {
            Ok(input) => input,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        saving.set(true);
        let mode = mode.get_value();
        spawn_local(async move {
            let result = match &mode {
                FormMode::Create => api::create(&input).await,
                FormMode::Edit(id) => api::update(id, &input).await,
            };
            saving.set(false);
            match result {
                Ok(()) => {
                    let done = match mode {
                        FormMode::Create => "cadastrada",
                        FormMode::Edit(_) => "atualizada",
                    };
                    notifications.success(&format!("Conta \"{}\" {}", input.descricao, done), None);
                    on_saved.run(());
                    on_close.run(());
                }
                Err(e) => notifications.error("Erro ao salvar conta", Some(e.to_string())),
            }
        });
    };

    let recurring = Signal::derive(move || form.with(|f| f.recurring));
    let frequency = Memo::new(move |_| {
        form.with(|f| f.frequency.map(|fr| fr.as_str()).unwrap_or_default())
    });

    view! {
        <ModalFrame
            title=Signal::derive(move || title.to_string())
            on_close=Callback::new(move |_| {
                if !saving.get_untracked() {
                    on_close.run(());
                }
            })
        >
            <div class="payable-form">
                <div class="payable-form__grid">
                    {lookup_select("Filial *", form, lookups, |l| l.branches.as_slice(), |f| &f.branch, |f, v| f.branch = v, disabled)}
                    {lookup_select("Fornecedor *", form, lookups, |l| l.suppliers.as_slice(), |f| &f.supplier, |f, v| f.supplier = v, disabled)}
                    {lookup_select("Categoria *", form, lookups, |l| l.categories.as_slice(), |f| &f.category, |f, v| f.category = v, disabled)}
                    {lookup_select("Forma de pagamento", form, lookups, |l| l.payment_methods.as_slice(), |f| &f.payment_method, |f, v| f.payment_method = v, disabled)}
                </div>

                <div class="payable-form__grid">
                    {text_field("Descrição *", form, |f| &f.description, |f, v| f.description = v, disabled)}
                    {text_field("Notas fiscais / documento", form, |f| &f.document_number, |f, v| f.document_number = v, disabled)}
                    {text_field("Número do boleto", form, |f| &f.boleto_number, |f, v| f.boleto_number = v, disabled)}
                </div>

                <div class="payable-form__grid">
                    {text_field("Valor original (R$) *", form, |f| &f.original_amount, |f, v| f.original_amount = v, disabled)}
                    {text_field("Desconto (R$)", form, |f| &f.discount, |f, v| f.discount = v, disabled)}
                    {text_field("Juros (R$)", form, |f| &f.interest, |f, v| f.interest = v, disabled)}
                    {text_field("Multa (R$)", form, |f| &f.penalty, |f, v| f.penalty = v, disabled)}
                </div>

                <div class="payable-form__grid">
                    {date_field("Emissão", form, |f| f.issue_date, |f, v| f.issue_date = v, disabled)}
                    {date_field("Vencimento *", form, |f| f.due_date, |f, v| f.due_date = v, disabled)}
                    <label class="payable-form__field payable-form__field--inline">
                        <input
                            type="checkbox"
                            prop:checked=move || recurring.get()
                            prop:disabled=move || disabled.get()
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                form.update(|f| f.recurring = checked);
                            }
                        />
                        <span>"Conta recorrente"</span>
                    </label>
                    <Show when=move || recurring.get()>
                        <label class="payable-form__field">
                            <span>"Frequência *"</span>
                            <select
                                prop:value=move || frequency.get()
                                prop:disabled=move || disabled.get()
                                on:change=move |ev| {
                                    let value = event_target_value(&ev).parse::<RecurrenceFrequency>().ok();
                                    form.update(|f| f.frequency = value);
                                }
                            >
                                <option value="">"Selecione"</option>
                                {RecurrenceFrequency::ALL
                                    .into_iter()
                                    .map(|fr| view! {
                                        <option value=fr.as_str() selected=move || frequency.get() == fr.as_str()>
                                            {fr.label()}
                                        </option>
                                    })
                                    .collect_view()}
                            </select>
                        </label>
                    </Show>
                </div>

                <label class="payable-form__field payable-form__field--wide">
                    <span>"Observações"</span>
                    <textarea
                        rows="3"
                        prop:value=move || form.with(|f| f.notes.clone())
                        prop:disabled=move || disabled.get()
                        on:change=move |ev| {
                            let text = event_target_value(&ev);
                            form.update(|f| f.notes = text);
                        }
                    />
                </label>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="modal__footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=disabled
                        on_click=move |_| on_close.run(())
                    >
                        "Cancelar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=disabled
                        on_click=submit
                    >
                        {move || if saving.get() { "Salvando..." } else { "Salvar" }}
                    </Button>
                </div>
            </div>
        </ModalFrame>
    }
}
