use chrono::NaiveDate;
use contracts::domain::a001_payable::{PayableInput, PayableRecord, RecurrenceFrequency};
use contracts::domain::common::{EntityId, LookupOption};
use thiserror::Error;

use crate::domain::a001_payable::ui::payment_dialog::model::parse_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Branch,
    Supplier,
    Category,
    Description,
    OriginalAmount,
    Discount,
    Interest,
    Penalty,
    DueDate,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Branch => "Filial",
            FormField::Supplier => "Fornecedor",
            FormField::Category => "Categoria",
            FormField::Description => "Descrição",
            FormField::OriginalAmount => "Valor original",
            FormField::Discount => "Desconto",
            FormField::Interest => "Juros",
            FormField::Penalty => "Multa",
            FormField::DueDate => "Vencimento",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{}: campo obrigatório", .0.label())]
    Required(FormField),
    #[error("{}: valor inválido", .0.label())]
    NotANumber(FormField),
    #[error("Valor deve ser maior que zero")]
    NonPositiveAmount,
    #[error("{} não pode ser negativo", .0.label())]
    Negative(FormField),
    #[error("A data de emissão não pode ser posterior ao vencimento")]
    IssueAfterDue,
    #[error("Informe a frequência da recorrência")]
    MissingFrequency,
}

/// Create/edit form contents. Amounts stay as typed until validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayableForm {
    pub branch: Option<EntityId>,
    pub supplier: Option<EntityId>,
    pub category: Option<EntityId>,
    pub payment_method: Option<EntityId>,
    pub description: String,
    pub document_number: String,
    pub boleto_number: String,
    pub original_amount: String,
    pub discount: String,
    pub interest: String,
    pub penalty: String,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
    pub recurring: bool,
    pub frequency: Option<RecurrenceFrequency>,
}

fn amount_text(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        format!("{:.2}", value)
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Blank means zero for the adjustment fields.
fn adjustment(field: FormField, text: &str) -> Result<f64, FormError> {
    if text.trim().is_empty() {
        return Ok(0.0);
    }
    let value = parse_amount(text);
    if !value.is_finite() {
        return Err(FormError::NotANumber(field));
    }
    if value < 0.0 {
        return Err(FormError::Negative(field));
    }
    Ok(value)
}

impl PayableForm {
    /// Prefills from an existing record. Records only carry the payment
    /// method name, so the id is looked up among `payment_methods`.
    pub fn from_record(record: &PayableRecord, payment_methods: &[LookupOption]) -> Self {
        let payment_method = record.payment_method_name.as_deref().and_then(|name| {
            payment_methods
                .iter()
                .find(|o| o.label.trim().eq_ignore_ascii_case(name.trim()))
                .map(|o| o.value.clone())
        });
        Self {
            branch: record.branch.id.clone(),
            supplier: record.supplier.id.clone(),
            category: record.category.id.clone(),
            payment_method,
            description: record.description.clone(),
            document_number: record.document_number.clone().unwrap_or_default(),
            boleto_number: String::new(),
            original_amount: format!("{:.2}", record.original_amount),
            discount: amount_text(record.discount),
            interest: amount_text(record.interest),
            penalty: amount_text(record.penalty),
            issue_date: record.issue_date,
            due_date: Some(record.due_date),
            notes: record.notes.clone().unwrap_or_default(),
            recurring: record.recurrence.is_some(),
            frequency: record.recurrence,
        }
    }

    /// Checks the fields in display order and builds the request body.
    pub fn to_input(&self) -> Result<PayableInput, FormError> {
        let required = |value: &Option<EntityId>, field| value.clone().ok_or(FormError::Required(field));
        let filial = required(&self.branch, FormField::Branch)?;
        let fornecedor = required(&self.supplier, FormField::Supplier)?;
        let categoria = required(&self.category, FormField::Category)?;
        let descricao =
            non_blank(&self.description).ok_or(FormError::Required(FormField::Description))?;

        if self.original_amount.trim().is_empty() {
            return Err(FormError::Required(FormField::OriginalAmount));
        }
        let valor_original = parse_amount(&self.original_amount);
        if !valor_original.is_finite() {
            return Err(FormError::NotANumber(FormField::OriginalAmount));
        }
        if valor_original <= 0.0 {
            return Err(FormError::NonPositiveAmount);
        }
        let desconto = adjustment(FormField::Discount, &self.discount)?;
        let juros = adjustment(FormField::Interest, &self.interest)?;
        let multa = adjustment(FormField::Penalty, &self.penalty)?;

        let data_vencimento = self.due_date.ok_or(FormError::Required(FormField::DueDate))?;
        if matches!(self.issue_date, Some(issued) if issued > data_vencimento) {
            return Err(FormError::IssueAfterDue);
        }
        let frequencia_recorrencia = if self.recurring {
            Some(self.frequency.ok_or(FormError::MissingFrequency)?)
        } else {
            None
        };

        Ok(PayableInput {
            filial,
            fornecedor,
            categoria,
            forma_pagamento: self.payment_method.clone(),
            descricao,
            numero_documento: non_blank(&self.document_number),
            numero_boleto: non_blank(&self.boleto_number),
            valor_original,
            desconto,
            juros,
            multa,
            data_emissao: self.issue_date,
            data_vencimento,
            observacoes: non_blank(&self.notes),
            e_recorrente: self.recurring,
            frequencia_recorrencia,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_payable::PayableStatus;
    use contracts::domain::common::EntityRef;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn filled() -> PayableForm {
        PayableForm {
            branch: Some(EntityId::from("1")),
            supplier: Some(EntityId::from("2")),
            category: Some(EntityId::from("3")),
            description: "  Aluguel julho ".into(),
            original_amount: "1.500,00".into(),
            due_date: Some(date(7, 10)),
            ..Default::default()
        }
    }

    #[test]
    fn test_filled_form_builds_input() {
        let input = filled().to_input().unwrap();
        assert_eq!(input.descricao, "Aluguel julho");
        assert_eq!(input.valor_original, 1500.0);
        assert_eq!(input.desconto, 0.0);
        assert_eq!(input.numero_documento, None);
        assert_eq!(input.frequencia_recorrencia, None);
        assert!(!input.e_recorrente);
    }

    #[test]
    fn test_required_fields_in_display_order() {
        assert_eq!(
            PayableForm::default().to_input(),
            Err(FormError::Required(FormField::Branch))
        );
        let mut form = filled();
        form.category = None;
        form.description = "   ".into();
        assert_eq!(form.to_input(), Err(FormError::Required(FormField::Category)));
        form.category = Some(EntityId::from("3"));
        assert_eq!(form.to_input(), Err(FormError::Required(FormField::Description)));
    }

    #[test]
    fn test_amount_rules() {
        let mut form = filled();
        form.original_amount = "0".into();
        assert_eq!(form.to_input(), Err(FormError::NonPositiveAmount));
        form.original_amount = "abc".into();
        assert_eq!(
            form.to_input(),
            Err(FormError::NotANumber(FormField::OriginalAmount))
        );
        form.original_amount = "100".into();
        form.penalty = "-1".into();
        assert_eq!(form.to_input(), Err(FormError::Negative(FormField::Penalty)));
        form.penalty = "2,50".into();
        assert_eq!(form.to_input().unwrap().multa, 2.5);
    }

    #[test]
    fn test_issue_date_after_due_is_rejected() {
        let mut form = filled();
        form.issue_date = Some(date(7, 11));
        assert_eq!(form.to_input(), Err(FormError::IssueAfterDue));
        form.issue_date = Some(date(7, 10));
        assert!(form.to_input().is_ok());
    }

    #[test]
    fn test_recurrence_needs_frequency() {
        let mut form = filled();
        form.recurring = true;
        assert_eq!(form.to_input(), Err(FormError::MissingFrequency));

        form.frequency = Some(RecurrenceFrequency::Mensal);
        assert_eq!(
            form.to_input().unwrap().frequencia_recorrencia,
            Some(RecurrenceFrequency::Mensal)
        );

        // a leftover frequency is not sent once recurrence is off
        form.recurring = false;
        assert_eq!(form.to_input().unwrap().frequencia_recorrencia, None);
    }

    #[test]
    fn test_edit_prefill_keeps_record_values() {
        let record = PayableRecord {
            id: EntityId::from("9"),
            description: "Energia".into(),
            document_number: Some("NF-77".into()),
            supplier: EntityRef { id: Some(EntityId::from("2")), name: Some("CPFL".into()) },
            branch: EntityRef { id: Some(EntityId::from("1")), name: Some("Centro".into()) },
            category: EntityRef { id: Some(EntityId::from("3")), name: None },
            payment_method_name: Some("Pix".into()),
            original_amount: 320.0,
            discount: 0.0,
            interest: 1.5,
            penalty: 0.0,
            amount_paid: 0.0,
            issue_date: Some(date(6, 1)),
            due_date: date(6, 20),
            payment_date: None,
            status: PayableStatus::Pending,
            notes: None,
            recurrence: Some(RecurrenceFrequency::Mensal),
        };
        let methods = vec![
            LookupOption::new(EntityId::from("4"), "BOLETO"),
            LookupOption::new(EntityId::from("5"), "PIX"),
        ];
        let form = PayableForm::from_record(&record, &methods);
        assert_eq!(form.payment_method, Some(EntityId::from("5")));
        assert_eq!(form.discount, "");
        assert!(form.recurring);

        let input = form.to_input().unwrap();
        assert_eq!(input.filial, EntityId::from("1"));
        assert_eq!(input.valor_original, 320.0);
        assert_eq!(input.juros, 1.5);
        assert_eq!(input.numero_documento.as_deref(), Some("NF-77"));
        assert_eq!(input.data_emissao, Some(date(6, 1)));
    }

    #[test]
    fn test_unknown_payment_method_name_is_left_empty() {
        let record = PayableRecord {
            id: EntityId::from("9"),
            description: "x".into(),
            document_number: None,
            supplier: Default::default(),
            branch: Default::default(),
            category: Default::default(),
            payment_method_name: Some("Cheque".into()),
            original_amount: 10.0,
            discount: 0.0,
            interest: 0.0,
            penalty: 0.0,
            amount_paid: 0.0,
            issue_date: None,
            due_date: date(6, 20),
            payment_date: None,
            status: PayableStatus::Pending,
            notes: None,
            recurrence: None,
        };
        let form = PayableForm::from_record(&record, &[]);
        assert_eq!(form.payment_method, None);
        assert_eq!(form.to_input(), Err(FormError::Required(FormField::Branch)));
    }
}
