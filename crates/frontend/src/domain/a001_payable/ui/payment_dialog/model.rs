use chrono::NaiveDate;
use contracts::domain::a001_payable::{PayRequest, PayableRecord};
use contracts::domain::common::EntityId;
use thiserror::Error;

/// Lenient numeric input: blank or non-numeric text becomes NaN, which
/// validation rejects later. Accepts `1234.5` and `1.234,50`.
pub fn parse_amount(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };
    normalized.parse().unwrap_or(f64::NAN)
}

fn or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Amount,
    Penalty,
    Interest,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Amount => "Valor",
            DraftField::Penalty => "Multa",
            DraftField::Interest => "Juros",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("{description}: {} inválido", .field.label())]
    NotANumber { description: String, field: DraftField },
    #[error("{description}: o valor deve ser maior que zero")]
    NonPositiveAmount { description: String },
    #[error("{description}: {} não pode ser negativo", .field.label())]
    Negative { description: String, field: DraftField },
    #[error("{description}: informe a data do pagamento")]
    MissingDate { description: String },
}

/// One row of the payment dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDraft {
    pub id: EntityId,
    pub description: String,
    pub supplier_name: String,
    pub branch_name: String,
    pub original_amount: f64,
    pub amount: f64,
    pub penalty: f64,
    pub interest: f64,
    pub date: Option<NaiveDate>,
}

impl PaymentDraft {
    pub fn from_record(record: &PayableRecord, today: NaiveDate) -> Self {
        Self {
            id: record.id.clone(),
            description: record.description.clone(),
            supplier_name: record.supplier.display_name().to_string(),
            branch_name: record.branch.display_name().to_string(),
            original_amount: record.original_amount,
            amount: record.remaining_amount(),
            penalty: record.penalty,
            interest: record.interest,
            date: Some(today),
        }
    }

    pub fn set(&mut self, field: DraftField, input: &str) {
        let value = parse_amount(input);
        match field {
            DraftField::Amount => self.amount = value,
            DraftField::Penalty => self.penalty = value,
            DraftField::Interest => self.interest = value,
        }
    }

    /// amount + penalty + interest; unparsable fields count as zero here.
    pub fn total(&self) -> f64 {
        or_zero(self.amount) + or_zero(self.penalty) + or_zero(self.interest)
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        let description = || self.description.clone();
        for (field, value) in [
            (DraftField::Amount, self.amount),
            (DraftField::Penalty, self.penalty),
            (DraftField::Interest, self.interest),
        ] {
            if !value.is_finite() {
                return Err(DraftError::NotANumber {
                    description: description(),
                    field,
                });
            }
        }
        if self.amount <= 0.0 {
            return Err(DraftError::NonPositiveAmount {
                description: description(),
            });
        }
        for (field, value) in [
            (DraftField::Penalty, self.penalty),
            (DraftField::Interest, self.interest),
        ] {
            if value < 0.0 {
                return Err(DraftError::Negative {
                    description: description(),
                    field,
                });
            }
        }
        if self.date.is_none() {
            return Err(DraftError::MissingDate {
                description: description(),
            });
        }
        Ok(())
    }

    /// `valor_pago` carries the row total.
    pub fn to_request(&self) -> Result<PayRequest, DraftError> {
        self.validate()?;
        let data_pagamento = self.date.ok_or_else(|| DraftError::MissingDate {
            description: self.description.clone(),
        })?;
        Ok(PayRequest {
            valor_pago: self.total(),
            data_pagamento,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Closed,
    /// Target records are still being resolved
    Loading,
    Ready,
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDialogState {
    pub phase: DialogPhase,
    pub target_ids: Vec<EntityId>,
    pub drafts: Vec<PaymentDraft>,
    pub validation_error: Option<String>,
}

impl Default for PaymentDialogState {
    fn default() -> Self {
        Self {
            phase: DialogPhase::Closed,
            target_ids: Vec::new(),
            drafts: Vec::new(),
            validation_error: None,
        }
    }
}

impl PaymentDialogState {
    pub fn is_open(&self) -> bool {
        self.phase != DialogPhase::Closed
    }

    pub fn open_loading(&mut self, ids: Vec<EntityId>) {
        *self = Self {
            phase: DialogPhase::Loading,
            target_ids: ids,
            ..Self::default()
        };
    }

    /// One fresh draft per target id found in `records`, in target order.
    /// Returns the ids that could not be resolved.
    pub fn seed(&mut self, records: &[PayableRecord], today: NaiveDate) -> Vec<EntityId> {
        let mut missing = Vec::new();
        self.drafts = self
            .target_ids
            .iter()
            .filter_map(|id| match records.iter().find(|r| &r.id == id) {
                Some(record) => Some(PaymentDraft::from_record(record, today)),
                None => {
                    missing.push(id.clone());
                    None
                }
            })
            .collect();
        self.target_ids = self.drafts.iter().map(|d| d.id.clone()).collect();
        self.phase = DialogPhase::Ready;
        missing
    }

    pub fn edit(&mut self, id: &EntityId, field: DraftField, input: &str) {
        if let Some(draft) = self.drafts.iter_mut().find(|d| &d.id == id) {
            draft.set(field, input);
        }
    }

    pub fn set_date(&mut self, id: &EntityId, date: Option<NaiveDate>) {
        if let Some(draft) = self.drafts.iter_mut().find(|d| &d.id == id) {
            draft.date = date;
        }
    }

    pub fn grand_total(&self) -> f64 {
        self.drafts.iter().map(PaymentDraft::total).sum()
    }

    /// Moves to `Submitting` when every draft is valid. Otherwise stays in
    /// `Ready` with the first error recorded and nothing to send.
    pub fn begin_submit(&mut self) -> Result<Vec<(PaymentDraft, PayRequest)>, DraftError> {
        if self.phase != DialogPhase::Ready || self.drafts.is_empty() {
            return Ok(Vec::new());
        }
        let requests: Result<Vec<_>, DraftError> = self
            .drafts
            .iter()
            .map(|d| d.to_request().map(|req| (d.clone(), req)))
            .collect();
        match requests {
            Ok(requests) => {
                self.validation_error = None;
                self.phase = DialogPhase::Submitting;
                Ok(requests)
            }
            Err(e) => {
                self.validation_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Keeps only the drafts whose payment failed. Closes when none did.
    pub fn finish_submit(&mut self, failed: &[EntityId]) {
        if failed.is_empty() {
            self.close();
            return;
        }
        self.drafts.retain(|d| failed.contains(&d.id));
        self.target_ids = self.drafts.iter().map(|d| d.id.clone()).collect();
        self.phase = DialogPhase::Ready;
    }

    /// Drafts are discarded on close.
    pub fn close(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_payable::PayableStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn record(id: &str) -> PayableRecord {
        PayableRecord {
            id: EntityId::from(id),
            description: format!("Conta {}", id),
            document_number: None,
            supplier: Default::default(),
            branch: Default::default(),
            category: Default::default(),
            payment_method_name: None,
            original_amount: 200.0,
            discount: 0.0,
            interest: 4.0,
            penalty: 6.0,
            amount_paid: 50.0,
            issue_date: None,
            due_date: today(),
            payment_date: None,
            status: PayableStatus::PartiallyPaid,
            notes: None,
            recurrence: None,
        }
    }

    fn draft() -> PaymentDraft {
        let mut d = PaymentDraft::from_record(&record("1"), today());
        d.amount = 100.0;
        d.penalty = 10.0;
        d.interest = 5.0;
        d
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("10"), 10.0);
        assert_eq!(parse_amount(" 12.5 "), 12.5);
        assert_eq!(parse_amount("1.234,50"), 1234.5);
        assert!(parse_amount("").is_nan());
        assert!(parse_amount("abc").is_nan());
    }

    #[test]
    fn test_draft_seeded_from_record() {
        let d = PaymentDraft::from_record(&record("1"), today());
        assert_eq!(d.amount, 160.0);
        assert_eq!(d.penalty, 6.0);
        assert_eq!(d.interest, 4.0);
        assert_eq!(d.date, Some(today()));
    }

    #[test]
    fn test_row_total_and_request() {
        let d = draft();
        assert_eq!(d.total(), 115.0);
        let req = d.to_request().unwrap();
        assert_eq!(req.valor_pago, 115.0);
        assert_eq!(req.data_pagamento, today());
    }

    #[test]
    fn test_zero_amount_is_rejected() {
        let mut d = draft();
        d.amount = 0.0;
        assert!(matches!(d.validate(), Err(DraftError::NonPositiveAmount { .. })));
    }

    #[test]
    fn test_non_numeric_and_missing_date_are_rejected() {
        let mut d = draft();
        d.set(DraftField::Penalty, "dez");
        assert!(matches!(
            d.validate(),
            Err(DraftError::NotANumber { field: DraftField::Penalty, .. })
        ));

        let mut d = draft();
        d.date = None;
        assert!(matches!(d.validate(), Err(DraftError::MissingDate { .. })));

        let mut d = draft();
        d.interest = -1.0;
        assert!(matches!(d.validate(), Err(DraftError::Negative { .. })));
    }

    #[test]
    fn test_invalid_draft_keeps_dialog_ready() {
        let mut state = PaymentDialogState::default();
        state.open_loading(vec![EntityId::from("1"), EntityId::from("2")]);
        state.seed(&[record("1"), record("2")], today());
        state.edit(&EntityId::from("2"), DraftField::Amount, "0");

        assert!(state.begin_submit().is_err());
        assert_eq!(state.phase, DialogPhase::Ready);
        assert!(state.validation_error.is_some());
    }

    #[test]
    fn test_seed_skips_unknown_ids_and_sums_totals() {
        let mut state = PaymentDialogState::default();
        state.open_loading(vec![EntityId::from("1"), EntityId::from("9")]);
        assert_eq!(state.phase, DialogPhase::Loading);

        let missing = state.seed(&[record("1")], today());
        assert_eq!(missing, vec![EntityId::from("9")]);
        assert_eq!(state.drafts.len(), 1);
        assert_eq!(state.grand_total(), 170.0);
    }

    #[test]
    fn test_finish_submit() {
        let mut state = PaymentDialogState::default();
        state.open_loading(vec![EntityId::from("1"), EntityId::from("2")]);
        state.seed(&[record("1"), record("2")], today());
        assert_eq!(state.begin_submit().unwrap().len(), 2);
        assert_eq!(state.phase, DialogPhase::Submitting);

        state.finish_submit(&[EntityId::from("2")]);
        assert_eq!(state.phase, DialogPhase::Ready);
        assert_eq!(state.target_ids, vec![EntityId::from("2")]);

        state.begin_submit().unwrap();
        state.finish_submit(&[]);
        assert!(!state.is_open());
        assert!(state.drafts.is_empty());
    }
}
