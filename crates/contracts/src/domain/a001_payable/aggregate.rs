use crate::domain::common::{EntityId, EntityRef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a payable, as stored by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PayableStatus {
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "vencida")]
    Overdue,
    #[serde(rename = "paga")]
    Paid,
    #[serde(rename = "paga_parcial")]
    PartiallyPaid,
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl PayableStatus {
    pub const ALL: [PayableStatus; 5] = [
        PayableStatus::Overdue,
        PayableStatus::Pending,
        PayableStatus::Paid,
        PayableStatus::PartiallyPaid,
        PayableStatus::Cancelled,
    ];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            PayableStatus::Pending => "pendente",
            PayableStatus::Overdue => "vencida",
            PayableStatus::Paid => "paga",
            PayableStatus::PartiallyPaid => "paga_parcial",
            PayableStatus::Cancelled => "cancelada",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PayableStatus::Pending => "Pendente",
            PayableStatus::Overdue => "Vencida",
            PayableStatus::Paid => "Paga",
            PayableStatus::PartiallyPaid => "Paga Parcial",
            PayableStatus::Cancelled => "Cancelada",
        }
    }

    /// Paid and cancelled records are settled: they never become overdue
    /// and cannot be paid or cancelled again.
    pub fn is_settled(&self) -> bool {
        matches!(self, PayableStatus::Paid | PayableStatus::Cancelled)
    }
}

impl fmt::Display for PayableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PayableStatus::ALL
            .iter()
            .copied()
            .find(|st| st.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    Semanal,
    Quinzenal,
    Mensal,
    Bimestral,
    Trimestral,
    Semestral,
    Anual,
}

impl RecurrenceFrequency {
    pub const ALL: [RecurrenceFrequency; 7] = [
        RecurrenceFrequency::Semanal,
        RecurrenceFrequency::Quinzenal,
        RecurrenceFrequency::Mensal,
        RecurrenceFrequency::Bimestral,
        RecurrenceFrequency::Trimestral,
        RecurrenceFrequency::Semestral,
        RecurrenceFrequency::Anual,
    ];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceFrequency::Semanal => "semanal",
            RecurrenceFrequency::Quinzenal => "quinzenal",
            RecurrenceFrequency::Mensal => "mensal",
            RecurrenceFrequency::Bimestral => "bimestral",
            RecurrenceFrequency::Trimestral => "trimestral",
            RecurrenceFrequency::Semestral => "semestral",
            RecurrenceFrequency::Anual => "anual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecurrenceFrequency::Semanal => "Semanal",
            RecurrenceFrequency::Quinzenal => "Quinzenal",
            RecurrenceFrequency::Mensal => "Mensal",
            RecurrenceFrequency::Bimestral => "Bimestral",
            RecurrenceFrequency::Trimestral => "Trimestral",
            RecurrenceFrequency::Semestral => "Semestral",
            RecurrenceFrequency::Anual => "Anual",
        }
    }
}

impl FromStr for RecurrenceFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.trim().to_string()))
            .map_err(|_| format!("Unknown recurrence frequency: {}", s))
    }
}

/// Conta a pagar, normalised from the wire representation.
///
/// Final and remaining amounts are never stored: they are recomputed from
/// the stored fields on every call so no cached copy can drift.
#[derive(Debug, Clone, PartialEq)]
pub struct PayableRecord {
    pub id: EntityId,
    pub description: String,
    pub document_number: Option<String>,
    pub supplier: EntityRef,
    pub branch: EntityRef,
    pub category: EntityRef,
    pub payment_method_name: Option<String>,

    pub original_amount: f64,
    pub discount: f64,
    pub interest: f64,
    pub penalty: f64,
    pub amount_paid: f64,

    pub issue_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,

    pub status: PayableStatus,
    pub notes: Option<String>,
    /// `Some` only for recurring payables
    pub recurrence: Option<RecurrenceFrequency>,
}

impl PayableRecord {
    /// original − discount + interest + penalty
    pub fn final_amount(&self) -> f64 {
        self.original_amount - self.discount + self.interest + self.penalty
    }

    pub fn remaining_amount(&self) -> f64 {
        self.final_amount() - self.amount_paid
    }

    /// Derived from the due date, independent of the stored `vencida` status.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_settled() && self.due_date < today
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample(id: &str, status: PayableStatus, due: NaiveDate) -> PayableRecord {
        PayableRecord {
            id: EntityId::from(id),
            description: format!("Conta {}", id),
            document_number: None,
            supplier: EntityRef::default(),
            branch: EntityRef::default(),
            category: EntityRef::default(),
            payment_method_name: None,
            original_amount: 100.0,
            discount: 0.0,
            interest: 0.0,
            penalty: 0.0,
            amount_paid: 0.0,
            issue_date: None,
            due_date: due,
            payment_date: None,
            status,
            notes: None,
            recurrence: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_final_and_remaining_amounts() {
        let mut rec = sample("1", PayableStatus::Pending, day(10));
        rec.original_amount = 1000.0;
        rec.discount = 50.0;
        rec.interest = 12.5;
        rec.penalty = 20.0;
        rec.amount_paid = 300.0;

        assert_eq!(rec.final_amount(), 982.5);
        assert_eq!(rec.remaining_amount(), 682.5);

        // Recomputed from current state, nothing cached
        rec.amount_paid = 982.5;
        assert_eq!(rec.remaining_amount(), 0.0);
    }

    #[test]
    fn test_is_overdue() {
        let today = day(15);
        assert!(sample("1", PayableStatus::Pending, day(14)).is_overdue(today));
        assert!(sample("2", PayableStatus::PartiallyPaid, day(1)).is_overdue(today));
        assert!(!sample("3", PayableStatus::Pending, day(15)).is_overdue(today));
        assert!(!sample("4", PayableStatus::Paid, day(1)).is_overdue(today));
        assert!(!sample("5", PayableStatus::Cancelled, day(1)).is_overdue(today));
    }

    #[test]
    fn test_status_round_trip() {
        for st in PayableStatus::ALL {
            assert_eq!(st.as_str().parse::<PayableStatus>().unwrap(), st);
        }
        assert!("quitada".parse::<PayableStatus>().is_err());
    }

    #[test]
    fn test_recurrence_parse() {
        assert_eq!(
            "mensal".parse::<RecurrenceFrequency>().unwrap(),
            RecurrenceFrequency::Mensal
        );
        assert!("diaria".parse::<RecurrenceFrequency>().is_err());
        for freq in RecurrenceFrequency::ALL {
            assert_eq!(freq.as_str().parse::<RecurrenceFrequency>().unwrap(), freq);
        }
    }
}
