//! Batch payment as a sequence of independent steps.
//!
//! There is no bulk endpoint: every draft becomes one `pagar` request,
//! awaited in order. A failed step does not stop the batch and nothing is
//! rolled back; the caller gets one outcome per step.

use contracts::domain::a001_payable::PayRequest;
use contracts::domain::common::EntityId;
use std::future::Future;

use super::model::PaymentDraft;

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentStep {
    pub id: EntityId,
    pub description: String,
    pub request: PayRequest,
}

impl From<(PaymentDraft, PayRequest)> for PaymentStep {
    fn from((draft, request): (PaymentDraft, PayRequest)) -> Self {
        Self {
            id: draft.id,
            description: draft.description,
            request,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome<E> {
    pub step: PaymentStep,
    pub result: Result<(), E>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport<E> {
    pub outcomes: Vec<StepOutcome<E>>,
}

impl<E> BatchReport<E> {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &PaymentStep> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_ok())
            .map(|o| &o.step)
    }

    pub fn failed_ids(&self) -> Vec<EntityId> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.step.id.clone())
            .collect()
    }

    pub fn paid_total(&self) -> f64 {
        self.succeeded().map(|s| s.request.valor_pago).sum()
    }
}

/// Runs every step in order, calling `on_step` after each one so progress
/// and per-record notifications appear in submission order.
pub async fn run_batch_payment<E, P, Fut, N>(
    steps: Vec<PaymentStep>,
    mut pay: P,
    mut on_step: N,
) -> BatchReport<E>
where
    P: FnMut(EntityId, PayRequest) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    N: FnMut(usize, &StepOutcome<E>),
{
    let mut outcomes = Vec::with_capacity(steps.len());
    for (index, step) in steps.into_iter().enumerate() {
        let result = pay(step.id.clone(), step.request.clone()).await;
        let outcome = StepOutcome { step, result };
        on_step(index, &outcome);
        outcomes.push(outcome);
    }
    BatchReport { outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn step(id: &str, amount: f64) -> PaymentStep {
        PaymentStep {
            id: EntityId::from(id),
            description: format!("Conta {}", id),
            request: PayRequest {
                valor_pago: amount,
                data_pagamento: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            },
        }
    }

    #[test]
    fn test_second_failure_does_not_stop_the_batch() {
        let calls = RefCell::new(Vec::new());
        let progress = RefCell::new(Vec::new());

        let report = block_on(run_batch_payment(
            vec![step("1", 10.0), step("2", 20.0), step("3", 30.0)],
            |id: EntityId, _req| {
                calls.borrow_mut().push(id.to_string());
                let failing = id.as_str() == "2";
                async move {
                    if failing {
                        Err("HTTP 500".to_string())
                    } else {
                        Ok(())
                    }
                }
            },
            |index, outcome| progress.borrow_mut().push((index, outcome.result.is_ok())),
        ));

        assert_eq!(*calls.borrow(), vec!["1", "2", "3"]);
        assert_eq!(*progress.borrow(), vec![(0, true), (1, false), (2, true)]);
        assert!(!report.all_succeeded());
        assert_eq!(report.failed_ids(), vec![EntityId::from("2")]);
        assert_eq!(report.paid_total(), 40.0);
    }

    #[test]
    fn test_all_steps_succeed() {
        let report: BatchReport<String> = block_on(run_batch_payment(
            vec![step("1", 10.0), step("2", 5.5)],
            |_, _| async { Ok(()) },
            |_, _| {},
        ));
        assert!(report.all_succeeded());
        assert!(report.failed_ids().is_empty());
        assert_eq!(report.paid_total(), 15.5);
    }
}
