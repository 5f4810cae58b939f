use super::aggregate::{PayableRecord, PayableStatus};
use crate::domain::common::EntityId;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Inclusive calendar range; `to == None` selects the single day `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Bounds given in reverse order are swapped.
    pub fn new(from: NaiveDate, to: Option<NaiveDate>) -> Self {
        match to {
            Some(to) if to < from => Self {
                from: to,
                to: Some(from),
            },
            _ => Self { from, to },
        }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { from: day, to: None }
    }

    pub fn end(&self) -> NaiveDate {
        self.to.unwrap_or(self.from)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.from && day <= self.end()
    }
}

/// Filter criteria of the accounts-payable list.
///
/// Empty sets and `None` ranges impose no constraint. Dimensions combine
/// with AND, values inside one multi-select dimension with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayableFilter {
    pub status: BTreeSet<PayableStatus>,
    pub branch: BTreeSet<EntityId>,
    pub category: BTreeSet<EntityId>,
    pub supplier: BTreeSet<EntityId>,
    pub due: Option<DateRange>,
    pub paid: Option<DateRange>,
    pub movement: Option<DateRange>,
    pub search: String,
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.collect::<Vec<_>>().join(",")
}

fn matches_ref(set: &BTreeSet<EntityId>, id: Option<&EntityId>) -> bool {
    set.is_empty() || id.map(|id| set.contains(id)).unwrap_or(false)
}

impl PayableFilter {
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0 && self.search.trim().is_empty()
    }

    /// Number of constrained dimensions, for the "Filtros (N)" badge.
    pub fn active_count(&self) -> usize {
        [
            !self.status.is_empty(),
            !self.branch.is_empty(),
            !self.category.is_empty(),
            !self.supplier.is_empty(),
            self.due.is_some(),
            self.paid.is_some(),
            self.movement.is_some(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    /// Resets every dimension and the search term at once.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches_search(&self, record: &PayableRecord) -> bool {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        record.description.to_lowercase().contains(&term)
            || record
                .document_number
                .as_deref()
                .map(|d| d.to_lowercase().contains(&term))
                .unwrap_or(false)
            || record
                .supplier
                .name
                .as_deref()
                .map(|n| n.to_lowercase().contains(&term))
                .unwrap_or(false)
    }

    /// Client-side equivalent of the server filtering.
    ///
    /// Status is compared against the stored field, never against the
    /// derived overdue flag.
    pub fn matches(&self, record: &PayableRecord) -> bool {
        if !self.matches_search(record) {
            return false;
        }
        if !self.status.is_empty() && !self.status.contains(&record.status) {
            return false;
        }
        if !matches_ref(&self.branch, record.branch.id.as_ref())
            || !matches_ref(&self.category, record.category.id.as_ref())
            || !matches_ref(&self.supplier, record.supplier.id.as_ref())
        {
            return false;
        }
        if let Some(range) = &self.due {
            if !range.contains(record.due_date) {
                return false;
            }
        }
        if let Some(range) = &self.paid {
            match record.payment_date {
                Some(day) if range.contains(day) => {}
                _ => return false,
            }
        }
        if let Some(range) = &self.movement {
            let moved = [record.issue_date, record.payment_date]
                .into_iter()
                .flatten()
                .any(|day| range.contains(day));
            if !moved {
                return false;
            }
        }
        true
    }

    /// Query parameters understood by `/financeiro/contas-pagar/`.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if !self.status.is_empty() {
            params.push(("status", join_ids(self.status.iter().map(|s| s.as_str()))));
        }
        if !self.branch.is_empty() {
            params.push(("filial", join_ids(self.branch.iter().map(|id| id.as_str()))));
        }
        if !self.category.is_empty() {
            params.push((
                "categoria",
                join_ids(self.category.iter().map(|id| id.as_str())),
            ));
        }
        if !self.supplier.is_empty() {
            params.push((
                "fornecedor",
                join_ids(self.supplier.iter().map(|id| id.as_str())),
            ));
        }

        for (lower, upper, range) in [
            ("data_vencimento_inicio", "data_vencimento_fim", &self.due),
            ("data_pagamento_inicio", "data_pagamento_fim", &self.paid),
            ("data_movimentacao_inicio", "data_movimentacao_fim", &self.movement),
        ] {
            if let Some(range) = range {
                params.push((lower, iso(range.from)));
                params.push((upper, iso(range.end())));
            }
        }

        let term = self.search.trim();
        if !term.is_empty() {
            params.push(("search", term.to_string()));
        }

        params
    }
}

fn iso(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Overdue records first, then by due date ascending. Stable.
pub fn default_ordering(a: &PayableRecord, b: &PayableRecord, today: NaiveDate) -> Ordering {
    b.is_overdue(today)
        .cmp(&a.is_overdue(today))
        .then_with(|| a.due_date.cmp(&b.due_date))
}

/// Filters and orders a page locally, for endpoints that ignore query parameters.
pub fn apply_local(
    records: Vec<PayableRecord>,
    filter: &PayableFilter,
    today: NaiveDate,
) -> Vec<PayableRecord> {
    let mut result: Vec<PayableRecord> =
        records.into_iter().filter(|r| filter.matches(r)).collect();
    result.sort_by(|a, b| default_ordering(a, b, today));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_payable::aggregate::tests::sample;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn records() -> Vec<PayableRecord> {
        let mut a = sample("a", PayableStatus::Pending, day(6, 14));
        a.branch.id = Some(EntityId::from("1"));
        a.supplier.name = Some("Copel Energia".into());
        let mut b = sample("b", PayableStatus::Overdue, day(6, 14));
        b.branch.id = Some(EntityId::from("2"));
        b.document_number = Some("NF-889".into());
        let mut c = sample("c", PayableStatus::Paid, day(6, 20));
        c.branch.id = Some(EntityId::from("1"));
        c.payment_date = Some(day(6, 18));
        c.issue_date = Some(day(6, 1));
        vec![a, b, c]
    }

    fn ids(records: &[PayableRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_clear_resets_every_dimension_and_search() {
        let mut filter = PayableFilter {
            status: [PayableStatus::Overdue, PayableStatus::Paid].into_iter().collect(),
            branch: [EntityId::from("1")].into_iter().collect(),
            category: [EntityId::from("7")].into_iter().collect(),
            supplier: [EntityId::from("3")].into_iter().collect(),
            due: Some(DateRange::new(day(6, 1), Some(day(6, 30)))),
            paid: Some(DateRange::single(day(6, 18))),
            movement: Some(DateRange::new(day(5, 1), None)),
            search: "energia".into(),
        };
        assert_eq!(filter.active_count(), 7);

        filter.clear();
        assert_eq!(filter, PayableFilter::default());
        assert!(filter.is_empty());
        assert!(filter.query_params().is_empty());
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = PayableFilter::default();
        assert!(filter.is_empty());
        assert!(records().iter().all(|r| filter.matches(r)));
        assert!(filter.query_params().is_empty());
    }

    #[test]
    fn test_status_matches_stored_field_literally() {
        // A is past due but stored as pendente: it must not match "vencida"
        let filter = PayableFilter {
            status: [PayableStatus::Overdue].into_iter().collect(),
            ..Default::default()
        };
        let result = apply_local(records(), &filter, day(6, 15));
        assert_eq!(ids(&result), vec!["b"]);
    }

    #[test]
    fn test_and_across_or_within() {
        let filter = PayableFilter {
            status: [PayableStatus::Pending, PayableStatus::Paid]
                .into_iter()
                .collect(),
            branch: [EntityId::from("1")].into_iter().collect(),
            ..Default::default()
        };
        let matched: Vec<_> = records().into_iter().filter(|r| filter.matches(r)).collect();
        assert_eq!(ids(&matched), vec!["a", "c"]);
        assert_eq!(filter.active_count(), 2);
    }

    #[test]
    fn test_search_fields() {
        let mut filter = PayableFilter {
            search: "COPEL".into(),
            ..Default::default()
        };
        let matched: Vec<_> = records().into_iter().filter(|r| filter.matches(r)).collect();
        assert_eq!(ids(&matched), vec!["a"]);

        filter.search = "nf-88".into();
        let matched: Vec<_> = records().into_iter().filter(|r| filter.matches(r)).collect();
        assert_eq!(ids(&matched), vec!["b"]);
    }

    #[test]
    fn test_date_ranges() {
        let filter = PayableFilter {
            paid: Some(DateRange::new(day(6, 1), Some(day(6, 30)))),
            ..Default::default()
        };
        let matched: Vec<_> = records().into_iter().filter(|r| filter.matches(r)).collect();
        assert_eq!(ids(&matched), vec!["c"]);

        let filter = PayableFilter {
            due: Some(DateRange::single(day(6, 14))),
            ..Default::default()
        };
        let matched: Vec<_> = records().into_iter().filter(|r| filter.matches(r)).collect();
        assert_eq!(ids(&matched), vec!["a", "b"]);

        let filter = PayableFilter {
            movement: Some(DateRange::single(day(6, 1))),
            ..Default::default()
        };
        let matched: Vec<_> = records().into_iter().filter(|r| filter.matches(r)).collect();
        assert_eq!(ids(&matched), vec!["c"]);
    }

    #[test]
    fn test_reversed_range_is_swapped() {
        let range = DateRange::new(day(6, 30), Some(day(6, 1)));
        assert_eq!(range.from, day(6, 1));
        assert_eq!(range.end(), day(6, 30));
    }

    #[test]
    fn test_query_params() {
        let filter = PayableFilter {
            status: [PayableStatus::Pending, PayableStatus::Overdue]
                .into_iter()
                .collect(),
            supplier: [EntityId::from("3"), EntityId::from("12")]
                .into_iter()
                .collect(),
            due: Some(DateRange::single(day(6, 5))),
            search: "  luz ".into(),
            ..Default::default()
        };
        let params = filter.query_params();
        assert_eq!(
            params,
            vec![
                ("status", "pendente,vencida".to_string()),
                ("fornecedor", "12,3".to_string()),
                ("data_vencimento_inicio", "2024-06-05".to_string()),
                ("data_vencimento_fim", "2024-06-05".to_string()),
                ("search", "luz".to_string()),
            ]
        );
    }

    #[test]
    fn test_default_ordering_puts_overdue_first() {
        let today = day(6, 15);
        let mut late = sample("late", PayableStatus::Pending, day(6, 10));
        late.original_amount = 1.0;
        let soon = sample("soon", PayableStatus::Pending, day(6, 16));
        let later = sample("later", PayableStatus::Pending, day(6, 30));
        let settled = sample("settled", PayableStatus::Paid, day(6, 1));

        let result = apply_local(
            vec![later, settled, soon, late],
            &PayableFilter::default(),
            today,
        );
        assert_eq!(ids(&result), vec!["late", "settled", "soon", "later"]);
    }
}
