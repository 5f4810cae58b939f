//! Filter state of the payables list and its URL side channel.
//!
//! The URL is read once when the hook is created and written back
//! (debounced) after every change. Only the four multi-select dimensions
//! travel through the URL; date ranges and the search term stay local.

use contracts::domain::a001_payable::{PayableFilter, PayableStatus};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use web_sys::window;

use crate::shared::config::URL_SYNC_DEBOUNCE_MS;
use crate::shared::debounce::Debouncer;

/// Query-string shape: comma-joined identifiers per dimension.
#[derive(Debug, Default, Serialize, Deserialize)]
struct UrlFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    categoria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fornecedor: Option<String>,
}

fn split_tokens(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn split_ids(value: Option<&str>) -> BTreeSet<EntityId> {
    split_tokens(value)
        .filter_map(|token| EntityId::from_string(token).ok())
        .collect()
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let joined = values.collect::<Vec<_>>().join(",");
    (!joined.is_empty()).then_some(joined)
}

/// Restores the multi-select dimensions from a query string (with or
/// without the leading `?`). Unknown status tokens are dropped.
pub fn parse_query(search: &str) -> PayableFilter {
    let url: UrlFilter = match serde_qs::from_str(search.trim_start_matches('?')) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("payables: ignoring malformed filter query: {}", e);
            UrlFilter::default()
        }
    };

    let status = split_tokens(url.status.as_deref())
        .filter_map(|token| match PayableStatus::from_str(token) {
            Ok(status) => Some(status),
            Err(_) => {
                log::warn!("payables: unknown status '{}' in URL", token);
                None
            }
        })
        .collect();

    PayableFilter {
        status,
        branch: split_ids(url.filial.as_deref()),
        category: split_ids(url.categoria.as_deref()),
        supplier: split_ids(url.fornecedor.as_deref()),
        ..Default::default()
    }
}

/// Serializes the multi-select dimensions; empty string when none is set.
pub fn to_query(filter: &PayableFilter) -> String {
    let url = UrlFilter {
        status: join(filter.status.iter().map(|s| s.as_str())),
        filial: join(filter.branch.iter().map(EntityId::as_str)),
        categoria: join(filter.category.iter().map(EntityId::as_str)),
        fornecedor: join(filter.supplier.iter().map(EntityId::as_str)),
    };
    serde_qs::to_string(&url).unwrap_or_default()
}

fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn write_url(query: &str) {
    let Some(w) = window() else { return };
    let target = if query.is_empty() {
        String::new()
    } else {
        format!("?{}", query)
    };
    if current_search() == target {
        return;
    }
    let path = w.location().pathname().unwrap_or_default();
    let hash = w.location().hash().unwrap_or_default();
    if let Ok(history) = w.history() {
        let url = format!("{}{}{}", path, target, hash);
        match history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url)) {
            Ok(()) => log::debug!("payables: filters synced to URL {}", url),
            Err(e) => log::warn!("payables: failed to update URL: {:?}", e),
        }
    }
}

#[derive(Clone, Copy)]
pub struct PayableFilters {
    pub filter: RwSignal<PayableFilter>,
}

pub fn use_payable_filters() -> PayableFilters {
    let filter = RwSignal::new(parse_query(&current_search()));
    let debouncer = Debouncer::new(URL_SYNC_DEBOUNCE_MS);

    Effect::new(move |prev: Option<String>| {
        let query = filter.with(to_query);
        // the first run only records the restored state
        if matches!(prev, Some(ref last) if *last != query) {
            let pending = query.clone();
            debouncer.schedule(move || write_url(&pending));
        }
        query
    });

    PayableFilters { filter }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a001_payable::DateRange;

    fn ids(values: &[&str]) -> BTreeSet<EntityId> {
        values.iter().map(|v| EntityId::from(*v)).collect()
    }

    #[test]
    fn test_round_trip_multi_select_dimensions() {
        let filter = PayableFilter {
            status: [PayableStatus::Overdue, PayableStatus::Pending].into_iter().collect(),
            branch: ids(&["3", "1"]),
            category: ids(&["12"]),
            supplier: ids(&["7", "8", "9"]),
            ..Default::default()
        };

        let restored = parse_query(&format!("?{}", to_query(&filter)));
        assert_eq!(restored, filter);
    }

    #[test]
    fn test_dates_and_search_stay_out_of_url() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let filter = PayableFilter {
            due: Some(DateRange::single(day)),
            search: "energia".into(),
            ..Default::default()
        };
        assert_eq!(to_query(&filter), "");
        assert_eq!(parse_query(&to_query(&filter)), PayableFilter::default());
    }

    #[test]
    fn test_parse_plain_comma_lists() {
        let filter = parse_query("?status=pendente,vencida&filial=1,2&page=4");
        assert_eq!(
            filter.status,
            [PayableStatus::Pending, PayableStatus::Overdue].into_iter().collect()
        );
        assert_eq!(filter.branch, ids(&["1", "2"]));
        assert!(filter.category.is_empty());
    }

    #[test]
    fn test_unknown_status_token_is_ignored() {
        let filter = parse_query("status=quitada,paga");
        assert_eq!(filter.status, [PayableStatus::Paid].into_iter().collect());
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(parse_query(""), PayableFilter::default());
        assert_eq!(parse_query("?"), PayableFilter::default());
    }
}
