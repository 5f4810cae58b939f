use chrono::NaiveDate;
use contracts::domain::a001_payable::filter::apply_local;
use contracts::domain::a001_payable::{
    normalize_all, PayRequest, PayableFilter, PayableInput, PayableRecord, PayableRecordDto,
    PayableStats, PayableStatsDto,
};
use contracts::domain::a002_branch::aggregate::Branch;
use contracts::domain::a003_category::aggregate::Category;
use contracts::domain::a004_supplier::aggregate::Supplier;
use contracts::domain::a005_payment_method::aggregate::PaymentMethod;
use contracts::domain::common::{EntityId, LookupOption};
use contracts::shared::pagination::ListResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::shared::api_error::ApiError;
use crate::shared::api_utils::query_string;
use crate::shared::config::SELECT_ALL_PAGE_SIZE;
use crate::shared::http::{get_json, post_empty, post_json, put_json};

const PAYABLES_PATH: &str = "/financeiro/contas-pagar/";

/// Records of one list request.
#[derive(Debug, Clone, PartialEq)]
pub struct PayablePage {
    pub records: Vec<PayableRecord>,
    /// Total across all pages; `None` when the endpoint answered with a bare array
    pub count: Option<usize>,
}

/// Resolves a list response into normalised records.
///
/// A bare array means the endpoint ignored the query, so the filter and the
/// default ordering are applied locally.
pub fn page_from_response(
    response: ListResponse<PayableRecordDto>,
    filter: &PayableFilter,
    today: NaiveDate,
) -> PayablePage {
    let count = response.count();
    let (records, errors) = normalize_all(response.into_items());
    for e in &errors {
        log::warn!("payables: skipped record: {}", e);
    }
    let records = match count {
        Some(_) => records,
        None => apply_local(records, filter, today),
    };
    PayablePage { records, count }
}

fn list_path(filter: &PayableFilter, page: usize, page_size: usize) -> String {
    let mut params = filter.query_params();
    params.push(("page", page.to_string()));
    params.push(("page_size", page_size.to_string()));
    format!("{}?{}", PAYABLES_PATH, query_string(&params))
}

pub async fn fetch_page(
    filter: &PayableFilter,
    page: usize,
    page_size: usize,
    today: NaiveDate,
) -> Result<PayablePage, ApiError> {
    let path = list_path(filter, page, page_size);
    log::debug!("payables: GET {}", path);
    let response: ListResponse<PayableRecordDto> = get_json(&path).await?;
    Ok(page_from_response(response, filter, today))
}

/// Every record matching `filter`, in one request with the maximum page size.
pub async fn fetch_all(
    filter: &PayableFilter,
    today: NaiveDate,
) -> Result<Vec<PayableRecord>, ApiError> {
    let page = fetch_page(filter, 1, SELECT_ALL_PAGE_SIZE, today).await?;
    if let Some(count) = page.count {
        if count > page.records.len() {
            log::warn!(
                "payables: select-all got {} of {} records (page size cap)",
                page.records.len(),
                count
            );
        }
    }
    Ok(page.records)
}

pub async fn fetch_stats() -> Result<PayableStats, ApiError> {
    let dto: PayableStatsDto = get_json(&format!("{}estatisticas/", PAYABLES_PATH)).await?;
    Ok(dto.into())
}

/// Registers a payment; the updated record in the response is not used
/// because the list is refetched afterwards.
pub async fn pay(id: &EntityId, request: &PayRequest) -> Result<(), ApiError> {
    let path = format!("{}{}/pagar/", PAYABLES_PATH, id);
    let _: Value = post_json(&path, request).await?;
    log::info!(
        "payables: {} paid {:.2} on {}",
        id,
        request.valor_pago,
        request.data_pagamento
    );
    Ok(())
}

pub async fn create(input: &PayableInput) -> Result<(), ApiError> {
    let _: Value = post_json(PAYABLES_PATH, input).await?;
    log::info!("payables: created \"{}\" due {}", input.descricao, input.data_vencimento);
    Ok(())
}

pub async fn update(id: &EntityId, input: &PayableInput) -> Result<(), ApiError> {
    let _: Value = put_json(&format!("{}{}/", PAYABLES_PATH, id), input).await?;
    log::info!("payables: {} updated", id);
    Ok(())
}

pub async fn cancel(id: &EntityId) -> Result<(), ApiError> {
    post_empty(&format!("{}{}/cancelar/", PAYABLES_PATH, id)).await?;
    log::info!("payables: {} cancelled", id);
    Ok(())
}

/// Option list of an entity endpoint, following `next` links to the end.
async fn fetch_options<T>(path: &str) -> Result<Vec<LookupOption>, ApiError>
where
    T: DeserializeOwned + Into<LookupOption>,
{
    let mut options = Vec::new();
    let mut next = Some(path.to_string());
    while let Some(url) = next.take() {
        let response: ListResponse<T> = get_json(&url).await?;
        log::debug!("payables: {} options from {}", response.items().len(), url);
        next = response.next().map(str::to_string);
        options.extend(response.into_items().into_iter().map(Into::into));
    }
    Ok(options)
}

/// Dropdown options for the filter panel and the payable form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayableLookups {
    pub branches: Vec<LookupOption>,
    pub categories: Vec<LookupOption>,
    pub suppliers: Vec<LookupOption>,
    /// Only the form uses these; empty when the endpoint failed
    pub payment_methods: Vec<LookupOption>,
}

/// Options of a list the page can work without.
fn optional_options(what: &str, fetched: Result<Vec<LookupOption>, ApiError>) -> Vec<LookupOption> {
    fetched.unwrap_or_else(|e| {
        log::warn!("payables: {} unavailable: {}", what, e);
        Vec::new()
    })
}

/// Branches, categories and suppliers are required; a failure of the
/// payment methods endpoint only leaves that list empty.
pub async fn fetch_lookups() -> Result<PayableLookups, ApiError> {
    let required = async {
        futures::try_join!(
            fetch_options::<Branch>("/financeiro/filiais/"),
            fetch_options::<Category>("/financeiro/categorias/"),
            fetch_options::<Supplier>("/financeiro/fornecedores/"),
        )
    };
    let (required, payment_methods) = futures::join!(
        required,
        fetch_options::<PaymentMethod>("/financeiro/formas-pagamento/"),
    );
    let (branches, categories, suppliers) = required?;
    Ok(PayableLookups {
        branches,
        categories,
        suppliers,
        payment_methods: optional_options("payment methods", payment_methods),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_payable::PayableStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_envelope_keeps_server_order_and_count() {
        let response: ListResponse<PayableRecordDto> = serde_json::from_str(
            r#"{"count": 60, "next": null, "previous": null, "results": [
                {"id": 2, "data_vencimento": "2024-07-01", "status": "pendente"},
                {"id": 1, "data_vencimento": "2024-06-01", "status": "vencida"}
            ]}"#,
        )
        .unwrap();
        let filter = PayableFilter {
            status: [PayableStatus::Paid].into_iter().collect(),
            ..Default::default()
        };
        let page = page_from_response(response, &filter, today());
        assert_eq!(page.count, Some(60));
        let ids: Vec<_> = page.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_bare_array_is_filtered_locally() {
        let response: ListResponse<PayableRecordDto> = serde_json::from_str(
            r#"[
                {"id": 1, "data_vencimento": "2024-07-01", "status": "pendente"},
                {"id": 2, "data_vencimento": "2024-06-01", "status": "pendente"},
                {"id": 3, "data_vencimento": "2024-06-20", "status": "paga"}
            ]"#,
        )
        .unwrap();
        let filter = PayableFilter {
            status: [PayableStatus::Pending].into_iter().collect(),
            ..Default::default()
        };
        let page = page_from_response(response, &filter, today());
        assert_eq!(page.count, None);
        let ids: Vec<_> = page.records.iter().map(|r| r.id.as_str()).collect();
        // overdue first, then by due date
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_failed_optional_list_is_empty() {
        let failed = optional_options("payment methods", Err(ApiError::Network("offline".into())));
        assert!(failed.is_empty());

        let pix = LookupOption::new(EntityId::from_string("3").unwrap(), "PIX");
        let loaded = optional_options("payment methods", Ok(vec![pix.clone()]));
        assert_eq!(loaded, vec![pix]);
    }

    #[test]
    fn test_list_path() {
        let path = list_path(&PayableFilter::default(), 3, 25);
        assert_eq!(path, "/financeiro/contas-pagar/?page=3&page_size=25");
    }
}
