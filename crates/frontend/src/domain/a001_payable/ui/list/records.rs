use contracts::domain::a001_payable::{PayableFilter, PayableRecord};
use contracts::shared::pagination::total_pages;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_payable::api::{self, PayableLookups};
use crate::shared::config::PAGE_SIZE;
use crate::shared::date_utils::today_local;
use crate::shared::notifications::NotificationService;

/// Monotonic ticket counter; only the latest ticket may write results.
#[derive(Debug, Default)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

/// Current page of payables plus the dropdown option lists.
///
/// Refetches whenever the filter or the page changes. Failed requests keep
/// the previous rows on screen.
#[derive(Clone, Copy)]
pub struct PayableRecords {
    pub records: RwSignal<Vec<PayableRecord>>,
    pub loading: RwSignal<bool>,
    /// 1-based
    pub page: RwSignal<usize>,
    pub total_count: RwSignal<usize>,
    pub total_pages: RwSignal<usize>,
    pub lookups: RwSignal<PayableLookups>,
    filter: Signal<PayableFilter>,
    seq: StoredValue<RequestSeq, LocalStorage>,
    notifications: NotificationService,
}

pub fn use_payable_records(
    filter: Signal<PayableFilter>,
    notifications: NotificationService,
) -> PayableRecords {
    let hook = PayableRecords {
        records: RwSignal::new(Vec::new()),
        loading: RwSignal::new(false),
        page: RwSignal::new(1),
        total_count: RwSignal::new(0),
        total_pages: RwSignal::new(1),
        lookups: RwSignal::new(PayableLookups::default()),
        filter,
        seq: StoredValue::new_local(RequestSeq::default()),
        notifications,
    };

    Effect::new(move |_| {
        let filter = filter.get();
        let page = hook.page.get();
        hook.load(filter, page);
    });

    hook.load_lookups();
    hook
}

impl PayableRecords {
    pub fn refetch(&self) {
        self.load(self.filter.get_untracked(), self.page.get_untracked());
    }

    pub fn set_page(&self, page: usize) {
        let last = self.total_pages.get_untracked().max(1);
        self.page.set(page.clamp(1, last));
    }

    fn load(&self, filter: PayableFilter, page: usize) {
        let this = *self;
        let mut ticket = 0;
        this.seq.update_value(|seq| ticket = seq.issue());
        this.loading.set(true);

        spawn_local(async move {
            let result = api::fetch_page(&filter, page, PAGE_SIZE, today_local()).await;
            if !this.seq.with_value(|seq| seq.is_latest(ticket)) {
                log::debug!("payables: discarded stale response for page {}", page);
                return;
            }
            match result {
                Ok(fetched) => {
                    this.records.set(fetched.records);
                    if let Some(count) = fetched.count {
                        this.total_count.set(count);
                        this.total_pages.set(total_pages(count, PAGE_SIZE).max(1));
                    }
                }
                Err(e) => {
                    this.notifications
                        .error("Erro ao carregar contas", Some(e.to_string()));
                }
            }
            this.loading.set(false);
        });
    }

    fn load_lookups(&self) {
        let lookups = self.lookups;
        let notifications = self.notifications;
        spawn_local(async move {
            match api::fetch_lookups().await {
                Ok(loaded) => lookups.set(loaded),
                Err(e) => notifications.error("Erro ao carregar opções", Some(e.to_string())),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_wins() {
        let mut seq = RequestSeq::default();
        let page_one = seq.issue();
        let page_two = seq.issue();

        // page 1 answers last; it must not overwrite page 2
        assert!(seq.is_latest(page_two));
        assert!(!seq.is_latest(page_one));
    }

    #[test]
    fn test_tickets_are_monotonic() {
        let mut seq = RequestSeq::default();
        let tickets: Vec<u64> = (0..4).map(|_| seq.issue()).collect();
        assert_eq!(tickets, vec![1, 2, 3, 4]);
    }
}
