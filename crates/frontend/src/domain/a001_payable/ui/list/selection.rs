use contracts::domain::a001_payable::{PayableFilter, PayableRecord};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeSet;

use crate::domain::a001_payable::api;
use crate::shared::components::table::CheckState;
use crate::shared::date_utils::today_local;
use crate::shared::notifications::NotificationService;

/// Records chosen for a batch action.
///
/// In select-all mode the selection spans every page of the current filter
/// and `cache` holds the full dataset, so totals and exports see records
/// that are not loaded into the table.
///
/// `generation` changes on every user edit of the selection; a select-all
/// fetch started under an older generation is discarded when it lands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub selected: BTreeSet<EntityId>,
    pub select_all_mode: bool,
    pub cache: Option<Vec<PayableRecord>>,
    generation: u64,
}

/// What happened to a finished select-all fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectAllOutcome<E> {
    Applied(usize),
    Failed(E),
    /// The selection changed while the fetch was running
    Superseded,
}

impl SelectionState {
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.selected.contains(id)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Deselecting while in select-all mode leaves select-all mode; the
    /// remaining ids stay selected.
    pub fn toggle(&mut self, id: &EntityId) {
        self.bump();
        if self.selected.remove(id) {
            if self.select_all_mode {
                self.select_all_mode = false;
                self.cache = None;
            }
        } else {
            self.selected.insert(id.clone());
        }
    }

    pub fn select_visible(&mut self, page: &[PayableRecord]) {
        self.bump();
        self.selected = page.iter().map(|r| r.id.clone()).collect();
        self.select_all_mode = false;
        self.cache = None;
    }

    /// Applies the outcome of a full-dataset fetch started at generation
    /// `started`. A failure, or a selection edited in the meantime, leaves the
    /// state exactly as it is.
    pub fn finish_select_all<E>(
        &mut self,
        started: u64,
        fetched: Result<Vec<PayableRecord>, E>,
    ) -> SelectAllOutcome<E> {
        if started != self.generation {
            return SelectAllOutcome::Superseded;
        }
        let records = match fetched {
            Ok(records) => records,
            Err(e) => return SelectAllOutcome::Failed(e),
        };
        self.selected = records.iter().map(|r| r.id.clone()).collect();
        self.select_all_mode = true;
        self.cache = Some(records);
        SelectAllOutcome::Applied(self.selected.len())
    }

    pub fn clear(&mut self) {
        self.bump();
        self.selected.clear();
        self.select_all_mode = false;
        self.cache = None;
    }

    /// After a payment batch only the records whose payment failed stay
    /// selected. The cache holds pre-payment amounts, so it goes too.
    pub fn keep_failed(&mut self, failed: &[EntityId]) {
        self.bump();
        self.selected.retain(|id| failed.contains(id));
        self.select_all_mode = false;
        self.cache = None;
    }

    fn source<'a>(&'a self, page: &'a [PayableRecord]) -> &'a [PayableRecord] {
        match (&self.cache, self.select_all_mode) {
            (Some(cache), true) => cache,
            _ => page,
        }
    }

    /// Selected records resolvable from the cache (select-all mode) or the
    /// current page. Ids found in neither are skipped.
    pub fn selected_records(&self, page: &[PayableRecord]) -> Vec<PayableRecord> {
        self.source(page)
            .iter()
            .filter(|r| self.selected.contains(&r.id))
            .cloned()
            .collect()
    }

    /// Sum of final amounts; a selected id missing from the source counts as zero.
    pub fn selected_total(&self, page: &[PayableRecord]) -> f64 {
        self.selected_records(page)
            .iter()
            .map(PayableRecord::final_amount)
            .sum()
    }

    /// `true` when some selected id cannot be resolved from the source.
    pub fn has_unresolved(&self, page: &[PayableRecord]) -> bool {
        self.selected_records(page).len() < self.selected.len()
    }

    pub fn check_state(&self, page: &[PayableRecord]) -> CheckState {
        if self.select_all_mode {
            return CheckState::Checked;
        }
        let on_page = page.iter().filter(|r| self.selected.contains(&r.id)).count();
        if !page.is_empty() && on_page == page.len() {
            CheckState::Checked
        } else if on_page > 0 {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }
}

/// Reactive owner of the selection plus the select-all loading flag.
#[derive(Clone, Copy)]
pub struct SelectionCoordinator {
    pub state: RwSignal<SelectionState>,
    pub select_all_loading: RwSignal<bool>,
    notifications: NotificationService,
}

impl SelectionCoordinator {
    pub fn new(notifications: NotificationService) -> Self {
        Self {
            state: RwSignal::new(SelectionState::default()),
            select_all_loading: RwSignal::new(false),
            notifications,
        }
    }

    pub fn toggle(&self, id: &EntityId) {
        self.state.update(|s| s.toggle(id));
    }

    pub fn select_visible(&self, page: &[PayableRecord]) {
        self.state.update(|s| s.select_visible(page));
    }

    pub fn clear(&self) {
        self.state.update(SelectionState::clear);
    }

    pub fn keep_failed(&self, failed: &[EntityId]) {
        self.state.update(|s| s.keep_failed(failed));
    }

    /// Fetches every record matching `filter` and selects them all.
    pub fn select_all(&self, filter: PayableFilter) {
        if self.select_all_loading.get_untracked() {
            return;
        }
        let this = *self;
        let started = this.state.with_untracked(SelectionState::generation);
        this.select_all_loading.set(true);
        spawn_local(async move {
            let fetched = api::fetch_all(&filter, today_local()).await;
            let mut outcome = SelectAllOutcome::Superseded;
            this.state
                .update(|s| outcome = s.finish_select_all(started, fetched));
            match outcome {
                SelectAllOutcome::Applied(count) => {
                    log::info!("payables: select-all picked {} records", count)
                }
                SelectAllOutcome::Failed(e) => this
                    .notifications
                    .error("Erro ao selecionar todas as contas", Some(e.to_string())),
                SelectAllOutcome::Superseded => {
                    log::debug!("payables: select-all result dropped, selection changed meanwhile")
                }
            }
            this.select_all_loading.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a001_payable::PayableStatus;

    fn record(id: &str, original: f64) -> PayableRecord {
        PayableRecord {
            id: EntityId::from(id),
            description: format!("Conta {}", id),
            document_number: None,
            supplier: Default::default(),
            branch: Default::default(),
            category: Default::default(),
            payment_method_name: None,
            original_amount: original,
            discount: 0.0,
            interest: 0.0,
            penalty: 0.0,
            amount_paid: 0.0,
            issue_date: None,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            payment_date: None,
            status: PayableStatus::Pending,
            notes: None,
            recurrence: None,
        }
    }

    fn select_all(state: &mut SelectionState, records: Vec<PayableRecord>) {
        let started = state.generation();
        let outcome = state.finish_select_all::<String>(started, Ok(records));
        assert!(matches!(outcome, SelectAllOutcome::Applied(_)));
    }

    fn ids(state: &SelectionState) -> Vec<&str> {
        state.selected.iter().map(EntityId::as_str).collect()
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut state = SelectionState::default();
        state.toggle(&EntityId::from("1"));
        state.toggle(&EntityId::from("2"));
        state.toggle(&EntityId::from("1"));
        assert_eq!(ids(&state), vec!["2"]);
    }

    #[test]
    fn test_deselect_one_after_select_all_leaves_mode() {
        let mut state = SelectionState::default();
        let all = vec![record("1", 10.0), record("2", 20.0), record("3", 30.0)];
        select_all(&mut state, all);
        assert!(state.select_all_mode);

        state.toggle(&EntityId::from("2"));
        assert!(!state.select_all_mode);
        assert!(state.cache.is_none());
        assert_eq!(ids(&state), vec!["1", "3"]);
    }

    #[test]
    fn test_failed_select_all_keeps_prior_selection() {
        let mut state = SelectionState::default();
        state.toggle(&EntityId::from("7"));
        let before = state.clone();

        let started = state.generation();
        let result = state.finish_select_all(started, Err::<Vec<PayableRecord>, _>("timeout".to_string()));
        assert_eq!(result, SelectAllOutcome::Failed("timeout".to_string()));
        assert_eq!(state, before);
        assert!(!state.select_all_mode);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut state = SelectionState::default();
        select_all(&mut state, vec![record("1", 10.0)]);
        state.clear();
        let once = (state.selected.clone(), state.select_all_mode, state.cache.clone());
        state.clear();
        assert_eq!((state.selected.clone(), state.select_all_mode, state.cache.clone()), once);
        assert!(state.is_empty());
        assert!(!state.select_all_mode);
        assert!(state.cache.is_none());
    }

    #[test]
    fn test_selected_total_reads_cache_in_select_all_mode() {
        let page = vec![record("1", 10.0)];
        let mut state = SelectionState::default();
        select_all(&mut state, vec![record("1", 10.0), record("2", 20.0)]);
        assert_eq!(state.selected_total(&page), 30.0);
    }

    #[test]
    fn test_selected_total_skips_unresolved_ids() {
        let page = vec![record("1", 10.0), record("2", 20.0)];
        let mut state = SelectionState::default();
        state.toggle(&EntityId::from("2"));
        state.toggle(&EntityId::from("99"));
        assert_eq!(state.selected_total(&page), 20.0);
        assert!(state.has_unresolved(&page));
    }

    #[test]
    fn test_select_visible_replaces_selection() {
        let page = vec![record("1", 10.0), record("2", 20.0)];
        let mut state = SelectionState::default();
        state.toggle(&EntityId::from("9"));
        state.select_visible(&page);
        assert_eq!(ids(&state), vec!["1", "2"]);
        assert_eq!(state.check_state(&page), CheckState::Checked);
    }

    #[test]
    fn test_check_state() {
        let page = vec![record("1", 10.0), record("2", 20.0)];
        let mut state = SelectionState::default();
        assert_eq!(state.check_state(&page), CheckState::Unchecked);
        state.toggle(&EntityId::from("1"));
        assert_eq!(state.check_state(&page), CheckState::Indeterminate);
        assert_eq!(SelectionState::default().check_state(&[]), CheckState::Unchecked);
    }

    #[test]
    fn test_late_select_all_after_clear_is_dropped() {
        let mut state = SelectionState::default();
        state.toggle(&EntityId::from("5"));
        let started = state.generation();

        // a filter change clears the selection while the fetch is running
        state.clear();
        let outcome = state.finish_select_all::<String>(
            started,
            Ok(vec![record("1", 10.0), record("2", 20.0)]),
        );

        assert_eq!(outcome, SelectAllOutcome::Superseded);
        assert!(state.is_empty());
        assert!(!state.select_all_mode);
        assert!(state.cache.is_none());
    }

    #[test]
    fn test_late_select_all_after_toggle_is_dropped() {
        let page = vec![record("1", 10.0)];
        let mut state = SelectionState::default();
        let started = state.generation();
        state.toggle(&EntityId::from("1"));
        state.select_visible(&page);

        let outcome = state.finish_select_all::<String>(started, Ok(vec![record("9", 1.0)]));
        assert_eq!(outcome, SelectAllOutcome::Superseded);
        assert_eq!(ids(&state), vec!["1"]);
    }

    #[test]
    fn test_keep_failed_drops_paid_records_and_stale_cache() {
        let mut state = SelectionState::default();
        select_all(&mut state, vec![record("A", 10.0), record("B", 20.0), record("C", 30.0)]);

        state.keep_failed(&[EntityId::from("B")]);

        assert_eq!(ids(&state), vec!["B"]);
        assert!(!state.select_all_mode);
        assert!(state.cache.is_none());
        // B is not on the page, so nothing stale is offered for payment
        let page = vec![record("A", 10.0)];
        assert!(state.selected_records(&page).is_empty());
        assert!(state.has_unresolved(&page));
    }

    #[test]
    fn test_keep_failed_with_no_failures_empties_selection() {
        let mut state = SelectionState::default();
        state.toggle(&EntityId::from("1"));
        state.keep_failed(&[]);
        assert!(state.is_empty());
    }
}
