/// List helpers: tri-state column sorting and the debounced search box
use chrono::NaiveDate;
use leptos::prelude::*;
use std::cmp::Ordering;

use super::config::SEARCH_DEBOUNCE_MS;
use super::debounce::Debouncer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Active sort column, if any. Only one column sorts at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: Option<K>,
    pub direction: SortDirection,
}

impl<K> Default for SortState<K> {
    fn default() -> Self {
        Self {
            key: None,
            direction: SortDirection::Asc,
        }
    }
}

impl<K: Copy + PartialEq> SortState<K> {
    /// Header click: unsorted → ascending → descending → unsorted.
    /// Clicking another column starts it at ascending.
    pub fn cycle(&mut self, key: K) {
        match (self.key, self.direction) {
            (Some(current), SortDirection::Asc) if current == key => {
                self.direction = SortDirection::Desc;
            }
            (Some(current), SortDirection::Desc) if current == key => {
                self.key = None;
                self.direction = SortDirection::Asc;
            }
            _ => {
                self.key = Some(key);
                self.direction = SortDirection::Asc;
            }
        }
    }

    pub fn direction_of(&self, key: K) -> Option<SortDirection> {
        match self.key {
            Some(current) if current == key => Some(self.direction),
            _ => None,
        }
    }
}

/// A single comparable cell value. `None` payloads are nulls.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(Option<String>),
    Number(Option<f64>),
    Date(Option<NaiveDate>),
}

impl SortValue {
    fn is_null(&self) -> bool {
        match self {
            SortValue::Text(v) => v.as_deref().map(str::is_empty).unwrap_or(true),
            SortValue::Number(v) => v.map(f64::is_nan).unwrap_or(true),
            SortValue::Date(v) => v.is_none(),
        }
    }

    fn cmp_present(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(Some(a)), SortValue::Text(Some(b))) => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            (SortValue::Number(Some(a)), SortValue::Number(Some(b))) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortValue::Date(Some(a)), SortValue::Date(Some(b))) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Trait for rows that support column sorting
pub trait Sortable {
    type Key: Copy + PartialEq;

    fn sort_value(&self, key: Self::Key) -> SortValue;
}

/// Nulls go last in both directions; present values follow the direction.
pub fn compare_values(a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let cmp = a.cmp_present(b);
            match direction {
                SortDirection::Asc => cmp,
                SortDirection::Desc => cmp.reverse(),
            }
        }
    }
}

/// Returns the rows in display order. Stable: rows with equal keys keep
/// their incoming order, and an unsorted state returns the input order.
pub fn sorted<T: Sortable + Clone>(items: &[T], state: &SortState<T::Key>) -> Vec<T> {
    let mut result = items.to_vec();
    if let Some(key) = state.key {
        result.sort_by(|a, b| compare_values(&a.sort_value(key), &b.sort_value(key), state.direction));
    }
    result
}

/// Sort indicator for a header
pub fn get_sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => " ⇅",
    }
}

pub fn get_sort_class(direction: Option<SortDirection>) -> &'static str {
    if direction.is_some() {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Search box with debounce and a clear button
#[component]
pub fn SearchInput(
    /// Applied filter value (drives the highlight and external resets)
    #[prop(into)]
    value: Signal<String>,
    /// Called with the new text after the debounce delay
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    // Local text before debounce
    let (input_value, set_input_value) = signal(value.get_untracked());
    let debouncer = Debouncer::new(SEARCH_DEBOUNCE_MS);

    // "Limpar filtros" resets the applied value from outside
    Effect::new(move |_| {
        let applied = value.get();
        if applied.is_empty() && !input_value.get_untracked().is_empty() {
            debouncer.cancel();
            set_input_value.set(String::new());
        }
    });

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        debouncer.schedule(move || on_change.run(new_value));
    };

    let clear_filter = move |_| {
        debouncer.cancel();
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class=move || if value.get().trim().is_empty() { "search-input__field" } else { "search-input__field search-input__field--active" }
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Limpar">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: Option<&'static str>,
        amount: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Col {
        Name,
        Amount,
    }

    impl Sortable for Row {
        type Key = Col;
        fn sort_value(&self, key: Col) -> SortValue {
            match key {
                Col::Name => SortValue::Text(self.name.map(String::from)),
                Col::Amount => SortValue::Number(Some(self.amount)),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: Some("beta"), amount: 10.0 },
            Row { id: 2, name: None, amount: 5.0 },
            Row { id: 3, name: Some("Alfa"), amount: 10.0 },
            Row { id: 4, name: Some("alfa"), amount: 1.0 },
        ]
    }

    fn ids(rows: &[Row]) -> Vec<u32> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_cycle_three_clicks_returns_to_unsorted() {
        let mut state = SortState::default();
        state.cycle(Col::Amount);
        assert_eq!(state.direction_of(Col::Amount), Some(SortDirection::Asc));
        state.cycle(Col::Amount);
        assert_eq!(state.direction_of(Col::Amount), Some(SortDirection::Desc));
        state.cycle(Col::Amount);
        assert_eq!(state.key, None);
        assert_eq!(ids(&sorted(&rows(), &state)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_switching_column_starts_ascending() {
        let mut state = SortState::default();
        state.cycle(Col::Amount);
        state.cycle(Col::Amount);
        state.cycle(Col::Name);
        assert_eq!(state.direction_of(Col::Name), Some(SortDirection::Asc));
        assert_eq!(state.direction_of(Col::Amount), None);
    }

    #[test]
    fn test_stable_with_duplicate_keys() {
        let mut state = SortState::default();
        state.cycle(Col::Amount);
        assert_eq!(ids(&sorted(&rows(), &state)), vec![4, 2, 1, 3]);
        state.cycle(Col::Amount);
        assert_eq!(ids(&sorted(&rows(), &state)), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_nulls_last_and_case_insensitive() {
        let mut state = SortState::default();
        state.cycle(Col::Name);
        // "Alfa" and "alfa" tie, keep input order
        assert_eq!(ids(&sorted(&rows(), &state)), vec![3, 4, 1, 2]);
        state.cycle(Col::Name);
        assert_eq!(ids(&sorted(&rows(), &state)), vec![1, 3, 4, 2]);
    }
}
