use chrono::{Datelike, NaiveDate};
use contracts::domain::a001_payable::DateRange;
use leptos::prelude::*;
use thaw::*;

use crate::shared::date_utils::{from_input_value, to_input_value, today_local};

fn month_bounds(day: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(day.year(), day.month(), 1)?;
    let next = if day.month() == 12 {
        NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)?
    };
    Some((start, next.pred_opt()?))
}

/// Date range from two `<input type="date">` fields.
///
/// An empty "até" field means a single day. Clearing "de" clears the range.
#[component]
pub fn DateRangePicker(
    #[prop(into)]
    value: Signal<Option<DateRange>>,

    /// Called with the new range (None = no constraint)
    on_change: Callback<Option<DateRange>>,

    #[prop(optional, into)]
    label: Option<String>,
) -> impl IntoView {
    let on_from_change = move |raw: String| {
        let to = value.get_untracked().and_then(|r| r.to);
        on_change.run(from_input_value(&raw).map(|from| DateRange::new(from, to)));
    };

    let on_to_change = move |raw: String| {
        let current = value.get_untracked();
        match (current, from_input_value(&raw)) {
            (Some(range), to) => on_change.run(Some(DateRange::new(range.from, to))),
            // "até" without "de": treat as single day
            (None, Some(to)) => on_change.run(Some(DateRange::single(to))),
            (None, None) => {}
        }
    };

    let on_today = move |_| on_change.run(Some(DateRange::single(today_local())));

    let on_current_month = move |_| {
        if let Some((start, end)) = month_bounds(today_local()) {
            on_change.run(Some(DateRange::new(start, Some(end))));
        }
    };

    view! {
        <Flex vertical=true gap=FlexGap::Small>
            {label.map(|l| view! { <Label>{l}</Label> })}
            <Flex class="date-range-picker" align=FlexAlign::Center gap=FlexGap::Small>
                <input
                    type="date"
                    title="De"
                    prop:value=move || to_input_value(value.get().map(|r| r.from))
                    on:change=move |ev| on_from_change(event_target_value(&ev))
                />
                <span>"até"</span>
                <input
                    type="date"
                    title="Até"
                    prop:value=move || to_input_value(value.get().and_then(|r| r.to))
                    on:change=move |ev| on_to_change(event_target_value(&ev))
                />
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=on_today>
                    "Hoje"
                </Button>
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=on_current_month>
                    "Mês"
                </Button>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| on_change.run(None)
                    disabled=Signal::derive(move || value.get().is_none())
                >
                    "Limpar"
                </Button>
            </Flex>
        </Flex>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        assert_eq!(
            month_bounds(d),
            Some((
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
            ))
        );
        let d = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(month_bounds(d).map(|b| b.1), NaiveDate::from_ymd_opt(2023, 12, 31));
    }
}
