use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTone {
    Neutral,
    Good,
    Warning,
    Bad,
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// Formatted value (None = not loaded yet)
    #[prop(into)]
    value: Signal<Option<String>>,
    /// Visual status
    #[prop(optional, into)]
    tone: Signal<Option<StatTone>>,
    /// Optional subtitle below the value
    #[prop(optional, into)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let status_class = move || match tone.get().unwrap_or(StatTone::Neutral) {
        StatTone::Good => "stat-card stat-card--success",
        StatTone::Bad => "stat-card stat-card--error",
        StatTone::Warning => "stat-card stat-card--warning",
        StatTone::Neutral => "stat-card",
    };

    let formatted = move || value.get().unwrap_or_else(|| "—".to_string());

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class=status_class>
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {subtitle_view}
            </div>
        </div>
    }
}
