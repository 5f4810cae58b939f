use contracts::domain::a001_payable::PayableStats;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_payable::api;
use crate::shared::components::stat_card::{StatCard, StatTone};
use crate::shared::components::table::format_brl;

/// Counters above the list. `None` until the first successful load; a
/// failed reload keeps the previous values.
#[derive(Clone, Copy)]
pub struct PayableStatsHook {
    pub stats: RwSignal<Option<PayableStats>>,
    pub loading: RwSignal<bool>,
}

pub fn use_payable_stats() -> PayableStatsHook {
    let hook = PayableStatsHook {
        stats: RwSignal::new(None),
        loading: RwSignal::new(false),
    };
    hook.refetch();
    hook
}

impl PayableStatsHook {
    pub fn refetch(&self) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            match api::fetch_stats().await {
                Ok(stats) => this.stats.set(Some(stats)),
                Err(e) => log::warn!("payables: failed to load statistics: {}", e),
            }
            this.loading.set(false);
        });
    }
}

#[component]
pub fn PayableStatsCards(hook: PayableStatsHook) -> impl IntoView {
    let stats = hook.stats;
    let pick = move |f: fn(&PayableStats) -> String| Signal::derive(move || stats.get().as_ref().map(f));

    let overdue_tone = Signal::derive(move || {
        stats.get().map(|s| {
            if s.overdue.count > 0 {
                StatTone::Bad
            } else {
                StatTone::Good
            }
        })
    });

    view! {
        <div class="stat-cards">
            <StatCard
                label="Total pendente"
                icon_name="payments"
                value=pick(|s| format_brl(s.total_pending))
            />
            <StatCard
                label="Vencidas"
                icon_name="alert"
                value=pick(|s| s.overdue.count.to_string())
                tone=overdue_tone
                subtitle=pick(|s| format_brl(s.overdue.amount))
            />
            <StatCard
                label="Pagas hoje"
                icon_name="check"
                value=pick(|s| s.paid_today.to_string())
                tone=Signal::derive(move || stats.get().map(|_| StatTone::Good))
            />
            <StatCard
                label="Próximos vencimentos"
                icon_name="calendar"
                value=pick(|s| s.upcoming_due.to_string())
                tone=Signal::derive(move || {
                    stats.get().map(|s| if s.upcoming_due > 0 { StatTone::Warning } else { StatTone::Neutral })
                })
            />
        </div>
    }
}
