use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Cancel-on-retrigger timer.
///
/// Scheduling replaces (and thereby cancels) the pending call. The pending
/// call is also dropped when the owning component unmounts; it is not flushed.
#[derive(Clone, Copy)]
pub struct Debouncer {
    pending: StoredValue<Option<Timeout>, LocalStorage>,
    delay_ms: u32,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            pending: StoredValue::new_local(None),
            delay_ms,
        }
    }

    pub fn schedule<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        let timeout = Timeout::new(self.delay_ms, f);
        self.pending.set_value(Some(timeout));
    }

    pub fn cancel(&self) {
        self.pending.set_value(None);
    }
}
