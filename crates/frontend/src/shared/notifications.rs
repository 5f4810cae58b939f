//! Toast notifications.
//!
//! Provided once at the app root; any component can call
//! `use_notifications().error("Título", Some(detail))`.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use super::config::TOAST_TIMEOUT_MS;
use super::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
            ToastKind::Info => "toast toast--info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub detail: Option<String>,
}

/// Ordered toast list, newest last.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, title: String, detail: Option<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            kind,
            title,
            detail: detail.filter(|d| !d.trim().is_empty()),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    queue: RwSignal<ToastQueue>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    fn show(&self, kind: ToastKind, title: &str, detail: Option<String>) {
        let mut id = 0;
        self.queue
            .update(|q| id = q.push(kind, title.to_string(), detail));

        let queue = self.queue;
        Timeout::new(TOAST_TIMEOUT_MS, move || {
            queue.update(|q| q.dismiss(id));
        })
        .forget();
    }

    pub fn success(&self, title: &str, detail: Option<String>) {
        self.show(ToastKind::Success, title, detail);
    }

    pub fn error(&self, title: &str, detail: Option<String>) {
        log::error!("{}: {}", title, detail.as_deref().unwrap_or(""));
        self.show(ToastKind::Error, title, detail);
    }

    pub fn info(&self, title: &str, detail: Option<String>) {
        self.show(ToastKind::Info, title, detail);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not provided in context")
}

/// Renders the active toasts in the bottom-right corner.
#[component]
pub fn Toaster() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="toaster" aria-live="polite">
            <For
                each=move || service.queue.with(|q| q.items().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() role="status">
                            <div class="toast__body">
                                <div class="toast__title">{toast.title.clone()}</div>
                                {toast.detail.clone().map(|d| view! { <div class="toast__detail">{d}</div> })}
                            </div>
                            <button
                                class="toast__close"
                                title="Fechar"
                                on:click=move |_| service.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_push_and_dismiss() {
        let mut q = ToastQueue::default();
        let a = q.push(ToastKind::Success, "Pago".into(), None);
        let b = q.push(ToastKind::Error, "Falhou".into(), Some("  ".into()));
        assert_ne!(a, b);
        assert_eq!(q.items().len(), 2);
        assert_eq!(q.items()[1].detail, None);

        q.dismiss(a);
        assert_eq!(q.items().len(), 1);
        assert_eq!(q.items()[0].id, b);

        // dismissing twice is harmless
        q.dismiss(a);
        assert_eq!(q.items().len(), 1);
    }
}
