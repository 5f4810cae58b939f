use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Overlay plus positioned surface with a title bar.
///
/// `drawer=true` docks the surface to the right edge (record details).
/// Escape and a click on the overlay both close it.
#[component]
pub fn ModalFrame(
    #[prop(into)]
    title: Signal<String>,
    /// Called when the modal should close
    on_close: Callback<()>,
    #[prop(optional)]
    drawer: bool,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    // Deferred to the next tick: the overlay must not be removed during its own click dispatch
    let close = move || {
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Close only when press and release both happen on the overlay
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            close();
        }
    };

    let key_handle = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            close();
        }
    });
    on_cleanup(move || key_handle.remove());

    let surface_class = if drawer { "modal modal--drawer" } else { "modal" };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class=surface_class on:click=|ev| ev.stop_propagation()>
                <div class="modal__header">
                    <h2 class="modal__title">{move || title.get()}</h2>
                    <button class="modal__close" title="Fechar" on:click=move |_| close()>
                        {crate::shared::icons::icon("x")}
                    </button>
                </div>
                <div class="modal__body">{children()}</div>
            </div>
        </div>
    }
}
