use leptos::prelude::*;

/// Displays the message which [FrontendResultExt::error_popup] stored in context.
///
/// [FrontendResultExt::error_popup]: crate::frontend::utils::errors::FrontendResultExt::error_popup
#[component]
pub fn ErrorPopup(message: ReadSignal<Option<String>>, set_message: WriteSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="toast">
                <div class="alert alert-error">
                    <span>{move || message.get()}</span>
                    <button class="btn btn-ghost btn-xs" on:click=move |_| set_message.set(None)>
                        Close
                    </button>
                </div>
            </div>
        </Show>
    }
}
