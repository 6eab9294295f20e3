use leptos::prelude::*;

/// Modal asking the user to confirm a destructive action.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] open: Signal<bool>,
    message: &'static str,
    confirm_label: &'static str,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal modal-open">
                <div class="modal-box">
                    <p class="py-4">{message}</p>
                    <div class="modal-action">
                        <button class="btn btn-outline" on:click=move |_| on_cancel.run(())>
                            Cancel
                        </button>
                        <button class="btn btn-error" on:click=move |_| on_confirm.run(())>
                            {confirm_label}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
