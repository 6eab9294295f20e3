use crate::frontend::utils::resources::session;
use leptos::prelude::*;

/// Shown when an action needs a signed in user.
#[component]
pub fn AuthPrompt() -> impl IntoView {
    let session = session();
    view! {
        <Show when=move || session.is_prompt_open()>
            <div class="modal modal-open">
                <div class="modal-box">
                    <h3 class="text-lg font-bold">"Sign in required"</h3>
                    <p class="py-4">"You need to be signed in to do this."</p>
                    <div class="modal-action">
                        <button class="btn btn-outline" on:click=move |_| session.dismiss_prompt()>
                            Cancel
                        </button>
                        <button
                            class="btn btn-primary"
                            on:click=move |_| {
                                session.dismiss_prompt();
                                session.sign_in();
                            }
                        >
                            "Sign in with Google"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
