use crate::frontend::{api::auth::access_token_from_fragment, utils::resources::session};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use log::warn;

/// Landing page of the OAuth redirect. The access token arrives in the url fragment,
/// which never reaches the server, so it is picked up once the page runs in the browser.
#[component]
pub fn AuthCallback() -> impl IntoView {
    let session = session();
    let navigate = use_navigate();
    let (failed, set_failed) = signal(false);

    Effect::new(move |_| {
        let fragment = location().hash().unwrap_or_default();
        match access_token_from_fragment(&fragment) {
            Some(token) => {
                session.complete_sign_in(token);
                navigate("/", Default::default());
            }
            None => {
                warn!("Sign in callback without access token");
                set_failed.set(true);
            }
        }
    });

    view! {
        <Show when=move || failed.get() fallback=|| view! { <p class="my-8 text-center">"Signing in..."</p> }>
            <div class="grid place-items-center my-8">
                <div class="alert alert-error w-fit">
                    "Sign in failed. " <a class="link" href="/">"Back to the recipes"</a>
                </div>
            </div>
        </Show>
    }
}
