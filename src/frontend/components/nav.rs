use crate::frontend::utils::resources::session;
use leptos::prelude::*;
use phosphor_leptos::{Icon, CARDS, HOUSE, PLUS};

#[component]
pub fn Nav() -> impl IntoView {
    let session = session();
    view! {
        <nav class="sticky top-0 z-40 shadow-lg navbar bg-primary text-primary-content">
            <div class="navbar-start">
                <a href="/" class="font-mono text-xl font-bold">
                    "Resep"
                </a>
            </div>
            <div class="navbar-center">
                <ul class="px-1 menu menu-horizontal">
                    <li>
                        <a href="/">
                            <Icon icon=HOUSE />
                            "Home"
                        </a>
                    </li>
                    <li>
                        <a href="/create">
                            <Icon icon=PLUS />
                            "Add Recipe"
                        </a>
                    </li>
                    <li>
                        <a href="/categories">
                            <Icon icon=CARDS />
                            "Categories"
                        </a>
                    </li>
                </ul>
            </div>
            <div class="navbar-end">
                <Show
                    when=move || session.is_logged_in()
                    fallback=move || {
                        view! {
                            <button class="btn btn-sm btn-info" on:click=move |_| session.sign_in()>
                                "Sign in with Google"
                            </button>
                        }
                    }
                >
                    {move || {
                        session
                            .user()
                            .map(|user| {
                                let avatar = user
                                    .avatar_url
                                    .clone()
                                    .map(|url| {
                                        view! {
                                            <img
                                                src=url
                                                alt=""
                                                class="object-cover rounded-full size-8"
                                            />
                                        }
                                    });
                                view! {
                                    <div class="flex gap-3 items-center">
                                        {avatar}
                                        <span class="text-sm max-sm:hidden">
                                            {user.display_name().to_string()}
                                        </span>
                                        <button
                                            class="btn btn-sm btn-error"
                                            on:click=move |_| session.sign_out()
                                        >
                                            "Sign out"
                                        </button>
                                    </div>
                                }
                            })
                    }}
                </Show>
            </div>
        </nav>
    }
}
