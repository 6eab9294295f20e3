use crate::frontend::{
    components::suspense_error::SuspenseError,
    utils::{errors::FrontendError, formatting::created_time, resources::client},
};
use leptos::prelude::*;
use leptos_meta::Title;
use phosphor_leptos::{Icon, PLUS};

#[component]
pub fn Categories() -> impl IntoView {
    let client = client();
    let categories = Resource::new(
        || (),
        move |_| {
            let client = client.clone();
            async move { client.list_categories().await }
        },
    );

    view! {
        <Title text="Categories" />
        <div class="flex justify-between items-center my-8">
            <h1 class="font-serif text-4xl font-bold text-primary">"Categories"</h1>
            <a class="btn btn-primary btn-sm" href="/category/create">
                <Icon icon=PLUS />
                "New Category"
            </a>
        </div>
        <SuspenseError>
            {move || Suspend::new(async move {
                let categories = categories.await?;
                let is_empty = categories.is_empty();
                Ok::<_, FrontendError>(
                    view! {
                        <Show when=move || is_empty>
                            <p>"No categories yet."</p>
                        </Show>
                        <ul class="space-y-2">
                            {categories
                                .into_iter()
                                .map(|c| {
                                    view! {
                                        <li class="shadow card bg-base-100">
                                            <div class="p-4 card-body">
                                                <div class="flex justify-between">
                                                    <h2 class="card-title">{c.name}</h2>
                                                    <span class="text-sm opacity-60">
                                                        {created_time(c.created_at)}
                                                    </span>
                                                </div>
                                                <p>{c.description}</p>
                                            </div>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </ul>
                    },
                )
            })}
        </SuspenseError>
    }
}
