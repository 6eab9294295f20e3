use crate::frontend::{
    components::{post_card::PostCard, suspense_error::SuspenseError},
    utils::{errors::FrontendError, resources::client},
};
use leptos::prelude::*;
use leptos_meta::Title;

#[component]
pub fn Home() -> impl IntoView {
    let client = client();
    let posts = Resource::new(
        || (),
        move |_| {
            let client = client.clone();
            async move { client.list_posts().await }
        },
    );

    view! {
        <Title text="Recent Posts" />
        <h1 class="my-8 font-serif text-5xl font-bold text-center text-primary">
            "Recent Posts"
        </h1>
        <SuspenseError>
            {move || Suspend::new(async move {
                let posts = posts.await?;
                let is_empty = posts.is_empty();
                Ok::<_, FrontendError>(
                    view! {
                        <Show when=move || is_empty>
                            <p class="text-center">"No recipes yet."</p>
                        </Show>
                        <div class="grid grid-cols-1 gap-6 justify-items-center md:grid-cols-2 lg:grid-cols-3">
                            {posts
                                .into_iter()
                                .map(|post| view! { <PostCard post /> })
                                .collect::<Vec<_>>()}
                        </div>
                    },
                )
            })}
        </SuspenseError>
    }
}
