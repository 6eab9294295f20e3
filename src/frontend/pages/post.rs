use crate::{
    common::newtypes::PostId,
    frontend::{
        components::{
            comment_section::CommentSection,
            like_button::LikeButton,
            suspense_error::SuspenseError,
        },
        utils::{
            errors::{FrontendError, FrontendResult},
            formatting::{created_time, multiline_text},
            resources::client,
        },
    },
};
use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_params_map;

fn post_id_param() -> FrontendResult<PostId> {
    let id = use_params_map().get_untracked().get("id").unwrap_or_default();
    id.parse()
        .map(PostId)
        .map_err(|_| FrontendError::Invalid(format!("Invalid post id {id}")))
}

#[component]
pub fn PostDetail() -> impl IntoView {
    let client = client();
    let post_id = post_id_param();
    let post = Resource::new(
        move || post_id.clone(),
        move |post_id| {
            let client = client.clone();
            async move { client.get_post(post_id?).await }
        },
    );

    view! {
        <SuspenseError>
            {move || Suspend::new(async move {
                let post = post.await?;
                let post_id = post.id;
                Ok::<_, FrontendError>(
                    view! {
                        <Title text=post.title.clone() />
                        <article class="mx-auto max-w-3xl">
                            <h1 class="my-6 font-serif text-4xl font-bold text-center text-primary">
                                {post.title.clone()}
                            </h1>
                            <img
                                src=post.image_url.clone()
                                alt=post.title
                                class="object-cover mx-auto w-full max-h-96 rounded-box"
                            />
                            <div class="my-4">{multiline_text(&post.content)}</div>
                            <p class="text-sm opacity-60">"Posted " {created_time(post.created_at)}</p>
                            <LikeButton post_id />
                            <CommentSection post_id />
                        </article>
                    },
                )
            })}
        </SuspenseError>
    }
}
