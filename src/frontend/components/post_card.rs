use crate::{common::post::Post, frontend::utils::formatting::post_path};
use leptos::prelude::*;
use phosphor_leptos::{Icon, ARROW_FAT_UP, CHAT_CIRCLE_DOTS};

/// Entry of the post grid on the home page.
#[component]
pub fn PostCard(post: Post) -> impl IntoView {
    let avatar = match post.avatar_url.clone() {
        Some(url) => view! { <img src=url alt="" class="object-cover rounded-full size-9" /> }
            .into_any(),
        None => view! { <div class="rounded-full size-9 bg-secondary"></div> }.into_any(),
    };
    view! {
        <a href=post_path(post.id) class="w-80 shadow-xl transition-transform card bg-base-100 hover:scale-105">
            <div class="card-body">
                <div class="flex gap-2 items-center">
                    {avatar}
                    <h3 class="font-bold card-title">{post.title.clone()}</h3>
                </div>
                <img src=post.image_url.clone() alt=post.title class="object-cover max-h-36 rounded-box" />
                <div class="flex justify-around">
                    <span class="flex gap-1 items-center">
                        <Icon icon=ARROW_FAT_UP />
                        {post.like_count.unwrap_or_default()}
                    </span>
                    <span class="flex gap-1 items-center">
                        <Icon icon=CHAT_CIRCLE_DOTS />
                        {post.comment_count.unwrap_or_default()}
                    </span>
                </div>
            </div>
        </a>
    }
}
