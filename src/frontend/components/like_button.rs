use crate::{
    common::{
        newtypes::PostId,
        vote::{VoteTally, VoteValue},
    },
    frontend::{
        query::{use_query, QueryKey},
        utils::{
            errors::FrontendResultExt,
            resources::{client, session},
        },
    },
};
use leptos::prelude::*;
use phosphor_leptos::{Icon, ARROW_FAT_DOWN, ARROW_FAT_UP};

#[component]
pub fn LikeButton(post_id: PostId) -> impl IntoView {
    let client = client();
    let session = session();
    let votes = use_query(QueryKey::Votes(post_id), {
        let client = client.clone();
        move || {
            let client = client.clone();
            async move { client.list_votes(post_id).await }
        }
    });
    let tally = Memo::new(move |_| {
        let user = session.user().map(|u| u.id);
        votes.with(|s| {
            s.data()
                .map(|v| VoteTally::new(v, user))
                .unwrap_or_default()
        })
    });

    let vote_action = Action::new(move |value: &VoteValue| {
        let value = *value;
        let client = client.clone();
        let user = session.user_untracked();
        async move {
            client
                .vote(post_id, value, user.as_ref())
                .await
                .error_popup(|_| votes.invalidate());
        }
    });
    let on_vote = move |value: VoteValue| {
        if session.user_untracked().is_none() {
            session.prompt_sign_in();
            return;
        }
        vote_action.dispatch(value);
    };
    let button_class = move |value: VoteValue| {
        if tally.get().mine == Some(value) {
            "btn btn-sm btn-primary"
        } else {
            "btn btn-sm btn-outline"
        }
    };

    view! {
        <div class="flex gap-2 items-center my-2">
            <button
                class=move || button_class(VoteValue::Like)
                disabled=move || vote_action.pending().get()
                on:click=move |_| on_vote(VoteValue::Like)
            >
                <Icon icon=ARROW_FAT_UP />
                {move || tally.get().likes}
            </button>
            <button
                class=move || button_class(VoteValue::Dislike)
                disabled=move || vote_action.pending().get()
                on:click=move |_| on_vote(VoteValue::Dislike)
            >
                <Icon icon=ARROW_FAT_DOWN />
                {move || tally.get().dislikes}
            </button>
        </div>
    }
}
