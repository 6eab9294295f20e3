use crate::{
    common::{
        comment::{build_comment_tree, CommentNode},
        newtypes::{CommentId, PostId},
    },
    frontend::{
        components::{
            comment::CommentView,
            comment_editor::{CommentEditorView, EditorMode},
            confirm_dialog::ConfirmDialog,
        },
        query::{use_query, QueryKey},
        thread::{render_thread, ThreadState},
        utils::{
            errors::FrontendResultExt,
            resources::{client, session},
        },
    },
};
use leptos::prelude::*;

/// All comments of a post as nested threads, plus the form for a new top level comment.
#[component]
pub fn CommentSection(post_id: PostId) -> impl IntoView {
    let client = client();
    let session = session();
    let comments = use_query(QueryKey::Comments(post_id), {
        let client = client.clone();
        move || {
            let client = client.clone();
            async move { client.list_comments(post_id).await }
        }
    });

    let tree = Memo::new(move |_| {
        comments.with(|s| s.data().map(|c| build_comment_tree(c.as_slice())).unwrap_or_default())
    });
    let thread = RwSignal::new(ThreadState::default());
    let lines = Memo::new(move |_| tree.with(|roots| thread.with(|t| render_thread(roots, t))));
    let comment_count =
        move || tree.with(|roots| roots.iter().map(CommentNode::subtree_len).sum::<usize>());

    // a reply requested while signed out opens once somebody signs in
    Effect::new(move |_| {
        let user = session.user();
        if user.is_some() && thread.with_untracked(|t| t.pending_reply().is_some()) {
            thread.update(|t| {
                t.resume_pending_reply(user.as_ref());
            });
        }
    });

    // closing the sign in prompt without signing in drops the requested reply
    Effect::new(move |was_open: Option<bool>| {
        let open = session.is_prompt_open();
        if was_open == Some(true) && !open && session.user_untracked().is_none() {
            thread.update(|t| t.discard_pending_reply());
        }
        open
    });

    let delete_action = Action::new(move |id: &CommentId| {
        let id = *id;
        let client = client.clone();
        let user = session.user_untracked();
        async move {
            client
                .delete_comment(id, user.as_ref())
                .await
                .error_popup(|_| comments.invalidate());
        }
    });

    view! {
        <div class="mt-6">
            <h2 class="font-serif text-xl font-bold">
                "Comments (" {comment_count} ")"
            </h2>
            <Show
                when=move || session.is_logged_in()
                fallback=move || {
                    view! {
                        <p class="my-2 text-sm">
                            <a class="link" on:click=move |_| session.sign_in()>
                                "Sign in"
                            </a>
                            " to join the discussion."
                        </p>
                    }
                }
            >
                <CommentEditorView post_id mode=EditorMode::NewComment comments thread />
            </Show>
            {move || {
                comments
                    .with(|s| s.error().map(|e| e.message()))
                    .map(|message| view! { <div class="my-2 alert alert-error">{message}</div> })
            }}
            <Show when=move || comments.with(|s| s.is_loading())>"Loading..."</Show>
            <Show when=move || comments.with(|s| s.is_refreshing())>
                <p class="text-sm opacity-60">"Updating..."</p>
            </Show>
            <Show when=move || comments.with(|s| s.data().is_some_and(Vec::is_empty))>
                <p class="my-2">"No comments yet."</p>
            </Show>
            <div>
                <For
                    each=move || lines.get()
                    key=|line| (line.id, line.collapsed, line.reply_count, line.content.clone())
                    children=move |line| view! { <CommentView line tree comments thread /> }
                />
            </div>
            <ConfirmDialog
                open=Signal::derive(move || thread.with(|t| t.pending_delete().is_some()))
                message="Delete this comment?"
                confirm_label="Delete"
                on_confirm=Callback::new(move |_| {
                    if let Some(id) = thread.try_update(|t| t.take_pending_delete()).flatten() {
                        delete_action.dispatch(id);
                    }
                })
                on_cancel=Callback::new(move |_| {
                    thread.update(|t| {
                        t.take_pending_delete();
                    })
                })
            />
            <ConfirmDialog
                open=Signal::derive(move || thread.with(|t| t.pending_cancel().is_some()))
                message="Discard your reply?"
                confirm_label="Discard"
                on_confirm=Callback::new(move |_| {
                    thread.update(|t| {
                        if let Some(id) = t.pending_cancel() {
                            t.cancel_reply(id, true);
                        }
                    })
                })
                on_cancel=Callback::new(move |_| thread.update(|t| t.dismiss_cancel()))
            />
        </div>
    }
}
