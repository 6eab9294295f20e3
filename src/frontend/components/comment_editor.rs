use crate::{
    common::{
        comment::Comment,
        newtypes::{CommentId, PostId},
    },
    frontend::{
        query::Query,
        thread::{CancelOutcome, ThreadState},
        utils::resources::{client, session},
    },
};
use leptos::{ev::MouseEvent, html::Textarea, prelude::*};
use leptos_use::{use_textarea_autosize, UseTextareaAutosizeReturn};

/// What the editor writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Top level comment on the post
    NewComment,
    Reply(CommentId),
    Edit(CommentId),
}

#[component]
pub fn CommentEditorView(
    post_id: PostId,
    mode: EditorMode,
    comments: Query<Vec<Comment>>,
    thread: RwSignal<ThreadState>,
) -> impl IntoView {
    let textarea_ref = NodeRef::<Textarea>::new();
    let UseTextareaAutosizeReturn {
        content,
        set_content,
        trigger_resize: _,
    } = use_textarea_autosize(textarea_ref);

    // replies and edits keep their draft in the thread state, so it survives refetches
    let initial = thread.with_untracked(|t| match mode {
        EditorMode::NewComment => String::new(),
        EditorMode::Reply(id) => t.reply_draft(id),
        EditorMode::Edit(id) => t.edit_draft(id),
    });
    set_content.set(initial);
    let store_draft = move |draft: String| match mode {
        EditorMode::NewComment => {}
        EditorMode::Reply(id) => thread.update(|t| t.set_reply_draft(id, draft)),
        EditorMode::Edit(id) => thread.update(|t| t.set_edit_draft(id, draft)),
    };

    let (error, set_error) = signal(None::<String>);
    let client = client();
    let session = session();
    let submit_action = Action::new(move |content: &String| {
        let content = content.clone();
        let client = client.clone();
        let user = session.user_untracked();
        async move {
            let res = match mode {
                EditorMode::NewComment => {
                    client
                        .create_comment(post_id, content, None, user.as_ref())
                        .await
                }
                EditorMode::Reply(id) => {
                    client
                        .create_comment(post_id, content, Some(id), user.as_ref())
                        .await
                }
                EditorMode::Edit(id) => client.update_comment(id, content, user.as_ref()).await,
            };
            match res {
                Ok(()) => {
                    set_error.set(None);
                    match mode {
                        EditorMode::NewComment => set_content.set(String::new()),
                        EditorMode::Reply(id) => thread.update(|t| t.reply_submitted(id)),
                        EditorMode::Edit(id) => thread.update(|t| t.stop_edit(id)),
                    }
                    comments.invalidate();
                }
                Err(e) => set_error.set(Some(e.message())),
            }
        }
    });

    let cancel = move |_: MouseEvent| match mode {
        EditorMode::NewComment => {}
        EditorMode::Reply(id) => {
            let outcome = thread
                .try_update(|t| t.cancel_reply(id, false))
                .unwrap_or(CancelOutcome::Closed);
            if outcome == CancelOutcome::Closed {
                set_error.set(None);
            }
        }
        EditorMode::Edit(id) => thread.update(|t| t.stop_edit(id)),
    };
    let (placeholder, submit_label) = match mode {
        EditorMode::NewComment => ("Write a comment...", "Comment"),
        EditorMode::Reply(_) => ("Write a reply...", "Reply"),
        EditorMode::Edit(_) => ("", "Save"),
    };

    view! {
        <div class="my-2">
            <textarea
                prop:value=content
                placeholder=placeholder
                class="w-full resize-none textarea textarea-secondary min-h-10"
                on:input=move |evt| {
                    let val = event_target_value(&evt);
                    set_content.set(val.clone());
                    store_draft(val);
                }
                node_ref=textarea_ref
            ></textarea>
            <Show when=move || error.get().is_some()>
                <p class="text-sm text-error">{move || error.get()}</p>
            </Show>
            <div class="flex items-center mt-2 h-min">
                <button
                    class="btn btn-secondary btn-sm"
                    disabled=move || submit_action.pending().get()
                    on:click=move |_| {
                        submit_action.dispatch(content.get_untracked());
                    }
                >
                    {submit_label}
                </button>
                <Show when=move || mode != EditorMode::NewComment>
                    <button class="ml-2 btn btn-outline btn-sm" on:click=cancel>
                        Cancel
                    </button>
                </Show>
            </div>
        </div>
    }
}
