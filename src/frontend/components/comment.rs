use crate::{
    common::comment::{Comment, CommentNode},
    frontend::{
        components::comment_editor::{CommentEditorView, EditorMode},
        query::Query,
        thread::{find_node, ReplyGate, ThreadLine, ThreadState},
        utils::{formatting::created_time, resources::session},
    },
};
use leptos::{ev::MouseEvent, prelude::*};
use phosphor_leptos::{Icon, CARET_DOWN, CARET_UP, CHAT_CIRCLE_DOTS};

#[component]
pub fn CommentView(
    line: ThreadLine,
    tree: Memo<Vec<CommentNode>>,
    comments: Query<Vec<Comment>>,
    thread: RwSignal<ThreadState>,
) -> impl IntoView {
    let session = session();
    let id = line.id;
    let post_id = line.post_id;
    // css class is not included because its dynamically generated, need to use raw css instead of class
    let margin = line.depth * 2;
    let style_ = format!("margin-left: {margin}rem;");

    let reply_open = move || {
        let user = session.user();
        thread.with(|t| t.is_reply_open(id, user.as_ref()))
    };
    let editing = move || thread.with(|t| t.is_editing(id));
    let is_author = {
        let line = line.clone();
        move || line.is_written_by(session.user().as_ref())
    };

    let on_reply = move |_: MouseEvent| {
        let user = session.user_untracked();
        let gate = thread.try_update(|t| t.request_reply(id, user.as_ref()));
        if gate == Some(ReplyGate::AuthRequired) {
            session.prompt_sign_in();
        }
    };
    let on_collapse = move |_: MouseEvent| {
        tree.with_untracked(|roots| {
            if let Some(node) = find_node(roots, id) {
                thread.update(|t| {
                    t.toggle_collapsed(node);
                });
            }
        })
    };
    let content = line.content.clone();
    let on_edit = {
        let content = content.clone();
        move |_: MouseEvent| thread.update(|t| t.start_edit(id, &content))
    };
    let on_delete = move |_: MouseEvent| thread.update(|t| t.request_delete(id));
    let author = line.author.clone();
    let created_at = line.created_at;

    let collapse_toggle = line.has_children().then(|| {
        let (icon, label) = if line.collapsed {
            (CARET_DOWN, format!("Show {} replies", line.reply_count))
        } else {
            (CARET_UP, "Hide replies".to_string())
        };
        view! {
            " | "
            <a class="inline-flex gap-1 items-center link" on:click=on_collapse>
                <Icon icon=icon />
                {label}
            </a>
        }
    });

    view! {
        <div class="py-2 pl-4" style=style_ id=format!("comment-{id}")>
            <div class="flex gap-2 text-sm">
                <span class="font-semibold">{author}</span>
                <span class="opacity-60">{created_time(created_at)}</span>
            </div>
            <Show
                when=editing
                fallback=move || view! { <div class="whitespace-pre-wrap">{content.clone()}</div> }
            >
                <CommentEditorView post_id mode=EditorMode::Edit(id) comments thread />
            </Show>
            <div class="text-sm">
                <a class="inline-flex gap-1 items-center link" on:click=on_reply>
                    <Icon icon=CHAT_CIRCLE_DOTS />
                    Reply
                </a>
                {collapse_toggle}
                <Show when=is_author>
                    " | "
                    <a class="link" on:click=on_edit.clone()>
                        Edit
                    </a>
                    " | "
                    <a class="link" on:click=on_delete>
                        Delete
                    </a>
                </Show>
            </div>
            <Show when=reply_open>
                <CommentEditorView post_id mode=EditorMode::Reply(id) comments thread />
            </Show>
            <div class="m-0 divider"></div>
        </div>
    }
}
