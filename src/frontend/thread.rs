//! View state of a comment thread, kept apart from the comment data so that a refetch
//! which replaces the tree leaves open reply forms, drafts and collapsed branches alone.

use crate::common::{
    comment::{walk_forest, CommentNode},
    newtypes::{CommentId, PostId, UserId},
    user::SessionUser,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeViewState {
    pub reply_open: bool,
    pub collapsed: bool,
    pub reply_draft: String,
    pub editing: bool,
    pub edit_draft: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyGate {
    Opened,
    /// Nobody is signed in. The form opens once a user signs in.
    AuthRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Closed,
    /// The draft is not empty, ask before throwing it away.
    NeedsConfirmation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadState {
    nodes: HashMap<CommentId, NodeViewState>,
    pending_reply: Option<CommentId>,
    pending_cancel: Option<CommentId>,
    pending_delete: Option<CommentId>,
}

impl ThreadState {
    pub fn node(&self, id: CommentId) -> Option<&NodeViewState> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: CommentId) -> &mut NodeViewState {
        self.nodes.entry(id).or_default()
    }

    pub fn is_collapsed(&self, id: CommentId) -> bool {
        self.node(id).is_some_and(|n| n.collapsed)
    }

    /// Collapsing only applies to comments with replies. Returns the new state.
    pub fn toggle_collapsed(&mut self, node: &CommentNode) -> bool {
        if !node.has_children() {
            return false;
        }
        let state = self.node_mut(node.comment.id);
        state.collapsed = !state.collapsed;
        state.collapsed
    }

    pub fn request_reply(&mut self, id: CommentId, user: Option<&SessionUser>) -> ReplyGate {
        if user.is_none() {
            self.pending_reply = Some(id);
            return ReplyGate::AuthRequired;
        }
        self.node_mut(id).reply_open = true;
        ReplyGate::Opened
    }

    /// Opens the reply form that was requested before signing in, if there is one.
    pub fn resume_pending_reply(&mut self, user: Option<&SessionUser>) -> Option<CommentId> {
        user?;
        let id = self.pending_reply.take()?;
        self.node_mut(id).reply_open = true;
        Some(id)
    }

    pub fn pending_reply(&self) -> Option<CommentId> {
        self.pending_reply
    }

    pub fn discard_pending_reply(&mut self) {
        self.pending_reply = None;
    }

    /// The form is never shown to anonymous users, even if it was opened earlier in a
    /// session that has since ended.
    pub fn is_reply_open(&self, id: CommentId, user: Option<&SessionUser>) -> bool {
        user.is_some() && self.node(id).is_some_and(|n| n.reply_open)
    }

    pub fn reply_draft(&self, id: CommentId) -> String {
        self.node(id)
            .map(|n| n.reply_draft.clone())
            .unwrap_or_default()
    }

    pub fn set_reply_draft(&mut self, id: CommentId, draft: String) {
        self.node_mut(id).reply_draft = draft;
    }

    pub fn cancel_reply(&mut self, id: CommentId, confirmed: bool) -> CancelOutcome {
        let state = self.node_mut(id);
        if !confirmed && !state.reply_draft.trim().is_empty() {
            self.pending_cancel = Some(id);
            return CancelOutcome::NeedsConfirmation;
        }
        state.reply_open = false;
        state.reply_draft.clear();
        self.pending_cancel = None;
        CancelOutcome::Closed
    }

    pub fn pending_cancel(&self) -> Option<CommentId> {
        self.pending_cancel
    }

    pub fn dismiss_cancel(&mut self) {
        self.pending_cancel = None;
    }

    /// Called once the gateway accepted the reply.
    pub fn reply_submitted(&mut self, id: CommentId) {
        let state = self.node_mut(id);
        state.reply_open = false;
        state.reply_draft.clear();
    }

    pub fn start_edit(&mut self, id: CommentId, content: &str) {
        let state = self.node_mut(id);
        state.editing = true;
        state.edit_draft = content.to_string();
    }

    pub fn is_editing(&self, id: CommentId) -> bool {
        self.node(id).is_some_and(|n| n.editing)
    }

    pub fn edit_draft(&self, id: CommentId) -> String {
        self.node(id)
            .map(|n| n.edit_draft.clone())
            .unwrap_or_default()
    }

    pub fn set_edit_draft(&mut self, id: CommentId, draft: String) {
        self.node_mut(id).edit_draft = draft;
    }

    pub fn stop_edit(&mut self, id: CommentId) {
        let state = self.node_mut(id);
        state.editing = false;
        state.edit_draft.clear();
    }

    pub fn request_delete(&mut self, id: CommentId) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<CommentId> {
        self.pending_delete
    }

    pub fn take_pending_delete(&mut self) -> Option<CommentId> {
        self.pending_delete.take()
    }
}

/// One visible comment of a thread, flattened for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadLine {
    pub id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Nesting level, zero for top level comments
    pub depth: usize,
    pub reply_count: usize,
    pub collapsed: bool,
}

impl ThreadLine {
    pub fn has_children(&self) -> bool {
        self.reply_count > 0
    }

    pub fn is_written_by(&self, user: Option<&SessionUser>) -> bool {
        user.is_some_and(|u| u.id == self.user_id)
    }
}

/// Walks the forest depth first and lists every comment that is visible, that is every
/// comment without a collapsed ancestor. Replies follow their parent directly.
pub fn render_thread(roots: &[CommentNode], state: &ThreadState) -> Vec<ThreadLine> {
    let mut lines = Vec::new();
    let mut stack: Vec<(&CommentNode, usize)> = roots.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        let comment = &node.comment;
        let collapsed = node.has_children() && state.is_collapsed(comment.id);
        lines.push(ThreadLine {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            author: comment.author.clone(),
            content: comment.content.clone(),
            created_at: comment.created_at,
            depth,
            reply_count: node.children.len(),
            collapsed,
        });
        if !collapsed {
            stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
        }
    }
    lines
}

/// Finds a node anywhere in the forest.
pub fn find_node(roots: &[CommentNode], id: CommentId) -> Option<&CommentNode> {
    walk_forest(roots)
        .map(|(node, _)| node)
        .find(|node| node.comment.id == id)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::comment::{build_comment_tree, Comment};
    use pretty_assertions::assert_eq;

    fn comment(id: i64, parent: Option<i64>) -> Comment {
        Comment {
            id: CommentId(id),
            post_id: PostId(3),
            parent_comment_id: parent.map(CommentId),
            content: format!("comment {id}"),
            user_id: UserId::default(),
            author: "cook@example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    fn user() -> SessionUser {
        SessionUser {
            id: UserId::default(),
            email: "cook@example.com".to_string(),
            avatar_url: None,
            access_token: "token".to_string(),
        }
    }

    fn ids(lines: &[ThreadLine]) -> Vec<(i64, usize)> {
        lines.iter().map(|l| (l.id.0, l.depth)).collect()
    }

    fn scenario() -> Vec<CommentNode> {
        build_comment_tree(&[
            comment(10, None),
            comment(20, None),
            comment(11, Some(10)),
            comment(21, Some(20)),
        ])
    }

    #[test]
    fn test_render_depth_first() {
        let lines = render_thread(&scenario(), &ThreadState::default());
        assert_eq!(vec![(10, 0), (11, 1), (20, 0), (21, 1)], ids(&lines));
        assert!(lines[0].has_children());
        assert!(!lines[1].has_children());
    }

    #[test]
    fn test_collapse_hides_only_own_replies() {
        let tree = scenario();
        let mut state = ThreadState::default();
        let node = find_node(&tree, CommentId(10)).cloned();
        assert!(node.is_some_and(|n| state.toggle_collapsed(&n)));

        let lines = render_thread(&tree, &state);
        assert_eq!(vec![(10, 0), (20, 0), (21, 1)], ids(&lines));
        assert!(lines[0].collapsed);
        assert!(!lines[1].collapsed);
    }

    #[test]
    fn test_leaf_cannot_collapse() {
        let tree = scenario();
        let mut state = ThreadState::default();
        let leaf = find_node(&tree, CommentId(11)).cloned();
        assert_eq!(Some(false), leaf.map(|l| state.toggle_collapsed(&l)));
        assert!(!state.is_collapsed(CommentId(11)));
    }

    #[test]
    fn test_reply_requires_user() {
        let mut state = ThreadState::default();
        assert_eq!(ReplyGate::AuthRequired, state.request_reply(CommentId(10), None));
        assert!(!state.is_reply_open(CommentId(10), None));

        // nothing happens while still signed out
        assert_eq!(None, state.resume_pending_reply(None));

        let user = user();
        assert_eq!(Some(CommentId(10)), state.resume_pending_reply(Some(&user)));
        assert!(state.is_reply_open(CommentId(10), Some(&user)));
        assert!(!state.is_reply_open(CommentId(10), None));
        assert_eq!(None, state.resume_pending_reply(Some(&user)));
    }

    #[test]
    fn test_reply_state_is_per_node() {
        let user = user();
        let mut state = ThreadState::default();
        assert_eq!(ReplyGate::Opened, state.request_reply(CommentId(11), Some(&user)));
        state.set_reply_draft(CommentId(11), "Tambah garam".to_string());
        assert!(!state.is_reply_open(CommentId(21), Some(&user)));
        assert_eq!("", state.reply_draft(CommentId(21)));
        assert_eq!("Tambah garam", state.reply_draft(CommentId(11)));
    }

    #[test]
    fn test_cancel_with_draft_asks_first() {
        let user = user();
        let mut state = ThreadState::default();
        state.request_reply(CommentId(10), Some(&user));
        state.set_reply_draft(CommentId(10), "half written".to_string());

        assert_eq!(CancelOutcome::NeedsConfirmation, state.cancel_reply(CommentId(10), false));
        assert_eq!(Some(CommentId(10)), state.pending_cancel());
        assert!(state.is_reply_open(CommentId(10), Some(&user)));

        assert_eq!(CancelOutcome::Closed, state.cancel_reply(CommentId(10), true));
        assert_eq!(None, state.pending_cancel());
        assert!(!state.is_reply_open(CommentId(10), Some(&user)));
        assert_eq!("", state.reply_draft(CommentId(10)));
    }

    #[test]
    fn test_cancel_blank_draft_closes() {
        let user = user();
        let mut state = ThreadState::default();
        state.request_reply(CommentId(10), Some(&user));
        state.set_reply_draft(CommentId(10), "  ".to_string());
        assert_eq!(CancelOutcome::Closed, state.cancel_reply(CommentId(10), false));
    }

    #[test]
    fn test_state_survives_rebuild() {
        let mut state = ThreadState::default();
        let tree = scenario();
        if let Some(node) = find_node(&tree, CommentId(20)) {
            state.toggle_collapsed(node);
        }
        let mut comments = vec![
            comment(10, None),
            comment(20, None),
            comment(11, Some(10)),
            comment(21, Some(20)),
        ];
        comments.push(comment(22, Some(20)));
        let lines = render_thread(&build_comment_tree(&comments), &state);
        assert_eq!(vec![(10, 0), (11, 1), (20, 0)], ids(&lines));
        assert_eq!(2, lines[2].reply_count);
    }

    #[test]
    fn test_edit_starts_from_content() {
        let mut state = ThreadState::default();
        let c = comment(10, None);
        state.start_edit(c.id, &c.content);
        assert!(state.is_editing(CommentId(10)));
        assert_eq!("comment 10", state.edit_draft(CommentId(10)));
        state.stop_edit(CommentId(10));
        assert!(!state.is_editing(CommentId(10)));
    }

    #[test]
    fn test_declined_sign_in_forgets_reply() {
        let mut state = ThreadState::default();
        assert_eq!(ReplyGate::AuthRequired, state.request_reply(CommentId(21), None));
        state.discard_pending_reply();

        // a session that shows up later does not open the form
        let user = user();
        assert_eq!(None, state.resume_pending_reply(Some(&user)));
        assert!(!state.is_reply_open(CommentId(21), Some(&user)));
    }

    #[test]
    fn test_render_deep_chain() {
        let depth = 50_000;
        let comments: Vec<_> = (0..depth)
            .map(|id| comment(id, (id > 0).then_some(id - 1)))
            .collect();
        let tree = build_comment_tree(&comments);
        let mut state = ThreadState::default();

        let lines = render_thread(&tree, &state);
        assert_eq!(depth as usize, lines.len());
        let last = lines.last().map(|l| (l.id.0, l.depth));
        assert_eq!(Some((depth - 1, depth as usize - 1)), last);

        let middle = find_node(&tree, CommentId(depth / 2)).cloned();
        assert!(middle.is_some_and(|n| state.toggle_collapsed(&n)));
        assert_eq!(depth as usize / 2 + 1, render_thread(&tree, &state).len());
    }
}
