use super::newtypes::{CommentId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A row of the `comments` table, in the order the gateway returns it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub parent_comment_id: Option<CommentId>,
    pub content: String,
    pub user_id: UserId,
    /// Display name of the author when the comment was written
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Comment together with its direct replies, oldest first.
///
/// Threads have no depth limit. Walks, `Clone`, `PartialEq` and `Drop` keep an explicit
/// stack and never recurse per nesting level.
#[derive(Debug)]
pub struct CommentNode {
    pub comment: Comment,
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of comments in this subtree, including the node itself.
    pub fn subtree_len(&self) -> usize {
        self.walk().count()
    }

    /// This node and everything below it, parents before replies, each with its depth
    /// relative to `self`.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(self, 0)],
        }
    }
}

impl Clone for CommentNode {
    fn clone(&self) -> Self {
        let nodes = self.walk().map(|(n, depth)| (n.comment.clone(), depth));
        let mut roots = from_preorder(nodes);
        match roots.pop() {
            Some(node) => node,
            None => CommentNode {
                comment: self.comment.clone(),
                children: vec![],
            },
        }
    }
}

impl PartialEq for CommentNode {
    fn eq(&self, other: &Self) -> bool {
        self.walk()
            .map(|(n, depth)| (&n.comment, depth))
            .eq(other.walk().map(|(n, depth)| (&n.comment, depth)))
    }
}

impl Drop for CommentNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Depth first iterator over comment nodes, see [CommentNode::walk].
pub struct Walk<'a> {
    stack: Vec<(&'a CommentNode, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (&'a CommentNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
        Some((node, depth))
    }
}

/// Walks all threads of a forest in display order.
pub fn walk_forest(roots: &[CommentNode]) -> Walk<'_> {
    Walk {
        stack: roots.iter().rev().map(|n| (n, 0)).collect(),
    }
}

/// Turns comments listed parents first, each with its depth, back into a forest.
fn from_preorder(nodes: impl IntoIterator<Item = (Comment, usize)>) -> Vec<CommentNode> {
    // the chain from a root down to the last node seen, still collecting replies
    let mut open: Vec<CommentNode> = Vec::new();
    let mut roots = Vec::new();
    for (comment, depth) in nodes {
        while open.len() > depth {
            close_last(&mut open, &mut roots);
        }
        open.push(CommentNode {
            comment,
            children: vec![],
        });
    }
    while !open.is_empty() {
        close_last(&mut open, &mut roots);
    }
    roots
}

fn close_last(open: &mut Vec<CommentNode>, roots: &mut Vec<CommentNode>) {
    if let Some(node) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// Builds the reply forest for one post from its comments in ascending `created_at` order.
///
/// Comments whose parent is not part of `comments` become roots, as do comments whose
/// parent chain loops back onto itself. Siblings keep the input order. Ids are expected to
/// be unique; for duplicates the last comment with a given id wins.
pub fn build_comment_tree(comments: &[Comment]) -> Vec<CommentNode> {
    let index: HashMap<CommentId, usize> = comments
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id, i))
        .collect();

    // Effective parent of every comment, by position in the input. Dangling references
    // resolve to None here and the comment ends up as a root.
    let mut parent_of: Vec<Option<usize>> = comments
        .iter()
        .map(|c| c.parent_comment_id.and_then(|p| index.get(&p).copied()))
        .collect();
    break_cycles(&mut parent_of);

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); comments.len()];
    let mut roots = Vec::new();
    for (i, comment) in comments.iter().enumerate() {
        if index.get(&comment.id) != Some(&i) {
            continue;
        }
        match parent_of[i] {
            Some(parent) => children[parent].push(i),
            None => roots.push(i),
        }
    }

    let mut order = Vec::with_capacity(comments.len());
    let mut stack: Vec<(usize, usize)> = roots.iter().rev().map(|&i| (i, 0)).collect();
    while let Some((i, depth)) = stack.pop() {
        order.push((comments[i].clone(), depth));
        stack.extend(children[i].iter().rev().map(|&c| (c, depth + 1)));
    }
    from_preorder(order)
}

/// Cuts one parent link per cycle so every comment stays reachable from a root. The
/// comment where the walk re-enters the loop becomes the root of that thread. Each
/// position is visited once overall.
fn break_cycles(parent_of: &mut [Option<usize>]) {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        InProgress,
        Done,
    }
    let mut mark = vec![Mark::Unvisited; parent_of.len()];
    for start in 0..parent_of.len() {
        let mut path = Vec::new();
        let mut current = Some(start);
        while let Some(i) = current {
            match mark[i] {
                Mark::Done => break,
                Mark::InProgress => {
                    // `i` closes a loop; cut its parent link
                    parent_of[i] = None;
                    break;
                }
                Mark::Unvisited => {
                    mark[i] = Mark::InProgress;
                    path.push(i);
                    current = parent_of[i];
                }
            }
        }
        for i in path {
            mark[i] = Mark::Done;
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CreateCommentParams {
    pub post_id: PostId,
    pub content: String,
    pub parent_comment_id: Option<CommentId>,
    pub user_id: UserId,
    pub author: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EditCommentParams {
    pub content: String,
}
