use std::collections::{HashMap, HashSet};

use shared_types::{Comment, CommentThread};

use crate::CoreError;

/// How many reply levels may hang below a top-level comment
pub const MAX_REPLY_DEPTH: usize = 5;

/// Check that a reply to `parent_id` on `task_id` may be created.
///
/// `existing` holds the task's comments, plus the parent itself when it was
/// looked up separately. Returns the depth the new reply will have, where a
/// top-level comment is at depth 0.
pub fn validate_reply(
    task_id: i64,
    parent_id: i64,
    existing: &[Comment],
) -> Result<usize, CoreError> {
    let by_id: HashMap<i64, &Comment> = existing.iter().map(|c| (c.id, c)).collect();

    let parent = by_id
        .get(&parent_id)
        .ok_or(CoreError::ParentNotFound { parent_id, task_id })?;

    if parent.task_id != task_id {
        return Err(CoreError::ParentInOtherTask { parent_id });
    }

    let depth = depth_of(parent, &by_id) + 1;
    if depth > MAX_REPLY_DEPTH {
        return Err(CoreError::ThreadTooDeep {
            max: MAX_REPLY_DEPTH,
        });
    }

    Ok(depth)
}

fn depth_of(comment: &Comment, by_id: &HashMap<i64, &Comment>) -> usize {
    let mut depth = 0;
    let mut visited = HashSet::from([comment.id]);
    let mut current = comment;

    while let Some(parent_id) = current.parent_comment_id {
        match by_id.get(&parent_id) {
            Some(parent) if visited.insert(parent.id) => {
                depth += 1;
                current = parent;
            }
            _ => break,
        }
    }

    depth
}

/// Nest comments under their parents.
///
/// Top-level comments and replies under each parent are both in creation
/// order. A reply whose parent is missing from `comments` is shown at top
/// level rather than dropped.
pub fn build_threads(mut comments: Vec<Comment>) -> Vec<CommentThread> {
    comments.sort_by_key(|c| (c.created_at, c.id));

    let ids: HashSet<i64> = comments.iter().map(|c| c.id).collect();
    let mut roots = Vec::new();
    let mut children: HashMap<i64, Vec<Comment>> = HashMap::new();

    for comment in comments {
        match comment.parent_comment_id {
            Some(parent_id) if ids.contains(&parent_id) => {
                children.entry(parent_id).or_default().push(comment);
            }
            Some(parent_id) => {
                tracing::warn!(
                    "Comment {} references missing parent {}, showing it at top level",
                    comment.id,
                    parent_id
                );
                roots.push(comment);
            }
            None => roots.push(comment),
        }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut children))
        .collect()
}

fn attach(comment: Comment, children: &mut HashMap<i64, Vec<Comment>>) -> CommentThread {
    let replies = children
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .map(|reply| attach(reply, children))
        .collect();

    CommentThread { comment, replies }
}
