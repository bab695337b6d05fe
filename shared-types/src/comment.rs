use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::member::MemberSummary;

/// Comment on a task. A comment without a parent is top-level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Comment {
    pub id: i64,
    pub task_id: i64,
    pub content: String,
    pub author: MemberSummary,
    pub parent_comment_id: Option<i64>,
    pub created_at: i64,
}

/// A comment with its replies nested beneath it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<CommentThread>,
}

impl CommentThread {
    /// Number of comments in this thread, the root included
    pub fn comment_count(&self) -> usize {
        1 + self
            .replies
            .iter()
            .map(CommentThread::comment_count)
            .sum::<usize>()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateCommentRequest {
    pub content: String,
    pub parent_comment_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommentsResponse {
    pub total: usize,
    pub threads: Vec<CommentThread>,
}
