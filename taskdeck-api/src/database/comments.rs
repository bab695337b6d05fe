use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use shared_types::{ActionType, Comment, MemberSummary};

use crate::database::{activity, now, AsyncDbConnection, DbError};
use taskdeck_core::validate_reply;

const COMMENT_SELECT: &str = "SELECT c.id, c.task_id, c.content, m.id, m.name, m.email, c.parent_comment_id, c.created_at
     FROM comments c
     INNER JOIN members m ON m.id = c.member_id";

fn map_comment(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        task_id: row.get(1)?,
        content: row.get(2)?,
        author: MemberSummary {
            id: row.get(3)?,
            name: row.get(4)?,
            email: row.get(5)?,
        },
        parent_comment_id: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn load_comments(conn: &Connection, task_id: i64) -> rusqlite::Result<Vec<Comment>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE c.task_id = ? ORDER BY c.created_at, c.id",
        COMMENT_SELECT
    ))?;

    let comments = stmt
        .query_map([task_id], map_comment)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(comments)
}

fn load_comment(conn: &Connection, id: i64) -> rusqlite::Result<Option<Comment>> {
    conn.query_row(
        &format!("{} WHERE c.id = ?", COMMENT_SELECT),
        [id],
        map_comment,
    )
    .optional()
}

/// Flat list of a task's comments in creation order
pub async fn list_comments(conn: AsyncDbConnection, task_id: i64) -> Result<Vec<Comment>> {
    let conn = conn.lock().await?;
    Ok(load_comments(&conn, task_id)?)
}

/// Add a top-level comment, or a reply when `parent_comment_id` is set.
///
/// The reply check and the insert share one transaction, so the parent seen
/// during validation is the one the reply is stored under.
pub async fn create_comment(
    conn: AsyncDbConnection,
    task_id: i64,
    author_id: i64,
    content: &str,
    parent_comment_id: Option<i64>,
) -> Result<Comment> {
    let mut db = conn.lock().await?;
    let tx = db.transaction()?;

    let (project_id, task_title): (i64, String) = tx
        .query_row(
            "SELECT project_id, title FROM tasks WHERE id = ?",
            [task_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?
        .ok_or(DbError::NotFound("Task"))?;

    if let Some(parent_id) = parent_comment_id {
        let mut existing = load_comments(&tx, task_id)?;
        if !existing.iter().any(|c| c.id == parent_id) {
            if let Some(parent) = load_comment(&tx, parent_id)? {
                existing.push(parent);
            }
        }
        validate_reply(task_id, parent_id, &existing)?;
    }

    let id: i64 = tx.query_row(
        "INSERT INTO comments (task_id, member_id, content, parent_comment_id, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id",
        params![task_id, author_id, content, parent_comment_id, now()],
        |row| row.get(0),
    )?;

    let description = match parent_comment_id {
        Some(_) => format!("Replied to a comment on {}", task_title),
        None => format!("Added comment on {}", task_title),
    };
    activity::record(
        &tx,
        ActionType::CommentAdded,
        author_id,
        project_id,
        Some(task_id),
        &description,
    )?;

    let comment = load_comment(&tx, id)?.ok_or(DbError::NotFound("Comment"))?;
    tx.commit()?;

    Ok(comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::*;
    use crate::database::{projects, tasks};
    use shared_types::{Role, TaskStatus, Visibility};
    use taskdeck_core::validation::{NewProject, NewTask};
    use taskdeck_core::{build_threads, CoreError, MAX_REPLY_DEPTH};

    async fn setup() -> (TestDb, i64, i64, i64) {
        let test = test_db();
        let john = member(&test.conn(), "John Doe", "john@example.com", Role::Manager).await;
        let project = projects::create_project(
            test.conn(),
            &john,
            &NewProject {
                title: "Website Redesign".to_string(),
                description: String::new(),
                visibility: Visibility::Team,
            },
        )
        .await
        .unwrap();

        let mut task_ids = Vec::new();
        for title in ["Design review", "Homepage"] {
            let task = tasks::create_task(
                test.conn(),
                project.id,
                john.id,
                &NewTask {
                    title: title.to_string(),
                    description: String::new(),
                    status: TaskStatus::NotStarted,
                    start_time: None,
                    end_time: None,
                    assignee_emails: vec![],
                },
                &[],
            )
            .await
            .unwrap();
            task_ids.push(task.id);
        }

        (test, john.id, task_ids[0], task_ids[1])
    }

    #[tokio::test]
    async fn test_comments_and_replies() {
        let (test, john, task, _) = setup().await;

        let top = create_comment(test.conn(), task, john, "Looks great", None)
            .await
            .unwrap();
        let reply = create_comment(test.conn(), task, john, "Agreed", Some(top.id))
            .await
            .unwrap();

        assert_eq!(top.parent_comment_id, None);
        assert_eq!(reply.parent_comment_id, Some(top.id));
        assert_eq!(reply.author.name, "John Doe");

        let threads = build_threads(list_comments(test.conn(), task).await.unwrap());
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].replies[0].comment.id, reply.id);

        let task = tasks::get_task(test.conn(), task).await.unwrap();
        assert_eq!(task.comment_count, 2);
    }

    #[tokio::test]
    async fn test_reply_to_missing_parent_is_rejected() {
        let (test, john, task, _) = setup().await;

        let err = create_comment(test.conn(), task, john, "Hello?", Some(12345))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::ParentNotFound { parent_id: 12345, .. })
        ));
        assert!(list_comments(test.conn(), task).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reply_across_tasks_is_rejected() {
        let (test, john, task, other_task) = setup().await;
        let elsewhere = create_comment(test.conn(), other_task, john, "Other task", None)
            .await
            .unwrap();

        let err = create_comment(test.conn(), task, john, "Wrong thread", Some(elsewhere.id))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::ParentInOtherTask { .. })
        ));
    }

    #[tokio::test]
    async fn test_depth_bound() {
        let (test, john, task, _) = setup().await;

        let mut parent = create_comment(test.conn(), task, john, "root", None)
            .await
            .unwrap();
        for depth in 1..=MAX_REPLY_DEPTH {
            let content = format!("depth {}", depth);
            parent = create_comment(test.conn(), task, john, &content, Some(parent.id))
                .await
                .unwrap();
        }

        let err = create_comment(test.conn(), task, john, "too deep", Some(parent.id))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::ThreadTooDeep { .. })
        ));
    }

    #[tokio::test]
    async fn test_comment_on_missing_task() {
        let (test, john, _, _) = setup().await;
        let err = create_comment(test.conn(), 999, john, "hi", None)
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<DbError>(), Some(DbError::NotFound("Task"))));
    }
}
