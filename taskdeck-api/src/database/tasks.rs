use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use shared_types::{ActionType, MemberSummary, Task, TaskStatus};

use crate::database::{activity, enum_column, now, AsyncDbConnection, DbError};
use taskdeck_core::transition;
use taskdeck_core::validation::{NewTask, TaskDetails};

const TASK_COLUMNS: &str =
    "id, project_id, title, description, status, start_time, end_time, created_by, created_at, updated_at";

fn map_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: enum_column(row, 4)?,
        start_time: row.get(5)?,
        end_time: row.get(6)?,
        created_by: row.get(7)?,
        assignees: Vec::new(),
        comment_count: 0,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Fill in the assignees and comment count of a task read from its own row
fn load_related(conn: &Connection, task: &mut Task) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(
        "SELECT m.id, m.name, m.email
         FROM members m
         INNER JOIN task_assignees ta ON m.id = ta.member_id
         WHERE ta.task_id = ?
         ORDER BY m.name, m.id",
    )?;

    task.assignees = stmt
        .query_map([task.id], |row| {
            Ok(MemberSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    task.comment_count = conn.query_row(
        "SELECT COUNT(*) FROM comments WHERE task_id = ?",
        [task.id],
        |row| row.get(0),
    )?;

    Ok(())
}

/// Project id and current status of a task, inside an open transaction
fn task_state(conn: &Connection, task_id: i64) -> Result<(i64, TaskStatus)> {
    conn.query_row(
        "SELECT project_id, status FROM tasks WHERE id = ?",
        [task_id],
        |row| Ok((row.get(0)?, enum_column(row, 1)?)),
    )
    .optional()?
    .ok_or_else(|| DbError::NotFound("Task").into())
}

pub async fn create_task(
    conn: AsyncDbConnection,
    project_id: i64,
    created_by: i64,
    task: &NewTask,
    assignee_ids: &[i64],
) -> Result<Task> {
    let task_id = {
        let mut db = conn.lock().await?;
        let tx = db.transaction()?;
        let now = now();

        let id: i64 = tx.query_row(
            "INSERT INTO tasks
             (project_id, title, description, status, start_time, end_time, created_by, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
            params![
                project_id,
                &task.title,
                &task.description,
                task.status.as_str(),
                task.start_time,
                task.end_time,
                created_by,
                now,
                now
            ],
            |row| row.get(0),
        )?;

        for member_id in assignee_ids {
            tx.execute(
                "INSERT OR IGNORE INTO task_assignees (task_id, member_id) VALUES (?, ?)",
                params![id, member_id],
            )?;
        }

        activity::record(
            &tx,
            ActionType::TaskCreated,
            created_by,
            project_id,
            Some(id),
            &format!("Created task {}", task.title),
        )?;

        tx.commit()?;
        id
    };

    get_task(conn, task_id).await
}

pub async fn get_task(conn: AsyncDbConnection, id: i64) -> Result<Task> {
    let conn = conn.lock().await?;

    let mut task = conn
        .query_row(
            &format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS),
            [id],
            map_task,
        )
        .optional()?
        .ok_or(DbError::NotFound("Task"))?;

    load_related(&conn, &mut task)?;

    Ok(task)
}

/// Tasks of a project in creation order
pub async fn list_tasks(conn: AsyncDbConnection, project_id: i64) -> Result<Vec<Task>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM tasks WHERE project_id = ? ORDER BY created_at, id",
        TASK_COLUMNS
    ))?;

    let mut tasks = stmt
        .query_map([project_id], map_task)?
        .collect::<Result<Vec<_>, _>>()?;

    for task in tasks.iter_mut() {
        load_related(&conn, task)?;
    }

    Ok(tasks)
}

pub async fn update_task_details(
    conn: AsyncDbConnection,
    task_id: i64,
    performed_by: i64,
    details: &TaskDetails,
) -> Result<Task> {
    {
        let mut db = conn.lock().await?;
        let tx = db.transaction()?;
        let (project_id, _) = task_state(&tx, task_id)?;

        tx.execute(
            "UPDATE tasks
             SET title = ?, description = ?, start_time = ?, end_time = ?, updated_at = ?
             WHERE id = ?",
            params![
                &details.title,
                &details.description,
                details.start_time,
                details.end_time,
                now(),
                task_id
            ],
        )?;

        activity::record(
            &tx,
            ActionType::TaskUpdated,
            performed_by,
            project_id,
            Some(task_id),
            &format!("Updated task {}", details.title),
        )?;

        tx.commit()?;
    }

    get_task(conn, task_id).await
}

/// Overwrite a task's status.
///
/// Any status may follow any other. A real change also appends one
/// `status_changed` entry in the same transaction; setting the current status
/// again leaves both the row and the log untouched.
pub async fn update_task_status(
    conn: AsyncDbConnection,
    task_id: i64,
    performed_by: i64,
    next: TaskStatus,
) -> Result<Task> {
    {
        let mut db = conn.lock().await?;
        let tx = db.transaction()?;
        let (project_id, current) = task_state(&tx, task_id)?;
        let change = transition(current, next);

        if change.is_noop() {
            tracing::debug!("Task {} already {}", task_id, next);
        } else {
            tx.execute(
                "UPDATE tasks SET status = ?, updated_at = ? WHERE id = ?",
                params![next.as_str(), now(), task_id],
            )?;

            activity::record(
                &tx,
                ActionType::StatusChanged,
                performed_by,
                project_id,
                Some(task_id),
                &change.description(),
            )?;

            tx.commit()?;
            tracing::info!("Task {} moved from {} to {}", task_id, change.from, change.to);
        }
    }

    get_task(conn, task_id).await
}
