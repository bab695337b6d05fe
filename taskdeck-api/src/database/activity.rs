use anyhow::Result;
use rusqlite::{params, params_from_iter, Connection};
use shared_types::{ActionType, ActivityItem, MemberSummary};

use crate::database::{enum_column, now, AsyncDbConnection};

/// Append one entry to the activity log.
///
/// Takes a plain connection so it can run inside the transaction of the
/// change being recorded.
pub(crate) fn record(
    conn: &Connection,
    action_type: ActionType,
    performed_by: i64,
    project_id: i64,
    task_id: Option<i64>,
    description: &str,
) -> rusqlite::Result<i64> {
    conn.query_row(
        "INSERT INTO activity_items
             (action_type, performed_by, project_id, task_id, description, created_at)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING id",
        params![
            action_type.as_str(),
            performed_by,
            project_id,
            task_id,
            description,
            now()
        ],
        |row| row.get(0),
    )
}

/// Most recent activity first, limited to the given projects.
///
/// The project filter runs before `LIMIT` so a busy project outside the set
/// cannot push the others out of the page.
pub async fn list_activity(
    conn: AsyncDbConnection,
    project_ids: &[i64],
    limit: usize,
) -> Result<Vec<ActivityItem>> {
    if project_ids.is_empty() {
        return Ok(Vec::new());
    }

    let conn = conn.lock().await?;

    let placeholders = vec!["?"; project_ids.len()].join(", ");
    let mut stmt = conn.prepare(&format!(
        "SELECT a.id, a.action_type, m.id, m.name, m.email, a.project_id, p.title,
                a.task_id, t.title, a.description, a.created_at
         FROM activity_items a
         INNER JOIN members m ON m.id = a.performed_by
         INNER JOIN projects p ON p.id = a.project_id
         LEFT JOIN tasks t ON t.id = a.task_id
         WHERE a.project_id IN ({})
         ORDER BY a.created_at DESC, a.id DESC
         LIMIT ?",
        placeholders
    ))?;

    let mut values = project_ids.to_vec();
    values.push(limit as i64);

    let items = stmt
        .query_map(params_from_iter(values), |row| {
            Ok(ActivityItem {
                id: row.get(0)?,
                action_type: enum_column(row, 1)?,
                performed_by: MemberSummary {
                    id: row.get(2)?,
                    name: row.get(3)?,
                    email: row.get(4)?,
                },
                project_id: row.get(5)?,
                project_name: row.get(6)?,
                task_id: row.get(7)?,
                task_name: row.get(8)?,
                description: row.get(9)?,
                created_at: row.get(10)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(items)
}
