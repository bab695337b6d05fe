use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use shared_types::{ActionType, Member, Project, ProjectMembership, TaskStatus};
use std::collections::{HashMap, HashSet};

use crate::database::{activity, enum_column, now, AsyncDbConnection, DbError};
use taskdeck_core::validation::NewProject;
use taskdeck_core::{aggregate_project, ProjectRow};

/// Role label given to whoever creates a project
pub const OWNER_ROLE: &str = "Owner";

const PROJECT_COLUMNS: &str = "id, title, description, visibility, created_by, created_at, updated_at";

fn map_project_row(row: &Row<'_>) -> rusqlite::Result<ProjectRow> {
    Ok(ProjectRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        visibility: enum_column(row, 3)?,
        created_by: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn load_memberships(
    conn: &Connection,
    project_id: Option<i64>,
) -> rusqlite::Result<Vec<ProjectMembership>> {
    let mut stmt = conn.prepare(
        "SELECT project_id, member_id, role_in_project, joined_at
         FROM project_members
         WHERE (?1 IS NULL OR project_id = ?1)",
    )?;

    let memberships = stmt
        .query_map([project_id], |row| {
            Ok(ProjectMembership {
                project_id: row.get(0)?,
                member_id: row.get(1)?,
                role_in_project: row.get(2)?,
                joined_at: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(memberships)
}

fn load_task_statuses(
    conn: &Connection,
    project_id: Option<i64>,
) -> rusqlite::Result<Vec<(i64, TaskStatus)>> {
    let mut stmt = conn.prepare(
        "SELECT project_id, status FROM tasks WHERE (?1 IS NULL OR project_id = ?1)",
    )?;

    let statuses = stmt
        .query_map([project_id], |row| Ok((row.get(0)?, enum_column(row, 1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(statuses)
}

pub async fn create_project(
    conn: AsyncDbConnection,
    creator: &Member,
    project: &NewProject,
) -> Result<Project> {
    let project_id = {
        let mut db = conn.lock().await?;
        let tx = db.transaction()?;
        let now = now();

        let id: i64 = tx.query_row(
            "INSERT INTO projects (title, description, visibility, created_by, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id",
            params![
                &project.title,
                &project.description,
                project.visibility.as_str(),
                creator.id,
                now,
                now
            ],
            |row| row.get(0),
        )?;

        tx.execute(
            "INSERT INTO project_members (project_id, member_id, role_in_project, joined_at)
             VALUES (?, ?, ?, ?)",
            params![id, creator.id, OWNER_ROLE, now],
        )?;

        activity::record(
            &tx,
            ActionType::ProjectCreated,
            creator.id,
            id,
            None,
            &format!("Created project {}", project.title),
        )?;

        tx.commit()?;
        id
    };

    tracing::info!("Created project {} for member {}", project_id, creator.id);

    get_project(conn, project_id).await
}

pub async fn get_project(conn: AsyncDbConnection, id: i64) -> Result<Project> {
    let conn = conn.lock().await?;

    let row = conn
        .query_row(
            &format!("SELECT {} FROM projects WHERE id = ?", PROJECT_COLUMNS),
            [id],
            map_project_row,
        )
        .optional()?
        .ok_or(DbError::NotFound("Project"))?;

    let memberships = load_memberships(&conn, Some(id))?;
    let statuses: Vec<TaskStatus> = load_task_statuses(&conn, Some(id))?
        .into_iter()
        .map(|(_, status)| status)
        .collect();

    Ok(aggregate_project(row, &memberships, &statuses))
}

/// All projects with derived counts, joined client side from full row sets
pub async fn list_projects(conn: AsyncDbConnection) -> Result<Vec<Project>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM projects ORDER BY created_at, id",
        PROJECT_COLUMNS
    ))?;
    let rows = stmt
        .query_map([], map_project_row)?
        .collect::<Result<Vec<_>, _>>()?;
    drop(stmt);

    let mut memberships: HashMap<i64, Vec<ProjectMembership>> = HashMap::new();
    for membership in load_memberships(&conn, None)? {
        memberships
            .entry(membership.project_id)
            .or_default()
            .push(membership);
    }

    let mut statuses: HashMap<i64, Vec<TaskStatus>> = HashMap::new();
    for (project_id, status) in load_task_statuses(&conn, None)? {
        statuses.entry(project_id).or_default().push(status);
    }

    let projects = rows
        .into_iter()
        .map(|row| {
            let id = row.id;
            aggregate_project(
                row,
                memberships.get(&id).map(Vec::as_slice).unwrap_or_default(),
                statuses.get(&id).map(Vec::as_slice).unwrap_or_default(),
            )
        })
        .collect();

    Ok(projects)
}

/// Ids of the projects a member belongs to
pub async fn member_project_ids(conn: AsyncDbConnection, member_id: i64) -> Result<HashSet<i64>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare("SELECT project_id FROM project_members WHERE member_id = ?")?;
    let ids = stmt
        .query_map([member_id], |row| row.get::<_, i64>(0))?
        .collect::<Result<HashSet<_>, _>>()?;

    Ok(ids)
}
