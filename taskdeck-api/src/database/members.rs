use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use shared_types::{Member, ProjectMember};

use crate::database::{enum_column, is_unique_violation, now, AsyncDbConnection, DbError};
use taskdeck_core::validation::NewMember;

const MEMBER_COLUMNS: &str = "id, name, email, role, created_at";

fn map_member(row: &Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: enum_column(row, 3)?,
        created_at: row.get(4)?,
    })
}

pub async fn insert_member(conn: AsyncDbConnection, member: &NewMember) -> Result<Member> {
    let conn = conn.lock().await?;
    let now = now();

    let id: i64 = conn
        .query_row(
            "INSERT INTO members (name, email, role, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id",
            params![&member.name, &member.email, member.role.as_str(), now],
            |row| row.get(0),
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                anyhow::Error::from(DbError::Conflict(format!(
                    "A member with email {} already exists",
                    member.email
                )))
            } else {
                e.into()
            }
        })?;

    Ok(Member {
        id,
        name: member.name.clone(),
        email: member.email.clone(),
        role: member.role,
        created_at: now,
    })
}

pub async fn count_members(conn: AsyncDbConnection) -> Result<i64> {
    let conn = conn.lock().await?;
    let count = conn.query_row("SELECT COUNT(*) FROM members", [], |row| row.get(0))?;
    Ok(count)
}

pub async fn get_member(conn: AsyncDbConnection, id: i64) -> Result<Member> {
    let conn = conn.lock().await?;

    conn.query_row(
        &format!("SELECT {} FROM members WHERE id = ?", MEMBER_COLUMNS),
        [id],
        map_member,
    )
    .optional()?
    .ok_or_else(|| DbError::NotFound("Member").into())
}

pub async fn find_member_by_email(conn: AsyncDbConnection, email: &str) -> Result<Option<Member>> {
    let conn = conn.lock().await?;

    let member = conn
        .query_row(
            &format!("SELECT {} FROM members WHERE email = ?", MEMBER_COLUMNS),
            [email],
            map_member,
        )
        .optional()?;

    Ok(member)
}

pub async fn list_members(conn: AsyncDbConnection) -> Result<Vec<Member>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM members ORDER BY name, id",
        MEMBER_COLUMNS
    ))?;

    let members = stmt
        .query_map([], map_member)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(members)
}

pub async fn is_project_member(
    conn: AsyncDbConnection,
    project_id: i64,
    member_id: i64,
) -> Result<bool> {
    let conn = conn.lock().await?;

    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM project_members WHERE project_id = ? AND member_id = ?",
        [project_id, member_id],
        |row| row.get(0),
    )?;

    Ok(count > 0)
}

pub async fn add_project_member(
    conn: AsyncDbConnection,
    project_id: i64,
    member_id: i64,
    role_in_project: &str,
) -> Result<()> {
    let conn = conn.lock().await?;

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO project_members (project_id, member_id, role_in_project, joined_at)
         VALUES (?, ?, ?, ?)",
        params![project_id, member_id, role_in_project, now()],
    )?;

    if inserted == 0 {
        return Err(DbError::Conflict("Member already belongs to this project".to_string()).into());
    }

    Ok(())
}

pub async fn list_project_members(
    conn: AsyncDbConnection,
    project_id: i64,
) -> Result<Vec<ProjectMember>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(
        "SELECT m.id, m.name, m.email, m.role, pm.role_in_project, pm.joined_at
         FROM members m
         INNER JOIN project_members pm ON m.id = pm.member_id
         WHERE pm.project_id = ?
         ORDER BY pm.joined_at, m.id",
    )?;

    let members = stmt
        .query_map([project_id], |row| {
            Ok(ProjectMember {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                role: enum_column(row, 3)?,
                role_in_project: row.get(4)?,
                joined_at: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::*;
    use shared_types::Role;

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let test = test_db();
        let john = member(&test.conn(), "John Doe", "john@example.com", Role::Manager).await;

        let fetched = get_member(test.conn(), john.id).await.unwrap();
        assert_eq!(fetched, john);

        let by_email = find_member_by_email(test.conn(), "john@example.com")
            .await
            .unwrap();
        assert_eq!(by_email, Some(john));
        assert!(find_member_by_email(test.conn(), "nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let test = test_db();
        member(&test.conn(), "John Doe", "john@example.com", Role::User).await;

        let err = insert_member(
            test.conn(),
            &NewMember {
                name: "Other John".to_string(),
                email: "john@example.com".to_string(),
                role: Role::User,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err.downcast_ref::<DbError>(), Some(DbError::Conflict(_))));
        assert_eq!(count_members(test.conn()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_member_is_not_found() {
        let test = test_db();
        let err = get_member(test.conn(), 404).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DbError>(), Some(DbError::NotFound("Member"))));
    }
}
