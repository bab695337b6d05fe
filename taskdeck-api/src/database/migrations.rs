use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS members (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR NOT NULL,
            email VARCHAR NOT NULL UNIQUE,
            role VARCHAR NOT NULL DEFAULT 'user' CHECK (role IN ('admin', 'manager', 'developer', 'user')),
            created_at BIGINT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title VARCHAR NOT NULL,
            description VARCHAR NOT NULL DEFAULT '',
            visibility VARCHAR NOT NULL DEFAULT 'team' CHECK (visibility IN ('private', 'team', 'public')),
            created_by INTEGER NOT NULL,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL,
            FOREIGN KEY (created_by) REFERENCES members (id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS project_members (
            project_id INTEGER NOT NULL,
            member_id INTEGER NOT NULL,
            role_in_project VARCHAR NOT NULL DEFAULT '',
            joined_at BIGINT NOT NULL,
            PRIMARY KEY (project_id, member_id),
            FOREIGN KEY (project_id) REFERENCES projects (id),
            FOREIGN KEY (member_id) REFERENCES members (id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id INTEGER NOT NULL,
            title VARCHAR NOT NULL,
            description VARCHAR NOT NULL DEFAULT '',
            status VARCHAR NOT NULL DEFAULT 'not_started' CHECK (status IN ('not_started', 'in_progress', 'completed')),
            start_time BIGINT,
            end_time BIGINT,
            created_by INTEGER NOT NULL,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL,
            FOREIGN KEY (project_id) REFERENCES projects (id),
            FOREIGN KEY (created_by) REFERENCES members (id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS task_assignees (
            task_id INTEGER NOT NULL,
            member_id INTEGER NOT NULL,
            PRIMARY KEY (task_id, member_id),
            FOREIGN KEY (task_id) REFERENCES tasks (id),
            FOREIGN KEY (member_id) REFERENCES members (id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task_id INTEGER NOT NULL,
            member_id INTEGER NOT NULL,
            content VARCHAR NOT NULL,
            parent_comment_id INTEGER,
            created_at BIGINT NOT NULL,
            FOREIGN KEY (task_id) REFERENCES tasks (id),
            FOREIGN KEY (member_id) REFERENCES members (id),
            FOREIGN KEY (parent_comment_id) REFERENCES comments (id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS activity_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            action_type VARCHAR NOT NULL CHECK (action_type IN ('task_created', 'task_updated', 'comment_added', 'status_changed', 'project_created')),
            performed_by INTEGER NOT NULL,
            project_id INTEGER NOT NULL,
            task_id INTEGER,
            description VARCHAR NOT NULL,
            created_at BIGINT NOT NULL,
            FOREIGN KEY (performed_by) REFERENCES members (id),
            FOREIGN KEY (project_id) REFERENCES projects (id),
            FOREIGN KEY (task_id) REFERENCES tasks (id)
        )",
        [],
    )?;

    // The activity log is append-only
    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS activity_items_no_update
            BEFORE UPDATE ON activity_items
         BEGIN
            SELECT RAISE(ABORT, 'activity log is append-only');
         END;
         CREATE TRIGGER IF NOT EXISTS activity_items_no_delete
            BEFORE DELETE ON activity_items
         BEGIN
            SELECT RAISE(ABORT, 'activity log is append-only');
         END;",
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_project
            ON tasks(project_id, created_at)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_comments_task_created
            ON comments(task_id, created_at)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_activity_project_created
            ON activity_items(project_id, created_at)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_project_members_member
            ON project_members(member_id)",
        [],
    )?;

    Ok(())
}
