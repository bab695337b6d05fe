use shared_types::{Task, TaskBoard, TaskStatus};

/// Split tasks into the three board columns, keeping input order within each.
pub fn group_by_status<I>(tasks: I) -> TaskBoard
where
    I: IntoIterator<Item = Task>,
{
    let mut board = TaskBoard::default();

    for task in tasks {
        match task.status {
            TaskStatus::NotStarted => board.not_started.push(task),
            TaskStatus::InProgress => board.in_progress.push(task),
            TaskStatus::Completed => board.completed.push(task),
        }
    }

    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn task(id: i64, status: TaskStatus) -> Task {
        Task {
            id,
            project_id: 1,
            title: format!("Task {}", id),
            description: String::new(),
            status,
            start_time: None,
            end_time: None,
            created_by: 1,
            assignees: vec![],
            comment_count: 0,
            created_at: id,
            updated_at: id,
        }
    }

    #[test]
    fn test_grouping_is_a_partition() {
        let tasks = vec![
            task(1, TaskStatus::InProgress),
            task(2, TaskStatus::NotStarted),
            task(3, TaskStatus::Completed),
            task(4, TaskStatus::InProgress),
            task(5, TaskStatus::NotStarted),
        ];

        let board = group_by_status(tasks.clone());

        assert_eq!(board.len(), tasks.len());

        let mut seen = HashSet::new();
        for status in TaskStatus::ALL {
            for t in board.column(status) {
                assert_eq!(t.status, status);
                assert!(seen.insert(t.id), "task {} appears twice", t.id);
            }
        }
        let input: HashSet<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(seen, input);
    }

    #[test]
    fn test_grouping_preserves_input_order() {
        let board = group_by_status(vec![
            task(9, TaskStatus::NotStarted),
            task(3, TaskStatus::Completed),
            task(5, TaskStatus::NotStarted),
            task(1, TaskStatus::NotStarted),
        ]);

        let ids: Vec<i64> = board.not_started.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![9, 5, 1]);
        assert!(board.in_progress.is_empty());
        assert_eq!(board.completed[0].id, 3);
    }

    #[test]
    fn test_empty_input() {
        let board = group_by_status(Vec::new());
        assert!(board.is_empty());
    }
}
