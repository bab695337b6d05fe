use shared_types::{Member, Project, Role, Visibility};

/// Whether `viewer` may see `project`.
///
/// `is_member` tells whether the viewer holds a membership in the project.
/// Admins see every project.
pub fn can_view(project: &Project, viewer: &Member, is_member: bool) -> bool {
    if viewer.role == Role::Admin {
        return true;
    }

    match project.visibility {
        Visibility::Public => true,
        Visibility::Team => is_member || project.created_by == viewer.id,
        Visibility::Private => project.created_by == viewer.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(visibility: Visibility) -> Project {
        Project {
            id: 1,
            title: "Mobile App Development".to_string(),
            description: String::new(),
            visibility,
            created_by: 1,
            member_count: 2,
            task_count: 0,
            completed_tasks: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn member(id: i64, role: Role) -> Member {
        Member {
            id,
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            role,
            created_at: 0,
        }
    }

    #[test]
    fn test_public_is_visible_to_everyone() {
        assert!(can_view(&project(Visibility::Public), &member(5, Role::User), false));
    }

    #[test]
    fn test_team_requires_membership() {
        let p = project(Visibility::Team);
        assert!(can_view(&p, &member(2, Role::Developer), true));
        assert!(!can_view(&p, &member(2, Role::Developer), false));
        assert!(can_view(&p, &member(1, Role::Developer), false));
    }

    #[test]
    fn test_private_is_creator_only() {
        let p = project(Visibility::Private);
        assert!(can_view(&p, &member(1, Role::User), true));
        assert!(!can_view(&p, &member(2, Role::Manager), true));
    }

    #[test]
    fn test_admin_sees_everything() {
        let p = project(Visibility::Private);
        assert!(can_view(&p, &member(9, Role::Admin), false));
    }
}
