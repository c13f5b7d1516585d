//! Access control evaluator.
//!
//! A single pure predicate decides every project- and event-scoped
//! operation from {caller identity, global role, ownership, membership}.
//! Handlers resolve the caller once per request (see `middleware.rs`),
//! look up ownership and membership, and pass everything in by parameter.
//! Ingestion never goes through here: holding a project's API key is the
//! whole credential on that path.

use surrealdb::RecordId;

use crate::errors::{Error, Result};
use crate::models::{membership::ProjectRole, user::GlobalRole};

/// Caller identity resolved once per request from the session.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: RecordId,
    pub role: GlobalRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    ViewProject,
    ListEvents,
    ViewEvent,
    UpdateEvent,
    ListMembers,
    DeleteProject,
    RemoveMember,
}

impl ProjectAction {
    /// Deletion and member removal are never granted through mere
    /// membership; they need ownership or the global admin override.
    fn requires_owner(self) -> bool {
        matches!(
            self,
            ProjectAction::DeleteProject | ProjectAction::RemoveMember
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Granted,
    Unauthenticated,
    Forbidden,
}

impl Decision {
    pub fn require(self) -> Result<()> {
        match self {
            Decision::Granted => Ok(()),
            Decision::Unauthenticated => Err(Error::Unauthenticated),
            Decision::Forbidden => Err(Error::Unauthorized),
        }
    }
}

/// Decision rules, in order: no caller denies; global ADMIN allows
/// everything; the owner allows everything on their project; a membership
/// row allows everything except the owner-only actions. The membership
/// role value is intentionally not differentiated further.
pub fn evaluate(
    caller: Option<&Caller>,
    action: ProjectAction,
    owner_id: &RecordId,
    membership: Option<ProjectRole>,
) -> Decision {
    let Some(caller) = caller else {
        return Decision::Unauthenticated;
    };
    if caller.role.is_admin() {
        return Decision::Granted;
    }
    if caller.user_id == *owner_id {
        return Decision::Granted;
    }
    if membership.is_some() && !action.requires_owner() {
        return Decision::Granted;
    }
    Decision::Forbidden
}

/// Gate for the `/api/admin/*` surface.
pub fn require_admin(caller: &Caller) -> Result<()> {
    if caller.role.is_admin() {
        Ok(())
    } else {
        Err(Error::AdminRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(key: &str, role: GlobalRole) -> Caller {
        Caller {
            user_id: RecordId::from_table_key("users", key),
            role,
        }
    }

    fn owner_id() -> RecordId {
        RecordId::from_table_key("users", "owner")
    }

    const ALL_ACTIONS: [ProjectAction; 7] = [
        ProjectAction::ViewProject,
        ProjectAction::ListEvents,
        ProjectAction::ViewEvent,
        ProjectAction::UpdateEvent,
        ProjectAction::ListMembers,
        ProjectAction::DeleteProject,
        ProjectAction::RemoveMember,
    ];

    #[test]
    fn test_unauthenticated_is_always_denied() {
        for action in ALL_ACTIONS {
            assert_eq!(
                evaluate(None, action, &owner_id(), Some(ProjectRole::Admin)),
                Decision::Unauthenticated
            );
        }
    }

    #[test]
    fn test_global_admin_overrides_everything() {
        let admin = user("someone_else", GlobalRole::Admin);
        for action in ALL_ACTIONS {
            assert_eq!(
                evaluate(Some(&admin), action, &owner_id(), None),
                Decision::Granted
            );
        }
    }

    #[test]
    fn test_owner_is_granted_all_actions() {
        let owner = user("owner", GlobalRole::User);
        for action in ALL_ACTIONS {
            assert_eq!(
                evaluate(Some(&owner), action, &owner_id(), None),
                Decision::Granted
            );
        }
    }

    #[test]
    fn test_any_membership_role_grants_non_owner_actions() {
        for role in [
            ProjectRole::Viewer,
            ProjectRole::Contributor,
            ProjectRole::Admin,
        ] {
            let member = user("member", GlobalRole::User);
            for action in [
                ProjectAction::ViewProject,
                ProjectAction::ListEvents,
                ProjectAction::ViewEvent,
                ProjectAction::UpdateEvent,
                ProjectAction::ListMembers,
            ] {
                assert_eq!(
                    evaluate(Some(&member), action, &owner_id(), Some(role)),
                    Decision::Granted
                );
            }
        }
    }

    #[test]
    fn test_membership_never_grants_deletion_or_member_removal() {
        let member = user("member", GlobalRole::User);
        for role in [
            ProjectRole::Viewer,
            ProjectRole::Contributor,
            ProjectRole::Admin,
        ] {
            for action in [ProjectAction::DeleteProject, ProjectAction::RemoveMember] {
                assert_eq!(
                    evaluate(Some(&member), action, &owner_id(), Some(role)),
                    Decision::Forbidden
                );
            }
        }
    }

    #[test]
    fn test_stranger_is_forbidden() {
        let stranger = user("stranger", GlobalRole::User);
        for action in ALL_ACTIONS {
            assert_eq!(
                evaluate(Some(&stranger), action, &owner_id(), None),
                Decision::Forbidden
            );
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&user("a", GlobalRole::Admin)).is_ok());
        assert!(matches!(
            require_admin(&user("u", GlobalRole::User)),
            Err(Error::AdminRequired)
        ));
    }
}
