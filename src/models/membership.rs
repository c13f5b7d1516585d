use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::models::user::UserResponse;
use crate::utils::record::id_string;

/// Per-project role carried by a membership row. Stored but not further
/// differentiated by the evaluator: any membership grants read and
/// event-mutation access, while project deletion and member removal stay
/// owner-or-global-admin only.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectRole {
    #[serde(rename = "VIEWER")]
    Viewer,
    #[serde(rename = "CONTRIBUTOR")]
    Contributor,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl ProjectRole {
    pub fn parse(val: &str) -> Option<Self> {
        match val.to_uppercase().as_str() {
            "VIEWER" => Some(ProjectRole::Viewer),
            "CONTRIBUTOR" => Some(ProjectRole::Contributor),
            "ADMIN" => Some(ProjectRole::Admin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectRole::Viewer => "VIEWER",
            ProjectRole::Contributor => "CONTRIBUTOR",
            ProjectRole::Admin => "ADMIN",
        }
    }
}

/// A (project, user) pair. Unique per pair; re-assignment updates the role
/// in place instead of duplicating the row.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Membership {
    pub id: RecordId,
    pub project_id: RecordId,
    pub user_id: RecordId,
    pub role: ProjectRole,
    pub created_at: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateMembership {
    pub project_id: RecordId,
    pub user_id: RecordId,
    pub role: ProjectRole,
    pub created_at: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub role: ProjectRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl MembershipResponse {
    pub fn from_membership(membership: &Membership, user: Option<UserResponse>) -> Self {
        Self {
            id: id_string(&membership.id),
            project_id: id_string(&membership.project_id),
            user_id: id_string(&membership.user_id),
            role: membership.role,
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(ProjectRole::parse("viewer"), Some(ProjectRole::Viewer));
        assert_eq!(ProjectRole::parse("Contributor"), Some(ProjectRole::Contributor));
        assert_eq!(ProjectRole::parse("ADMIN"), Some(ProjectRole::Admin));
    }

    #[test]
    fn test_parse_rejects_unknown_roles() {
        assert_eq!(ProjectRole::parse("OWNER"), None);
        assert_eq!(ProjectRole::parse(""), None);
    }
}
