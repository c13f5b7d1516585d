use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::utils::record::id_string;

/// Global role. ADMIN bypasses every per-project access check.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalRole {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl GlobalRole {
    pub fn is_admin(self) -> bool {
        matches!(self, GlobalRole::Admin)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct User {
    pub id: RecordId,
    pub username: String, // ! unique
    pub email: String,    // ! unique
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: GlobalRole,
    pub blocked: bool,
    pub can_create_projects: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: GlobalRole,
    pub blocked: bool,
    pub can_create_projects: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// What the dashboard sees. Never carries the password hash.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: GlobalRole,
    pub blocked: bool,
    pub can_create_projects: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: id_string(&user.id),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_image_url: user.profile_image_url.clone(),
            role: user.role,
            blocked: user.blocked,
            can_create_projects: user.can_create_projects,
            created_at: user.created_at.clone(),
            updated_at: user.updated_at.clone(),
        }
    }
}
