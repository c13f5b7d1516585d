use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::utils::time::{is_past, time_now, time_now_plus_hours};

pub const RESET_VALID_HOURS: i64 = 1;

/// Single-use password reset credential, valid for one hour.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PasswordReset {
    pub id: RecordId,
    pub user_id: RecordId,
    pub token: String,
    pub used: bool,
    pub created_at: String,
    pub expires_at: String,
}

impl PasswordReset {
    pub fn is_expired(&self) -> bool {
        is_past(&self.expires_at)
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CreatePasswordReset {
    pub user_id: RecordId,
    pub token: String,
    pub used: bool,
    pub created_at: String,
    pub expires_at: String,
}

impl CreatePasswordReset {
    pub fn init(user_id: RecordId, token: String) -> Self {
        Self {
            user_id,
            token,
            used: false,
            created_at: time_now(),
            expires_at: time_now_plus_hours(RESET_VALID_HOURS),
        }
    }
}
