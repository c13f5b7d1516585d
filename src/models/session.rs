use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::utils::time::time_now;

/// Server-side session. The opaque token is the only thing the client
/// holds; absence of a matching row means "unauthenticated".
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Session {
    pub id: RecordId,
    pub token: String,
    pub user_id: RecordId,
    pub created_at: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateSession {
    pub token: String,
    pub user_id: RecordId,
    pub created_at: String,
}

impl CreateSession {
    pub fn init(token: String, user_id: RecordId) -> Self {
        Self {
            token,
            user_id,
            created_at: time_now(),
        }
    }
}
