use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::utils::record::id_string;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Project {
    pub id: RecordId,
    pub name: String,
    pub platform: String, // 'ios', 'android', 'react-native', 'flutter', etc.
    pub api_key: String,  // ! unique, 64 hex chars, SDK ingestion credential
    pub owner_id: RecordId,
    pub created_at: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub platform: String,
    pub api_key: String,
    pub owner_id: RecordId,
    pub created_at: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub platform: String,
    pub api_key: String,
    pub owner_id: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_count_24h: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_count_24h: Option<u64>,
}

impl ProjectResponse {
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: id_string(&project.id),
            name: project.name.clone(),
            platform: project.platform.clone(),
            api_key: project.api_key.clone(),
            owner_id: id_string(&project.owner_id),
            created_at: project.created_at.clone(),
            error_count_24h: None,
            user_count_24h: None,
        }
    }

    pub fn with_stats(project: &Project, error_count_24h: u64, user_count_24h: u64) -> Self {
        Self {
            error_count_24h: Some(error_count_24h),
            user_count_24h: Some(user_count_24h),
            ..Self::from_project(project)
        }
    }
}
