use surrealdb::{RecordId, Surreal, engine::any::Any};

use crate::consts::table_const::PROJECT_USER_TABLE;
use crate::errors::{Error, Result};
use crate::models::membership::{CreateMembership, Membership, ProjectRole};
use crate::utils::time::time_now;

pub async fn find_pair(
    sdb: &Surreal<Any>,
    project_id: RecordId,
    user_id: RecordId,
) -> Result<Option<Membership>> {
    let rows = sdb
        .query("SELECT * FROM type::table($table) WHERE project_id = $project_id AND user_id = $user_id;")
        .bind(("table", PROJECT_USER_TABLE))
        .bind(("project_id", project_id))
        .bind(("user_id", user_id))
        .await?
        .take::<Vec<Membership>>(0)?;
    Ok(rows.into_iter().next())
}

/// Assigns a role, updating an existing (project, user) pair in place so
/// the pair stays unique.
pub async fn assign(
    sdb: &Surreal<Any>,
    project_id: RecordId,
    user_id: RecordId,
    role: ProjectRole,
) -> Result<Membership> {
    if let Some(existing) = find_pair(sdb, project_id.clone(), user_id.clone()).await? {
        return sdb
            .update::<Option<Membership>>(existing.id)
            .merge(serde_json::json!({ "role": role }))
            .await?
            .ok_or(Error::InternalServerError);
    }

    sdb.create::<Option<Membership>>(PROJECT_USER_TABLE)
        .content(CreateMembership {
            project_id,
            user_id,
            role,
            created_at: time_now(),
        })
        .await?
        .ok_or(Error::InternalServerError)
}

pub async fn find_by_id(sdb: &Surreal<Any>, id: RecordId) -> Result<Option<Membership>> {
    Ok(sdb.select::<Option<Membership>>(id).await?)
}

pub async fn find_by_project(sdb: &Surreal<Any>, project_id: RecordId) -> Result<Vec<Membership>> {
    Ok(sdb
        .query("SELECT * FROM type::table($table) WHERE project_id = $project_id;")
        .bind(("table", PROJECT_USER_TABLE))
        .bind(("project_id", project_id))
        .await?
        .take::<Vec<Membership>>(0)?)
}

pub async fn find_by_user(sdb: &Surreal<Any>, user_id: RecordId) -> Result<Vec<Membership>> {
    Ok(sdb
        .query("SELECT * FROM type::table($table) WHERE user_id = $user_id;")
        .bind(("table", PROJECT_USER_TABLE))
        .bind(("user_id", user_id))
        .await?
        .take::<Vec<Membership>>(0)?)
}

pub async fn delete_by_id(sdb: &Surreal<Any>, id: RecordId) -> Result<()> {
    sdb.delete::<Option<Membership>>(id).await?;
    Ok(())
}

pub async fn delete_pair(
    sdb: &Surreal<Any>,
    project_id: RecordId,
    user_id: RecordId,
) -> Result<()> {
    sdb.query("DELETE type::table($table) WHERE project_id = $project_id AND user_id = $user_id;")
        .bind(("table", PROJECT_USER_TABLE))
        .bind(("project_id", project_id))
        .bind(("user_id", user_id))
        .await?;
    Ok(())
}
