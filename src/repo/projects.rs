use surrealdb::{RecordId, Surreal, engine::any::Any};

use crate::consts::table_const::{PROJECT_TABLE, PROJECT_USER_TABLE};
use crate::errors::{Error, Result};
use crate::models::project::{CreateProject, Project};
use crate::repo::events;

pub async fn create(sdb: &Surreal<Any>, data: CreateProject) -> Result<Project> {
    sdb.create::<Option<Project>>(PROJECT_TABLE)
        .content(data)
        .await?
        .ok_or(Error::InternalServerError)
}

pub async fn find_by_id(sdb: &Surreal<Any>, id: RecordId) -> Result<Option<Project>> {
    Ok(sdb.select::<Option<Project>>(id).await?)
}

/// The sole authentication mechanism for ingestion.
pub async fn find_by_api_key(sdb: &Surreal<Any>, api_key: String) -> Result<Option<Project>> {
    let projects = sdb
        .query("SELECT * FROM type::table($table) WHERE api_key = $api_key;")
        .bind(("table", PROJECT_TABLE))
        .bind(("api_key", api_key))
        .await?
        .take::<Vec<Project>>(0)?;
    Ok(projects.into_iter().next())
}

pub async fn find_by_owner(sdb: &Surreal<Any>, owner_id: RecordId) -> Result<Vec<Project>> {
    Ok(sdb
        .query("SELECT * FROM type::table($table) WHERE owner_id = $owner_id;")
        .bind(("table", PROJECT_TABLE))
        .bind(("owner_id", owner_id))
        .await?
        .take::<Vec<Project>>(0)?)
}

pub async fn find_all(sdb: &Surreal<Any>) -> Result<Vec<Project>> {
    Ok(sdb.select::<Vec<Project>>(PROJECT_TABLE).await?)
}

/// The project exclusively owns its events and memberships; deleting it
/// cascades to both. Irreversible.
pub async fn delete(sdb: &Surreal<Any>, id: RecordId) -> Result<()> {
    events::delete_by_project(sdb, id.clone()).await?;
    sdb.query("DELETE type::table($table) WHERE project_id = $project_id;")
        .bind(("table", PROJECT_USER_TABLE))
        .bind(("project_id", id.clone()))
        .await?;
    sdb.delete::<Option<Project>>(id).await?;
    Ok(())
}
