use std::collections::HashSet;

use serde::Deserialize;
use surrealdb::{RecordId, Surreal, engine::any::Any};

use crate::consts::table_const::ERROR_EVENT_TABLE;
use crate::errors::{Error, Result};
use crate::models::event::{CreateErrorEvent, ErrorEvent};

/// Independently-optional filters; everything supplied is ANDed. A
/// missing filter means "no constraint", not "match empty".
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub status: Option<String>,
    pub severity: Option<String>,
    pub event_type: Option<String>,
    pub search: Option<String>,
}

pub async fn create(sdb: &Surreal<Any>, data: CreateErrorEvent) -> Result<ErrorEvent> {
    sdb.create::<Option<ErrorEvent>>(ERROR_EVENT_TABLE)
        .content(data)
        .await?
        .ok_or(Error::InternalServerError)
}

pub async fn find_by_id(sdb: &Surreal<Any>, id: RecordId) -> Result<Option<ErrorEvent>> {
    Ok(sdb.select::<Option<ErrorEvent>>(id).await?)
}

/// Filtered, searched listing for one project, newest first by ingestion
/// time. The free-text search matches case-insensitively across message,
/// stack trace, reporter user name and trace id.
pub async fn list(
    sdb: &Surreal<Any>,
    project_id: RecordId,
    filter: EventFilter,
) -> Result<Vec<ErrorEvent>> {
    let mut sql =
        String::from("SELECT * FROM type::table($table) WHERE project_id = $project_id");
    if filter.status.is_some() {
        sql.push_str(" AND status = $status");
    }
    if filter.severity.is_some() {
        sql.push_str(" AND severity = $severity");
    }
    if filter.event_type.is_some() {
        sql.push_str(" AND event_type = $event_type");
    }
    if filter.search.is_some() {
        sql.push_str(
            " AND (string::contains(string::lowercase(message), $search) \
             OR string::contains(string::lowercase(stack_trace ?? ''), $search) \
             OR string::contains(string::lowercase(user_name ?? ''), $search) \
             OR string::contains(string::lowercase(trace_id ?? ''), $search))",
        );
    }
    sql.push_str(" ORDER BY created_at DESC;");

    let mut query = sdb
        .query(sql)
        .bind(("table", ERROR_EVENT_TABLE))
        .bind(("project_id", project_id));
    if let Some(status) = filter.status {
        query = query.bind(("status", status));
    }
    if let Some(severity) = filter.severity {
        query = query.bind(("severity", severity));
    }
    if let Some(event_type) = filter.event_type {
        query = query.bind(("event_type", event_type));
    }
    if let Some(search) = filter.search {
        query = query.bind(("search", search.to_lowercase()));
    }

    Ok(query.await?.take::<Vec<ErrorEvent>>(0)?)
}

/// Only status and severity are mutable; the caller has already reduced
/// the payload to those two fields.
pub async fn update(
    sdb: &Surreal<Any>,
    id: RecordId,
    changes: serde_json::Value,
) -> Result<ErrorEvent> {
    sdb.update::<Option<ErrorEvent>>(id)
        .merge(changes)
        .await?
        .ok_or(Error::NotFound("Event"))
}

pub async fn delete_by_project(sdb: &Surreal<Any>, project_id: RecordId) -> Result<()> {
    sdb.query("DELETE type::table($table) WHERE project_id = $project_id;")
        .bind(("table", ERROR_EVENT_TABLE))
        .bind(("project_id", project_id))
        .await?;
    Ok(())
}

#[derive(Deserialize)]
struct CountRow {
    count: u64,
}

pub async fn count_since(sdb: &Surreal<Any>, project_id: RecordId, since: String) -> Result<u64> {
    let rows = sdb
        .query(
            "SELECT count() FROM type::table($table) \
             WHERE project_id = $project_id AND created_at > $since GROUP ALL;",
        )
        .bind(("table", ERROR_EVENT_TABLE))
        .bind(("project_id", project_id))
        .bind(("since", since))
        .await?
        .take::<Vec<CountRow>>(0)?;
    Ok(rows.first().map(|r| r.count).unwrap_or(0))
}

pub async fn distinct_users_since(
    sdb: &Surreal<Any>,
    project_id: RecordId,
    since: String,
) -> Result<u64> {
    let names = sdb
        .query(
            "SELECT VALUE user_name FROM type::table($table) \
             WHERE project_id = $project_id AND created_at > $since AND user_name != NONE;",
        )
        .bind(("table", ERROR_EVENT_TABLE))
        .bind(("project_id", project_id))
        .bind(("since", since))
        .await?
        .take::<Vec<String>>(0)?;
    Ok(names.into_iter().collect::<HashSet<_>>().len() as u64)
}
