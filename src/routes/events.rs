use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    access::ProjectAction,
    consts::table_const::{ERROR_EVENT_TABLE, PROJECT_TABLE},
    errors::{Error, Result},
    middleware::CurrentUser,
    models::event::{EventResponse, IngestRequest, UpdateEventRequest},
    repo::{self, events::EventFilter},
    routes::projects::authorize,
    state::AppState,
    utils::{record::record_id, time::time_now, validated_json::ValidatedJson},
};

/// The ingestion trust boundary: no session, the API key alone
/// authenticates, and any holder of the key may post events.
pub async fn ingest(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<IngestRequest>,
) -> Result<(StatusCode, Json<EventResponse>)> {
    info!("receiving error ingestion: {}", input.message);

    let project = repo::projects::find_by_api_key(&state.sdb, input.api_key.clone())
        .await?
        .ok_or_else(|| {
            warn!("invalid api key on ingest");
            Error::InvalidApiKey
        })?;

    let event = repo::events::create(
        &state.sdb,
        input.into_event(project.id, time_now()),
    )
    .await?;
    info!("created error event: {}", event.id);

    Ok((StatusCode::CREATED, Json(EventResponse::from_event(&event))))
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct EventListQuery {
    pub status: Option<String>,
    pub severity: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub search: Option<String>,
}

// A present-but-empty query parameter means "no constraint".
fn non_empty(val: Option<String>) -> Option<String> {
    val.filter(|v| !v.is_empty())
}

pub async fn list_events(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<Vec<EventResponse>>> {
    let project = repo::projects::find_by_id(&state.sdb, record_id(PROJECT_TABLE, &id))
        .await?
        .ok_or(Error::NotFound("Project"))?;
    authorize(&state, &current, &project, ProjectAction::ListEvents).await?;

    let events = repo::events::list(
        &state.sdb,
        project.id,
        EventFilter {
            status: non_empty(query.status),
            severity: non_empty(query.severity),
            event_type: non_empty(query.event_type),
            search: non_empty(query.search),
        },
    )
    .await?;
    Ok(Json(events.iter().map(EventResponse::from_event).collect()))
}

pub async fn get_event(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<EventResponse>> {
    let event = repo::events::find_by_id(&state.sdb, record_id(ERROR_EVENT_TABLE, &id))
        .await?
        .ok_or(Error::NotFound("Event"))?;
    let project = repo::projects::find_by_id(&state.sdb, event.project_id.clone())
        .await?
        .ok_or(Error::NotFound("Project"))?;
    authorize(&state, &current, &project, ProjectAction::ViewEvent).await?;

    Ok(Json(EventResponse::from_event(&event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(input): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>> {
    let event = repo::events::find_by_id(&state.sdb, record_id(ERROR_EVENT_TABLE, &id))
        .await?
        .ok_or(Error::NotFound("Event"))?;
    let project = repo::projects::find_by_id(&state.sdb, event.project_id.clone())
        .await?
        .ok_or(Error::NotFound("Project"))?;
    authorize(&state, &current, &project, ProjectAction::UpdateEvent).await?;

    // Only status and severity are mutable; omitted fields keep their
    // stored value, anything else in the body was never deserialized.
    let mut changes = serde_json::Map::new();
    if let Some(status) = input.status {
        changes.insert("status".into(), json!(status));
    }
    if let Some(severity) = input.severity {
        changes.insert("severity".into(), json!(severity));
    }
    if changes.is_empty() {
        return Ok(Json(EventResponse::from_event(&event)));
    }

    let updated =
        repo::events::update(&state.sdb, event.id, serde_json::Value::Object(changes)).await?;
    Ok(Json(EventResponse::from_event(&updated)))
}
