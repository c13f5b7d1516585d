use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    access::{self, ProjectAction},
    consts::table_const::{PROJECT_TABLE, PROJECT_USER_TABLE},
    errors::{Error, Result},
    middleware::CurrentUser,
    models::{
        membership::MembershipResponse,
        project::{CreateProject, Project, ProjectResponse},
        user::UserResponse,
    },
    repo,
    state::AppState,
    utils::{
        record::record_id, time::time_now, time::time_now_minus_hours, token::generate_token,
        validated_json::ValidatedJson,
    },
};

async fn project_or_404(state: &AppState, id: &str) -> Result<Project> {
    repo::projects::find_by_id(&state.sdb, record_id(PROJECT_TABLE, id))
        .await?
        .ok_or(Error::NotFound("Project"))
}

/// Ownership + membership feed the evaluator for one project-scoped action.
pub(super) async fn authorize(
    state: &AppState,
    current: &CurrentUser,
    project: &Project,
    action: ProjectAction,
) -> Result<()> {
    let membership = repo::memberships::find_pair(
        &state.sdb,
        project.id.clone(),
        current.user_id.clone(),
    )
    .await?;
    access::evaluate(
        Some(&current.caller()),
        action,
        &project.owner_id,
        membership.map(|m| m.role),
    )
    .require()
}

/// Global admins see every project; everyone else sees the projects they
/// own. Each entry carries last-24h error and reporting-user counts.
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<ProjectResponse>>> {
    let projects = if current.role.is_admin() {
        repo::projects::find_all(&state.sdb).await?
    } else {
        repo::projects::find_by_owner(&state.sdb, current.user_id.clone()).await?
    };

    let since = time_now_minus_hours(24);
    let mut out = Vec::with_capacity(projects.len());
    for project in &projects {
        let error_count =
            repo::events::count_since(&state.sdb, project.id.clone(), since.clone()).await?;
        let user_count =
            repo::events::distinct_users_since(&state.sdb, project.id.clone(), since.clone())
                .await?;
        out.push(ProjectResponse::with_stats(project, error_count, user_count));
    }
    Ok(Json(out))
}

#[derive(serde::Deserialize, Debug, Clone, validator::Validate)]
pub struct ProjectRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub platform: String,
}

pub async fn create_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(input): ValidatedJson<ProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>)> {
    // Invitation-created accounts lack this capability by policy.
    if !current.can_create_projects && !current.role.is_admin() {
        return Err(Error::CannotCreateProjects);
    }

    let project = repo::projects::create(
        &state.sdb,
        CreateProject {
            name: input.name,
            platform: input.platform,
            api_key: generate_token(),
            owner_id: current.user_id,
            created_at: time_now(),
        },
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse::from_project(&project)),
    ))
}

pub async fn get_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>> {
    let project = project_or_404(&state, &id).await?;
    authorize(&state, &current, &project, ProjectAction::ViewProject).await?;
    Ok(Json(ProjectResponse::from_project(&project)))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let project = project_or_404(&state, &id).await?;
    authorize(&state, &current, &project, ProjectAction::DeleteProject).await?;

    repo::projects::delete(&state.sdb, project.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_project_users(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MembershipResponse>>> {
    let project = project_or_404(&state, &id).await?;
    authorize(&state, &current, &project, ProjectAction::ListMembers).await?;

    let memberships = repo::memberships::find_by_project(&state.sdb, project.id).await?;
    let mut out = Vec::with_capacity(memberships.len());
    for membership in &memberships {
        let user = repo::users::find_by_id(&state.sdb, membership.user_id.clone()).await?;
        out.push(MembershipResponse::from_membership(
            membership,
            user.as_ref().map(UserResponse::from_user),
        ));
    }
    Ok(Json(out))
}

pub async fn remove_project_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path((project_id, project_user_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    let project = project_or_404(&state, &project_id).await?;
    authorize(&state, &current, &project, ProjectAction::RemoveMember).await?;

    let membership =
        repo::memberships::find_by_id(&state.sdb, record_id(PROJECT_USER_TABLE, &project_user_id))
            .await?
            .ok_or(Error::NotFound("Project user"))?;
    if membership.project_id != project.id {
        return Err(Error::MembershipMismatch);
    }

    repo::memberships::delete_by_id(&state.sdb, membership.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
