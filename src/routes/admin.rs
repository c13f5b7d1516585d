use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::info;

use crate::{
    access::require_admin,
    consts::table_const::{PROJECT_TABLE, USER_TABLE},
    errors::{Error, Result},
    middleware::CurrentUser,
    models::{
        invitation::{CreateInvitation, InvitationResponse},
        membership::{MembershipResponse, ProjectRole},
        project::ProjectResponse,
        user::UserResponse,
    },
    repo,
    state::AppState,
    utils::{record::record_id, token::generate_token, validated_json::ValidatedJson},
};

pub async fn list_users(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<UserResponse>>> {
    require_admin(&current.caller())?;

    let users = repo::users::find_all(&state.sdb).await?;
    Ok(Json(users.iter().map(UserResponse::from_user).collect()))
}

#[derive(serde::Deserialize, Debug, Clone, validator::Validate)]
pub struct InviteRequest {
    #[validate(email)]
    pub email: String,
}

/// Idempotent per email: a second invite for an address with a PENDING
/// invitation returns the existing row (same token) untouched.
pub async fn invite_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(input): ValidatedJson<InviteRequest>,
) -> Result<Json<InvitationResponse>> {
    require_admin(&current.caller())?;

    if repo::users::exists_by_email(&state.sdb, input.email.clone()).await? {
        return Err(Error::EmailTaken);
    }
    if let Some(existing) =
        repo::invitations::find_pending_by_email(&state.sdb, input.email.clone()).await?
    {
        return Ok(Json(InvitationResponse::from_invitation(&existing)));
    }

    let invitation = repo::invitations::create(
        &state.sdb,
        CreateInvitation::init(input.email, generate_token(), current.user_id.clone()),
    )
    .await?;
    info!("created invitation for {}", invitation.email);

    let inviter_username = repo::users::find_by_id(&state.sdb, current.user_id)
        .await?
        .map(|u| u.username)
        .unwrap_or_else(|| "A team member".to_string());
    state
        .email
        .send_invitation_email(&invitation.email, &invitation.token, &inviter_username);

    Ok(Json(InvitationResponse::from_invitation(&invitation)))
}

pub async fn list_invitations(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<InvitationResponse>>> {
    require_admin(&current.caller())?;

    let invitations = repo::invitations::find_all(&state.sdb).await?;
    Ok(Json(
        invitations
            .iter()
            .map(InvitationResponse::from_invitation)
            .collect(),
    ))
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub user_id: String,
    pub project_id: String,
    pub role: String,
}

pub async fn assign_user_to_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<AssignRequest>,
) -> Result<Json<serde_json::Value>> {
    require_admin(&current.caller())?;

    let role = ProjectRole::parse(&input.role).ok_or(Error::InvalidRole(input.role))?;
    let user = repo::users::find_by_id(&state.sdb, record_id(USER_TABLE, &input.user_id))
        .await?
        .ok_or(Error::NotFound("User"))?;
    let project = repo::projects::find_by_id(&state.sdb, record_id(PROJECT_TABLE, &input.project_id))
        .await?
        .ok_or(Error::NotFound("Project"))?;

    let membership =
        repo::memberships::assign(&state.sdb, project.id, user.id, role).await?;
    info!(
        "assigned {} to project {} as {}",
        user.username,
        project.name,
        membership.role.as_str()
    );

    Ok(Json(json!({
        "message": format!(
            "User {} assigned to project {} as {}",
            user.username,
            project.name,
            membership.role.as_str()
        )
    })))
}

pub async fn list_project_users(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<MembershipResponse>>> {
    require_admin(&current.caller())?;

    let project = repo::projects::find_by_id(&state.sdb, record_id(PROJECT_TABLE, &project_id))
        .await?
        .ok_or(Error::NotFound("Project"))?;

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

pub async fn remove_user_from_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path((project_id, user_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>> {
    require_admin(&current.caller())?;

    let project = repo::projects::find_by_id(&state.sdb, record_id(PROJECT_TABLE, &project_id))
        .await?
        .ok_or(Error::NotFound("Project"))?;
    let user = repo::users::find_by_id(&state.sdb, record_id(USER_TABLE, &user_id))
        .await?
        .ok_or(Error::NotFound("User"))?;

    repo::memberships::delete_pair(&state.sdb, project.id, user.id).await?;
    Ok(Json(json!({ "message": "User removed from project" })))
}

pub async fn list_user_projects(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<serde_json::Value>>> {
    require_admin(&current.caller())?;

    let user = repo::users::find_by_id(&state.sdb, record_id(USER_TABLE, &user_id))
        .await?
        .ok_or(Error::NotFound("User"))?;

    let memberships = repo::memberships::find_by_user(&state.sdb, user.id).await?;
    let mut out = Vec::with_capacity(memberships.len());
    for membership in &memberships {
        let Some(project) =
            repo::projects::find_by_id(&state.sdb, membership.project_id.clone()).await?
        else {
            continue; // orphaned membership row
        };
        out.push(json!({
            "project": ProjectResponse::from_project(&project),
            "role": membership.role.as_str(),
        }));
    }
    Ok(Json(out))
}
