use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::json;
use surrealdb::{Surreal, engine::any::Any};
use tracing::info;

use crate::{
    errors::{Error, Result},
    middleware::CurrentUser,
    models::{
        invitation::Invitation,
        password_reset::CreatePasswordReset,
        session::CreateSession,
        user::{CreateUser, GlobalRole, User, UserResponse},
    },
    repo,
    state::AppState,
    utils::{pwd, time::time_now, token::generate_token, validated_json::ValidatedJson},
};

#[derive(serde::Deserialize, Debug, Clone, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub confirm_password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

async fn open_session(sdb: &Surreal<Any>, user: &User) -> Result<AuthResponse> {
    let session = repo::sessions::create(
        sdb,
        CreateSession::init(generate_token(), user.id.clone()),
    )
    .await?;
    Ok(AuthResponse {
        token: session.token,
        user: UserResponse::from_user(user),
    })
}

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    if let Some(confirm) = &input.confirm_password {
        if *confirm != input.password {
            return Err(Error::PasswordMismatch);
        }
    }
    if repo::users::exists_by_username(&state.sdb, input.username.clone()).await? {
        return Err(Error::UsernameTaken);
    }
    if repo::users::exists_by_email(&state.sdb, input.email.clone()).await? {
        return Err(Error::EmailTaken);
    }

    // The first registrant bootstraps the instance as global admin.
    // Self-registered users may create projects; invited ones may not.
    let is_first_user = repo::users::count(&state.sdb).await? == 0;
    let user = repo::users::create(
        &state.sdb,
        CreateUser {
            username: input.username,
            email: input.email,
            password_hash: pwd::hash(input.password.as_bytes())?,
            first_name: input.first_name,
            last_name: input.last_name,
            profile_image_url: None,
            role: if is_first_user {
                GlobalRole::Admin
            } else {
                GlobalRole::User
            },
            blocked: false,
            can_create_projects: true,
            created_at: time_now(),
            updated_at: None,
        },
    )
    .await?;

    state.email.send_welcome_email(&user.email, &user.username);

    let response = open_session(&state.sdb, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = repo::users::find_by_username(&state.sdb, input.username)
        .await?
        .ok_or(Error::InvalidCredentials)?;
    if user.blocked {
        return Err(Error::AccountBlocked);
    }
    if !pwd::validate(input.password.as_bytes(), &user.password_hash)? {
        return Err(Error::InvalidCredentials);
    }

    let response = open_session(&state.sdb, &user).await?;
    Ok(Json(response))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<StatusCode> {
    repo::sessions::delete_by_token(&state.sdb, current.session_token).await?;
    Ok(StatusCode::OK)
}

pub async fn current_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<UserResponse>> {
    let user = repo::users::find_by_id(&state.sdb, current.user_id)
        .await?
        .ok_or(Error::Unauthenticated)?;
    Ok(Json(UserResponse::from_user(&user)))
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_image_url: Option<String>,
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<ProfileUpdateRequest>,
) -> Result<Json<UserResponse>> {
    let user = repo::users::find_by_id(&state.sdb, current.user_id.clone())
        .await?
        .ok_or(Error::Unauthenticated)?;

    let mut changes = serde_json::Map::new();
    if let Some(first_name) = input.first_name {
        changes.insert("first_name".into(), json!(first_name));
    }
    if let Some(last_name) = input.last_name {
        changes.insert("last_name".into(), json!(last_name));
    }
    if let Some(profile_image_url) = input.profile_image_url {
        changes.insert("profile_image_url".into(), json!(profile_image_url));
    }
    if let Some(email) = input.email {
        if email != user.email && repo::users::exists_by_email(&state.sdb, email.clone()).await? {
            return Err(Error::EmailTaken);
        }
        changes.insert("email".into(), json!(email));
    }
    changes.insert("updated_at".into(), json!(time_now()));

    let updated =
        repo::users::update_profile(&state.sdb, current.user_id, serde_json::Value::Object(changes))
            .await?;
    Ok(Json(UserResponse::from_user(&updated)))
}

/// Both invitation endpoints demand the same pre-conditions: the token
/// exists, the invitation is not past its expiry, and it is still PENDING.
async fn valid_invitation(sdb: &Surreal<Any>, token: String) -> Result<Invitation> {
    let invitation = repo::invitations::find_by_token(sdb, token)
        .await?
        .ok_or(Error::InvitationNotFound)?;
    if invitation.is_expired() {
        return Err(Error::InvitationExpired);
    }
    if !invitation.is_pending() {
        return Err(Error::InvitationUsed);
    }
    Ok(invitation)
}

pub async fn get_invitation(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let invitation = valid_invitation(&state.sdb, token).await?;
    Ok(Json(json!({
        "email": invitation.email,
        "token": invitation.token,
    })))
}

#[derive(serde::Deserialize, Debug, Clone, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct InviteRegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub confirm_password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub async fn register_with_invitation(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ValidatedJson(input): ValidatedJson<InviteRegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let invitation = valid_invitation(&state.sdb, token).await?;

    if let Some(confirm) = &input.confirm_password {
        if *confirm != input.password {
            return Err(Error::PasswordMismatch);
        }
    }
    if repo::users::exists_by_username(&state.sdb, input.username.clone()).await? {
        return Err(Error::UsernameTaken);
    }

    // The account is bound to the invitation's email, never a
    // caller-supplied one, and starts without project-creation rights.
    let user = repo::users::create(
        &state.sdb,
        CreateUser {
            username: input.username,
            email: invitation.email.clone(),
            password_hash: pwd::hash(input.password.as_bytes())?,
            first_name: input.first_name,
            last_name: input.last_name,
            profile_image_url: None,
            role: GlobalRole::User,
            blocked: false,
            can_create_projects: false,
            created_at: time_now(),
            updated_at: None,
        },
    )
    .await?;

    repo::invitations::mark_accepted(&state.sdb, &invitation).await?;
    info!("invitation for {} accepted by {}", invitation.email, user.username);

    let response = open_session(&state.sdb, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[derive(serde::Deserialize, Debug, Clone, validator::Validate)]
pub struct PasswordResetRequest {
    #[validate(email)]
    pub email: String,
}

pub async fn request_password_reset(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<PasswordResetRequest>,
) -> Result<Json<serde_json::Value>> {
    // Same response whether or not the email exists.
    if let Some(user) = repo::users::find_by_email(&state.sdb, input.email.clone()).await? {
        let reset = repo::password_resets::create(
            &state.sdb,
            CreatePasswordReset::init(user.id.clone(), generate_token()),
        )
        .await?;
        // Unlike every other email, reset failure is a hard failure.
        state
            .email
            .send_password_reset_email(&user.email, &reset.token)?;
    }
    Ok(Json(json!({
        "message": "If the email exists, a reset link has been sent"
    })))
}

#[derive(serde::Deserialize, Debug, Clone, validator::Validate)]
pub struct ResetPasswordRequest {
    pub token: String,
    #[validate(length(min = 8))]
    pub password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>> {
    let reset = repo::password_resets::find_by_token(&state.sdb, input.token)
        .await?
        .ok_or(Error::InvalidResetToken)?;
    if reset.used || reset.is_expired() {
        return Err(Error::InvalidResetToken);
    }

    repo::users::update_password(
        &state.sdb,
        reset.user_id.clone(),
        pwd::hash(input.password.as_bytes())?,
    )
    .await?;
    repo::password_resets::mark_used(&state.sdb, &reset).await?;

    Ok(Json(json!({ "message": "Password reset successfully" })))
}
