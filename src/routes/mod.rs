use axum::{
    Json, Router,
    extract::State,
    middleware,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::{middleware::auth_session_middleware, state::AppState};

pub mod admin;
pub mod auth;
pub mod events;
pub mod projects;

pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_router(state.clone()))
        .with_state(state)
}

fn api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(public(state.clone()))
        .merge(protected(state))
}

/// No session required: registration, login, invitation acceptance,
/// password reset, and the API-key-authenticated ingestion endpoint.
fn public(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route(
            "/register/invite/{token}",
            get(auth::get_invitation).post(auth::register_with_invitation),
        )
        .route("/password/reset-request", post(auth::request_password_reset))
        .route("/password/reset", post(auth::reset_password))
        .route("/ingest", post(events::ingest))
        .route("/feature-flags", get(feature_flags))
        .with_state(state)
}

/// Lets the dashboard adapt to deployment capabilities. Keycloak SSO is
/// not wired up, so that flag is always false.
async fn feature_flags(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "emailEnabled": state.email.is_enabled(),
        "keycloakEnabled": false,
    }))
}

fn protected(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/logout", post(auth::logout))
        .route("/auth/user", get(auth::current_user))
        .route("/profile", put(auth::update_profile))
        // ! projects
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project).delete(projects::delete_project),
        )
        .route("/projects/{id}/users", get(projects::list_project_users))
        .route(
            "/projects/{project_id}/users/{project_user_id}",
            delete(projects::remove_project_user),
        )
        .route("/projects/{id}/events", get(events::list_events))
        // ! events
        .route(
            "/events/{id}",
            get(events::get_event).patch(events::update_event),
        )
        // ! admin
        .route("/admin/users", get(admin::list_users))
        .route(
            "/admin/invitations",
            get(admin::list_invitations).post(admin::invite_user),
        )
        .route("/admin/projects/assign", post(admin::assign_user_to_project))
        .route(
            "/admin/projects/{project_id}/users",
            get(admin::list_project_users),
        )
        .route(
            "/admin/projects/{project_id}/users/{user_id}",
            delete(admin::remove_user_from_project),
        )
        .route("/admin/users/{user_id}/projects", get(admin::list_user_projects))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_session_middleware,
        ))
        .with_state(state)
}
