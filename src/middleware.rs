use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use surrealdb::RecordId;

use crate::access::Caller;
use crate::errors::{Error, Result};
use crate::models::user::GlobalRole;
use crate::repo;
use crate::state::AppState;

/// Caller identity resolved once per request by [`auth_session_middleware`]
/// and passed explicitly into every access check from there on.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: RecordId,
    pub role: GlobalRole,
    pub can_create_projects: bool,
    pub session_token: String,
}

impl CurrentUser {
    pub fn caller(&self) -> Caller {
        Caller {
            user_id: self.user_id.clone(),
            role: self.role,
        }
    }
}

/// Resolves the bearer token to a session row and the session to a user,
/// then stores the caller identity as a request extension. Requests
/// without a valid session never reach the protected handlers.
pub async fn auth_session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = bearer_token(request.headers())?;

    let session = repo::sessions::find_by_token(&state.sdb, token)
        .await?
        .ok_or(Error::Unauthenticated)?;
    let user = repo::users::find_by_id(&state.sdb, session.user_id)
        .await?
        .ok_or(Error::Unauthenticated)?;
    if user.blocked {
        return Err(Error::AccountBlocked);
    }

    request.extensions_mut().insert(CurrentUser {
        user_id: user.id.clone(),
        role: user.role,
        can_create_projects: user.can_create_projects,
        session_token: session.token,
    });

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<String> {
    let header_value = headers
        .get(AUTHORIZATION)
        .ok_or(Error::Unauthenticated)?
        .to_str()
        .map_err(|_| Error::Unauthenticated)?;

    let mut parts = header_value.trim().splitn(2, ' ');

    let scheme = parts.next().ok_or(Error::Unauthenticated)?;
    let token = parts.next().ok_or(Error::Unauthenticated)?;

    if scheme != "Bearer" {
        tracing::warn!("Invalid auth scheme: {scheme}");
        return Err(Error::InvalidScheme);
    }

    Ok(token.to_string())
}
