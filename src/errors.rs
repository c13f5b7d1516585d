use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use surrealdb::Error as SError;

use thiserror::Error;
use tracing::error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Argon 2 Error: {0}")]
    Argon2Error(#[from] argon2::password_hash::Error),

    #[error("SurrealDb Error: {0}")]
    SurrealError(#[from] SError),

    #[error("Io Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Validator Error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Json Rejection Error: {0}")]
    AxumJsonRejection(#[from] axum::extract::rejection::JsonRejection),

    // ! Session auth
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Invalid authorization scheme")]
    InvalidScheme,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Account is blocked")]
    AccountBlocked,

    // ! Access control
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Admin access required")]
    AdminRequired,
    #[error("Not permitted to create projects")]
    CannotCreateProjects,

    // ! Registration / profile
    #[error("Username already exists")]
    UsernameTaken,
    #[error("User with this email already exists")]
    EmailTaken,
    #[error("Passwords do not match")]
    PasswordMismatch,

    // ! Invitations
    #[error("Invitation not found")]
    InvitationNotFound,
    #[error("Invitation has expired")]
    InvitationExpired,
    #[error("Invitation has already been used")]
    InvitationUsed,

    // ! Ingestion
    #[error("Invalid API Key")]
    InvalidApiKey,

    // ! Password reset
    #[error("Reset token is invalid or has expired")]
    InvalidResetToken,
    #[error("Failed to send email: {0}")]
    EmailDelivery(String),

    #[error("Invalid role: {0}. Must be one of: VIEWER, CONTRIBUTOR, ADMIN")]
    InvalidRole(String),
    #[error("Project user does not belong to this project")]
    MembershipMismatch,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Internal Error")]
    InternalServerError,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            Error::Argon2Error(error) => {
                error!("Argon 2 Error: {:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::SurrealError(error) => {
                error!("Surreal Error: {:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::IoError(error) => {
                error!("Io Error: {:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::ValidationError(error) => {
                let message = format!("Input validation error: [{}]", error).replace('\n', ", ");
                (StatusCode::BAD_REQUEST, message)
            }
            Error::AxumJsonRejection(error) => (StatusCode::BAD_REQUEST, error.to_string()),

            Error::Unauthenticated | Error::InvalidScheme => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            Error::InvalidCredentials | Error::AccountBlocked => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            // Per-project denials answer 401, the admin gate answers 403.
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            Error::AdminRequired | Error::CannotCreateProjects => {
                (StatusCode::FORBIDDEN, self.to_string())
            }

            Error::UsernameTaken
            | Error::EmailTaken
            | Error::PasswordMismatch
            | Error::InvitationExpired
            | Error::InvitationUsed
            | Error::InvalidResetToken
            | Error::InvalidRole(_)
            | Error::MembershipMismatch => (StatusCode::BAD_REQUEST, self.to_string()),

            Error::InvitationNotFound | Error::InvalidApiKey | Error::NotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }

            Error::EmailDelivery(reason) => {
                error!("Email delivery failure: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to send email".to_string(),
                )
            }
            Error::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Error".to_string(),
            ),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
