use surrealdb::{Surreal, engine::any::Any};

use crate::consts::table_const::INVITATION_TABLE;
use crate::errors::{Error, Result};
use crate::models::invitation::{CreateInvitation, Invitation, InvitationStatus};

pub async fn create(sdb: &Surreal<Any>, data: CreateInvitation) -> Result<Invitation> {
    sdb.create::<Option<Invitation>>(INVITATION_TABLE)
        .content(data)
        .await?
        .ok_or(Error::InternalServerError)
}

// $token is a protected built-in parameter in SurrealDB, hence $tk.
pub async fn find_by_token(sdb: &Surreal<Any>, token: String) -> Result<Option<Invitation>> {
    let rows = sdb
        .query("SELECT * FROM type::table($table) WHERE token = $tk;")
        .bind(("table", INVITATION_TABLE))
        .bind(("tk", token))
        .await?
        .take::<Vec<Invitation>>(0)?;
    Ok(rows.into_iter().next())
}

/// The dedupe lookup behind idempotent invitation creation. Expiry is not
/// consulted here; a stale PENDING row is still returned unchanged.
pub async fn find_pending_by_email(
    sdb: &Surreal<Any>,
    email: String,
) -> Result<Option<Invitation>> {
    let rows = sdb
        .query("SELECT * FROM type::table($table) WHERE email = $email AND status = $status;")
        .bind(("table", INVITATION_TABLE))
        .bind(("email", email))
        .bind(("status", InvitationStatus::Pending))
        .await?
        .take::<Vec<Invitation>>(0)?;
    Ok(rows.into_iter().next())
}

pub async fn find_all(sdb: &Surreal<Any>) -> Result<Vec<Invitation>> {
    Ok(sdb.select::<Vec<Invitation>>(INVITATION_TABLE).await?)
}

/// One-way PENDING -> ACCEPTED transition.
pub async fn mark_accepted(sdb: &Surreal<Any>, invitation: &Invitation) -> Result<Invitation> {
    sdb.update::<Option<Invitation>>(invitation.id.clone())
        .merge(serde_json::json!({ "status": InvitationStatus::Accepted }))
        .await?
        .ok_or(Error::InternalServerError)
}
