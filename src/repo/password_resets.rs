use surrealdb::{Surreal, engine::any::Any};

use crate::consts::table_const::PASSWORD_RESET_TABLE;
use crate::errors::{Error, Result};
use crate::models::password_reset::{CreatePasswordReset, PasswordReset};

pub async fn create(sdb: &Surreal<Any>, data: CreatePasswordReset) -> Result<PasswordReset> {
    sdb.create::<Option<PasswordReset>>(PASSWORD_RESET_TABLE)
        .content(data)
        .await?
        .ok_or(Error::InternalServerError)
}

// $token is a protected built-in parameter in SurrealDB, hence $tk.
pub async fn find_by_token(sdb: &Surreal<Any>, token: String) -> Result<Option<PasswordReset>> {
    let rows = sdb
        .query("SELECT * FROM type::table($table) WHERE token = $tk;")
        .bind(("table", PASSWORD_RESET_TABLE))
        .bind(("tk", token))
        .await?
        .take::<Vec<PasswordReset>>(0)?;
    Ok(rows.into_iter().next())
}

pub async fn mark_used(sdb: &Surreal<Any>, reset: &PasswordReset) -> Result<PasswordReset> {
    sdb.update::<Option<PasswordReset>>(reset.id.clone())
        .merge(serde_json::json!({ "used": true }))
        .await?
        .ok_or(Error::InternalServerError)
}
