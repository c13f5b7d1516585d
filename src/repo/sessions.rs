use surrealdb::{Surreal, engine::any::Any};

use crate::consts::table_const::SESSION_TABLE;
use crate::errors::{Error, Result};
use crate::models::session::{CreateSession, Session};

pub async fn create(sdb: &Surreal<Any>, data: CreateSession) -> Result<Session> {
    sdb.create::<Option<Session>>(SESSION_TABLE)
        .content(data)
        .await?
        .ok_or(Error::InternalServerError)
}

// $token is a protected built-in parameter in SurrealDB; the bind is
// named $tk while the column stays `token`.
pub async fn find_by_token(sdb: &Surreal<Any>, token: String) -> Result<Option<Session>> {
    let rows = sdb
        .query("SELECT * FROM type::table($table) WHERE token = $tk;")
        .bind(("table", SESSION_TABLE))
        .bind(("tk", token))
        .await?
        .take::<Vec<Session>>(0)?;
    Ok(rows.into_iter().next())
}

pub async fn delete_by_token(sdb: &Surreal<Any>, token: String) -> Result<()> {
    sdb.query("DELETE type::table($table) WHERE token = $tk;")
        .bind(("table", SESSION_TABLE))
        .bind(("tk", token))
        .await?;
    Ok(())
}
