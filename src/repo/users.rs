use serde::Deserialize;
use surrealdb::{RecordId, Surreal, engine::any::Any};

use crate::consts::table_const::USER_TABLE;
use crate::errors::{Error, Result};
use crate::models::user::{CreateUser, User};
use crate::utils::time::time_now;

pub async fn create(sdb: &Surreal<Any>, data: CreateUser) -> Result<User> {
    sdb.create::<Option<User>>(USER_TABLE)
        .content(data)
        .await?
        .ok_or(Error::InternalServerError)
}

pub async fn find_by_id(sdb: &Surreal<Any>, id: RecordId) -> Result<Option<User>> {
    Ok(sdb.select::<Option<User>>(id).await?)
}

pub async fn find_by_username(sdb: &Surreal<Any>, username: String) -> Result<Option<User>> {
    let users = sdb
        .query("SELECT * FROM type::table($table) WHERE username = $username;")
        .bind(("table", USER_TABLE))
        .bind(("username", username))
        .await?
        .take::<Vec<User>>(0)?;
    Ok(users.into_iter().next())
}

pub async fn find_by_email(sdb: &Surreal<Any>, email: String) -> Result<Option<User>> {
    let users = sdb
        .query("SELECT * FROM type::table($table) WHERE email = $email;")
        .bind(("table", USER_TABLE))
        .bind(("email", email))
        .await?
        .take::<Vec<User>>(0)?;
    Ok(users.into_iter().next())
}

pub async fn exists_by_username(sdb: &Surreal<Any>, username: String) -> Result<bool> {
    Ok(find_by_username(sdb, username).await?.is_some())
}

pub async fn exists_by_email(sdb: &Surreal<Any>, email: String) -> Result<bool> {
    Ok(find_by_email(sdb, email).await?.is_some())
}

pub async fn find_all(sdb: &Surreal<Any>) -> Result<Vec<User>> {
    Ok(sdb.select::<Vec<User>>(USER_TABLE).await?)
}

#[derive(Deserialize)]
struct CountRow {
    count: usize,
}

pub async fn count(sdb: &Surreal<Any>) -> Result<usize> {
    let rows = sdb
        .query("SELECT count() FROM type::table($table) GROUP ALL;")
        .bind(("table", USER_TABLE))
        .await?
        .take::<Vec<CountRow>>(0)?;
    Ok(rows.first().map(|r| r.count).unwrap_or(0))
}

pub async fn update_profile(
    sdb: &Surreal<Any>,
    id: RecordId,
    changes: serde_json::Value,
) -> Result<User> {
    sdb.update::<Option<User>>(id)
        .merge(changes)
        .await?
        .ok_or(Error::NotFound("User"))
}

pub async fn update_password(sdb: &Surreal<Any>, id: RecordId, password_hash: String) -> Result<User> {
    sdb.update::<Option<User>>(id)
        .merge(serde_json::json!({
            "password_hash": password_hash,
            "updated_at": time_now(),
        }))
        .await?
        .ok_or(Error::NotFound("User"))
}
