//! Persistence access. Free async functions over the shared SurrealDB
//! handle; one module per table. Callers treat "no rows" as `None`,
//! never as an error.

pub mod events;
pub mod invitations;
pub mod memberships;
pub mod password_resets;
pub mod projects;
pub mod sessions;
pub mod users;
