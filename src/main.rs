use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::{config::Config, errors::Result, state::AppState};

pub mod access;
pub mod config;
pub mod consts;
pub mod email;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod repo;
pub mod routes;
pub mod state;
pub mod utils;


#[tokio::main]
async fn main() -> Result<()> {
    tracing::subscriber::set_global_default(FmtSubscriber::default()).unwrap();

    let config = Config::from_env();
    let state = AppState::init(&config).await?;

    info!("Starting server");

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Serving faultline at http://{}", listener.local_addr()?);
    axum::serve(listener, routes::app(state)).await?;

    Ok(())
}
