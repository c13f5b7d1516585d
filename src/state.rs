use surrealdb::{
    Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
};

use crate::config::Config;
use crate::email::EmailService;
use crate::errors::Result;

#[derive(Debug, Clone)]
pub struct AppState {
    pub sdb: Surreal<Any>,
    pub email: EmailService,
}

impl AppState {
    pub async fn init(config: &Config) -> Result<Self> {
        let sdb = any::connect(&config.db_url).await?;
        // Embedded engines (mem://, used by tests) take no credentials.
        if config.db_url.starts_with("ws") || config.db_url.starts_with("http") {
            sdb.signin(Root {
                username: &config.db_user,
                password: &config.db_pass,
            })
            .await?;
        }
        sdb.use_ns(&config.db_ns).use_db(&config.db_name).await?;

        Ok(Self {
            sdb,
            email: EmailService::new(
                config.email_enabled,
                config.email_from.clone(),
                config.base_url.clone(),
            ),
        })
    }
}
