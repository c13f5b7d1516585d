use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub db_url: String,
    pub db_user: String,
    pub db_pass: String,
    pub db_ns: String,
    pub db_name: String,
    pub email_enabled: bool,
    pub email_from: String,
    pub base_url: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("FAULTLINE_BIND", "127.0.0.1:5000"),
            db_url: env_or("FAULTLINE_DB_URL", "ws://localhost:8000"),
            db_user: env_or("FAULTLINE_DB_USER", "root"),
            db_pass: env_or("FAULTLINE_DB_PASS", "root"),
            db_ns: env_or("FAULTLINE_DB_NS", "faultline"),
            db_name: env_or("FAULTLINE_DB_NAME", "faultline"),
            email_enabled: env_or("FAULTLINE_EMAIL_ENABLED", "false") == "true",
            email_from: env_or("FAULTLINE_EMAIL_FROM", "noreply@faultline.dev"),
            base_url: env_or("FAULTLINE_BASE_URL", "http://localhost:5000"),
        }
    }
}
