use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub server_port: u16,
    pub log_level: String,
    pub cors_origins: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            // Base URL of the upstream parking REST API. Required.
            api_url: env::var("API_URL")?,
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            // Comma-separated allow-list; when unset the server answers any origin.
            cors_origins: env::var("CORS_ORIGINS").ok().map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            }),
        })
    }
}
