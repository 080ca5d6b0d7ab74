use anyhow::Context;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub access_token_secret: String,
    pub access_token_ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./noteboard.db".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .unwrap_or(8000);

        let access_token_secret =
            std::env::var("ACCESS_TOKEN_SECRET").context("ACCESS_TOKEN_SECRET must be set")?;

        // Defaults to a ~25-day window. Configuration, not a constant,
        // so deployments can tune it down.
        let access_token_ttl_minutes = std::env::var("ACCESS_TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "36000".to_string())
            .parse()
            .unwrap_or(36000);

        Ok(Self {
            database_path,
            port,
            access_token_secret,
            access_token_ttl_minutes,
        })
    }
}
