use anyhow::Result;
use std::env;

use crate::constants::DEFAULT_SERVER_PORT;

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub service_role_key: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            supabase_url: env::var("SUPABASE_URL")
                .map_err(|_| anyhow::anyhow!("SUPABASE_URL must be set"))?,
            service_role_key: env::var("SUPABASE_SERVICE_ROLE")
                .map_err(|_| anyhow::anyhow!("SUPABASE_SERVICE_ROLE must be set"))?,
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_SERVER_PORT),
        })
    }
}
