use anyhow::{Context, Result};
use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_JSON_LIMIT: usize = 256 * 1024;

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// The one browser origin allowed through CORS (the frontend dev server).
    pub allowed_origin: String,
    pub json_limit: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {}", v))?,
            None => DEFAULT_PORT,
        };

        let allowed_origin = lookup("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());

        let json_limit = match lookup("JSON_LIMIT") {
            Some(v) => v
                .parse::<usize>()
                .with_context(|| format!("Invalid JSON_LIMIT value: {}", v))?,
            None => DEFAULT_JSON_LIMIT,
        };

        Ok(Self {
            host,
            port,
            allowed_origin,
            json_limit,
        })
    }
}
