//! Server configuration read from the environment (and `.env` if present).

use std::env;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TYPST_BIN: &str = "typst";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty means any origin is allowed.
    pub allowed_origins: Vec<String>,
    pub typst_bin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: Vec::new(),
            typst_bin: DEFAULT_TYPST_BIN.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or invalid values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("GRADE_SERVER_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("GRADE_SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                log::warn!(
                    "GRADE_SERVER_PORT '{}' is not a valid port, using {}",
                    raw,
                    DEFAULT_PORT
                );
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let typst_bin = lookup("TYPST_BIN")
            .filter(|b| !b.trim().is_empty())
            .unwrap_or(defaults.typst_bin);

        Self {
            host,
            port,
            allowed_origins,
            typst_bin,
        }
    }
}
