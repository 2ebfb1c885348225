use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Where the landing page and static assets live on disk.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    pub public_dir: PathBuf,
    pub views_dir: PathBuf,
}

impl Default for StaticAssets {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            views_dir: PathBuf::from("views"),
        }
    }
}

impl StaticAssets {
    pub fn index_page(&self) -> PathBuf {
        self.views_dir.join("index.html")
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub assets: StaticAssets,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {port:?}"))?,
            None => 3000,
        };
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let defaults = StaticAssets::default();
        let assets = StaticAssets {
            public_dir: lookup("PUBLIC_DIR").map(PathBuf::from).unwrap_or(defaults.public_dir),
            views_dir: lookup("VIEWS_DIR").map(PathBuf::from).unwrap_or(defaults.views_dir),
        };

        Ok(AppConfig {
            host,
            port,
            log_level,
            assets,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
