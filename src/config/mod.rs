// Environment-driven configuration

pub mod app;
pub mod database;

pub use app::{AppConfig, StaticAssets};
pub use database::{DatabaseConfig, MEMORY_URL_SCHEME};
