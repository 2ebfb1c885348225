//! Exercise tracker: register users, log exercises against them and read
//! back a filtered exercise history over a small JSON API.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod store;

pub use errors::ApiError;
