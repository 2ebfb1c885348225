// API routes and handlers

pub mod health;
pub mod routes;
pub mod users;

pub use routes::{create_app, create_routes, App};
