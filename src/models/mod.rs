// Records, request forms and response shapes

pub mod date;
pub mod exercise;
pub mod log;
pub mod user;
pub mod validation;

pub use date::*;
pub use exercise::*;
pub use log::*;
pub use user::*;
pub use validation::ValidationError;
