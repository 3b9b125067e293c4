pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod normalize;
pub mod upstream;

pub use app::{app, AppState};
pub use config::AppConfig;
pub use error::ApiError;
