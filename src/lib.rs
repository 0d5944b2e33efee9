pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod telemetry;

pub use app::MovieFinder;
pub use config::Config;
pub use error::{AppError, AppResult};
