pub mod app;
pub mod config;
pub mod date;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod projection;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::FuelConfig;
pub use errors::{AppError, FuelError};
pub use models::{LogEntry, TankState};
pub use state::AppState;
pub use storage::{resolve_data_path, EntryLog, FileStore};
