use crate::config::FuelConfig;
use crate::notify::{LogNotifier, Notifier};
use crate::storage::{EntryLog, FileStore};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: FuelConfig,
    /// Held across each read-modify-write of the log.
    pub log: Arc<Mutex<EntryLog<FileStore>>>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: FuelConfig, log: EntryLog<FileStore>) -> Self {
        Self {
            config,
            log: Arc::new(Mutex::new(log)),
            notifier: Arc::new(LogNotifier),
        }
    }
}
