use std::sync::{Arc, RwLock};

use tapword_config::Config;
use tapword_core::{SelectionSnapshot, SelectionSource};

/// Latest selection pushed by the frontend
#[derive(Default)]
pub struct SharedSelection {
    current: RwLock<SelectionSnapshot>,
}

impl SharedSelection {
    pub fn update(&self, snapshot: SelectionSnapshot) {
        match self.current.write() {
            Ok(mut current) => *current = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }
}

impl SelectionSource for SharedSelection {
    fn snapshot(&self) -> SelectionSnapshot {
        match self.current.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

pub struct AppState {
    pub config: Arc<tokio::sync::RwLock<Config>>,
    pub selection: Arc<SharedSelection>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(tokio::sync::RwLock::new(config)),
            selection: Arc::new(SharedSelection::default()),
        }
    }
}
