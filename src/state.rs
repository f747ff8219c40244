use crate::storage::FileStore;
use crate::store::DailyTaskStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<DailyTaskStore<FileStore>>>,
}

impl AppState {
    pub fn new(store: DailyTaskStore<FileStore>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}
