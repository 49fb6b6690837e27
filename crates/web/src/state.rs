use std::sync::Arc;

use storage::{DataStore, ProgressTracker};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DataStore>,
    pub tracker: ProgressTracker,
}

impl AppState {
    pub fn new(store: Arc<dyn DataStore>, mock_feedback: bool) -> Self {
        let tracker = ProgressTracker::new(store.clone(), mock_feedback);
        Self { store, tracker }
    }
}
