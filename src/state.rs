use crate::persistence::Persistence;
use crate::survey::Survey;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub survey: Arc<Mutex<Survey>>,
    pub persistence: Persistence,
}

impl AppState {
    pub fn new(survey: Survey, persistence: Persistence) -> Self {
        Self {
            survey: Arc::new(Mutex::new(survey)),
            persistence,
        }
    }

    /// Loads the saved survey before any handler can mutate it.
    pub async fn load(persistence: Persistence) -> Self {
        let options = persistence.load().await;
        Self::new(Survey::new(options), persistence)
    }
}
