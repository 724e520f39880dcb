use crate::errors::AppError;
use crate::models::SurveyOption;
use crate::storage::LocalStorage;
use crate::survey::{default_options, is_valid_list};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tracing::{debug, error, info, warn};

pub const STORAGE_KEY: &str = "surveyData";
pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Uninitialized,
    Loaded,
}

/// Reads the persisted option list. `Ok(None)` means nothing has been saved yet.
pub async fn read_options(storage: &LocalStorage) -> Result<Option<Vec<SurveyOption>>, AppError> {
    let Some(raw) = storage.get_item(STORAGE_KEY).await? else {
        return Ok(None);
    };
    let options: Vec<SurveyOption> = serde_json::from_str(&raw)?;
    if !is_valid_list(&options) {
        return Err(AppError::new("saved survey is empty or has duplicate ids"));
    }
    Ok(Some(options))
}

pub async fn write_options(storage: &LocalStorage, options: &[SurveyOption]) -> Result<(), AppError> {
    let payload = serde_json::to_string(options)?;
    storage.set_item(STORAGE_KEY, payload).await
}

struct SaveSlot {
    readiness: Readiness,
    pending: Option<JoinHandle<()>>,
}

/// Loads the survey once at startup and writes it back after each burst of
/// mutations has gone quiet for `delay`.
#[derive(Clone)]
pub struct Persistence {
    storage: LocalStorage,
    delay: Duration,
    slot: Arc<Mutex<SaveSlot>>,
}

impl Persistence {
    pub fn new(storage: LocalStorage, delay: Duration) -> Self {
        Self {
            storage,
            delay,
            slot: Arc::new(Mutex::new(SaveSlot {
                readiness: Readiness::Uninitialized,
                pending: None,
            })),
        }
    }

    pub async fn readiness(&self) -> Readiness {
        self.slot.lock().await.readiness
    }

    /// Restores the saved list, falling back to the default seed when nothing
    /// usable is stored. Saves are accepted from this point on.
    pub async fn load(&self) -> Vec<SurveyOption> {
        let options = match read_options(&self.storage).await {
            Ok(Some(options)) => {
                info!("restored {} survey options", options.len());
                options
            }
            Ok(None) => {
                info!("no saved survey, starting from defaults");
                default_options()
            }
            Err(err) => {
                error!("error loading saved survey: {err}");
                default_options()
            }
        };

        self.slot.lock().await.readiness = Readiness::Loaded;
        options
    }

    /// Arms a save of `options`, replacing any save that has not fired yet.
    /// Returns false when called before `load`.
    pub async fn schedule_save(&self, options: Vec<SurveyOption>) -> bool {
        let mut slot = self.slot.lock().await;
        if slot.readiness != Readiness::Loaded {
            warn!("ignoring save requested before the survey was loaded");
            return false;
        }

        if let Some(previous) = slot.pending.take() {
            previous.abort();
        }

        let storage = self.storage.clone();
        let deadline = Instant::now() + self.delay;
        slot.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            match write_options(&storage, &options).await {
                Ok(()) => debug!("saved {} survey options", options.len()),
                Err(err) => error!("failed to save survey: {err}"),
            }
        }));
        true
    }

    /// Drops a save that has not fired yet. Returns true if one was pending.
    pub async fn cancel_pending(&self) -> bool {
        match self.slot.lock().await.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }
}
