pub mod app;
pub mod charts;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod persistence;
pub mod state;
pub mod storage;
pub mod survey;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use persistence::Persistence;
pub use state::AppState;
pub use storage::LocalStorage;
pub use survey::{Mutation, Survey};
