use crate::persistence::DEFAULT_SAVE_DELAY;
use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/storage.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub save_delay: Duration,
}

impl AppConfig {
    /// Reads `PORT`, `APP_DATA_PATH` and `SURVEY_SAVE_DELAY_MS`, using defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            port: parse_var("PORT").unwrap_or(DEFAULT_PORT),
            data_path: resolve_data_path(),
            save_delay: parse_var("SURVEY_SAVE_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_SAVE_DELAY),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            save_delay: DEFAULT_SAVE_DELAY,
        }
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_DATA_PATH)
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}
