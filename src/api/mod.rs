pub mod extract;
pub mod health;
pub mod messages;
pub mod openapi;
pub mod participants;
pub mod status;

use crate::config::Config;
use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        Self { db, config }
    }
}

/// Current time as Unix epoch milliseconds
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current wall clock time as shown on messages
pub(crate) fn now_clock() -> String {
    crate::models::clock_time(chrono::Local::now())
}
