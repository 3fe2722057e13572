use pulse_analytics::UserAnalytics;
use pulse_core::AppConfig;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for the server.
///
/// The analytics facade sits behind a single RwLock: register/record take
/// the write lock, queries take the read lock, so a session collection is
/// never observed mid-append.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub analytics: Arc<RwLock<UserAnalytics>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            analytics: Arc::new(RwLock::new(UserAnalytics::new())),
        }
    }
}
