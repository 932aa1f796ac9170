use crate::types::DEFAULT_DAILY_GOAL;

/// Runtime configuration for the service core.
///
/// `identity_secret` is handed to the identity collaborator at construction
/// time; no component reads it from process-global state.
#[derive(Debug, Clone)]
pub struct Config {
    pub default_daily_goal: u32,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub identity_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let default_daily_goal = std::env::var("DEFAULT_DAILY_GOAL")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|goal| *goal > 0)
            .unwrap_or(DEFAULT_DAILY_GOAL);

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_dir = std::env::var("LOG_DIR").ok();
        let identity_secret = std::env::var("IDENTITY_SECRET").ok();

        Self {
            default_daily_goal,
            log_level,
            log_dir,
            identity_secret,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_daily_goal: DEFAULT_DAILY_GOAL,
            log_level: "info".to_string(),
            log_dir: None,
            identity_secret: None,
        }
    }
}
