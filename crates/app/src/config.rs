//! Configuration

use std::time::Duration;

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Firestore connection settings.
#[derive(Debug, Clone, Args)]
pub struct FirestoreConfig {
    /// Firebase project identifier
    #[arg(long, env = "FIRESTORE_PROJECT_ID")]
    pub project_id: String,

    /// Firebase web API key
    #[arg(long, env = "FIRESTORE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Firestore database identifier
    #[arg(long, env = "FIRESTORE_DATABASE", default_value = "(default)")]
    pub database: String,

    /// Collection reservations are written to
    #[arg(long, env = "FIRESTORE_COLLECTION", default_value = "reservas")]
    pub collection: String,

    /// Firestore REST base URL
    #[arg(
        long,
        env = "FIRESTORE_BASE_URL",
        default_value = "https://firestore.googleapis.com/v1"
    )]
    pub base_url: String,
}

impl FirestoreConfig {
    /// Resource path of the database, `projects/{project}/databases/{database}`.
    #[must_use]
    pub fn database_path(&self) -> String {
        format!("projects/{}/databases/{}", self.project_id, self.database)
    }
}

/// Submission settings.
#[derive(Debug, Args)]
pub struct SubmissionConfig {
    /// Seconds to wait for the store before a submit is treated as failed
    #[arg(long, env = "SUBMIT_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub submit_timeout_seconds: u64,
}

impl SubmissionConfig {
    /// Store call timeout.
    #[must_use]
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_seconds)
    }
}
