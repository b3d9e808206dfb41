use thiserror::Error;
use uuid::Uuid;

use crate::config::ConfigError;
use crate::models::RecordKind;

#[derive(Error, Debug)]
pub enum GeneralError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejections surfaced by record operations.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: RecordKind, id: Uuid },

    #[error("{kind} with title '{title}' already exists")]
    Conflict { kind: RecordKind, title: String },

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("{0}")]
    PolicyViolation(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ContentError {
    pub fn not_found(kind: RecordKind, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn conflict(kind: RecordKind, title: impl Into<String>) -> Self {
        Self::Conflict {
            kind,
            title: title.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Invalid file type. Allowed types: {0}")]
    DisallowedType(String),

    #[error("{kind} exceeds {} limit", format_limit(.limit_bytes))]
    TooLarge { kind: &'static str, limit_bytes: u64 },

    #[error("Invalid upload target '{0}'")]
    InvalidTarget(String),

    #[error("Upload stream failed: {0}")]
    Stream(String),

    #[error("Upload storage failed: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// True when the client sent something we refuse, as opposed to a
    /// server-side storage failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

const MIB: u64 = 1024 * 1024;

/// Whole mebibytes print as `25MB`, anything else as a byte count.
fn format_limit(bytes: &u64) -> String {
    if *bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
