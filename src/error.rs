use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Rate limit exceeded after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("Missing field `{field}` in {entity} payload")]
    MissingField { entity: &'static str, field: String },

    #[error("Field `{field}` in {entity} payload is not a valid {expected}")]
    InvalidField {
        entity: &'static str,
        field: String,
        expected: &'static str,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub(crate) fn missing(entity: &'static str, field: impl Into<String>) -> Self {
        AppError::MissingField {
            entity,
            field: field.into(),
        }
    }
}
