use thiserror::Error;

/// Driver-level error carrying the process exit code.
///
/// Exit codes:
/// - `2`: input problems (unreadable file, missing column, fatal parse)
/// - `3`: nothing left to analyze
/// - `4`: output could not be written
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Which input table a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Listings,
    Income,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Listings => write!(f, "listings"),
            TableKind::Income => write!(f, "income"),
        }
    }
}

/// A fatal, row-local failure: the row cannot be typed.
///
/// Whether this aborts the whole table or only drops the row is decided by
/// [`crate::domain::RowPolicy`].
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}

impl RowFailure {
    pub fn new(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by the core pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("{table} line {line}: invalid `{field}` value {value:?}: {reason}")]
    SchemaParse {
        table: TableKind,
        line: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("income line {line}: postal code {postal_code} already seen on line {first_line}")]
    DuplicatePostalCode {
        postal_code: u32,
        line: usize,
        first_line: usize,
    },
}

impl PipelineError {
    pub fn schema(table: TableKind, line: usize, failure: RowFailure) -> Self {
        PipelineError::SchemaParse {
            table,
            line,
            field: failure.field,
            value: failure.value,
            reason: failure.reason,
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::new(2, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
