use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Invalid dish at record {index}: {reason}")]
    InvalidDish { index: usize, reason: String },

    #[error("Invalid week plan: {message}")]
    InvalidPlan { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Catalog,
    Plan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::IoError(_) => ErrorCategory::Io,
            PlannerError::ConfigError { .. }
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PlannerError::CsvError(_)
            | PlannerError::SerializationError(_)
            | PlannerError::CatalogError { .. }
            | PlannerError::InvalidDish { .. } => ErrorCategory::Catalog,
            PlannerError::InvalidPlan { .. } => ErrorCategory::Plan,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Catalog => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Plan => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlannerError::IoError(_) => {
                "Check that the file exists and that the process can read and write it"
            }
            PlannerError::CsvError(_) => {
                "Make sure the CSV catalog has a 'name,difficulty' header row"
            }
            PlannerError::SerializationError(_) => {
                "Make sure the JSON catalog is an array of {\"name\", \"difficulty\"} objects"
            }
            PlannerError::ConfigError { .. }
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. } => {
                "Review the command line arguments or the TOML configuration file"
            }
            PlannerError::CatalogError { .. } => "Add at least one dish to the catalog",
            PlannerError::InvalidDish { .. } => {
                "Fix the reported record: names must be non-empty, comma-free and at most 49 characters, difficulty one of easy, medium, hard"
            }
            PlannerError::InvalidPlan { .. } => {
                "Inspect the history log for hand-edited or truncated entries"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::IoError(e) => format!("Could not access a file: {}", e),
            PlannerError::CsvError(e) => format!("The CSV catalog could not be read: {}", e),
            PlannerError::SerializationError(e) => {
                format!("The JSON catalog could not be read: {}", e)
            }
            PlannerError::CatalogError { message } => format!("Catalog problem: {}", message),
            PlannerError::InvalidDish { index, reason } => {
                format!("Dish #{} in the catalog is invalid: {}", index + 1, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
