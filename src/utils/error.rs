use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Empty file name was entered")]
    EmptyFileName,

    #[error("CSV read error for '{path}': {source}")]
    CsvRead {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("CSV header mismatch in '{path}': missing columns {}", missing.join(", "))]
    HeaderMismatch { path: String, missing: Vec<String> },

    #[error("Expected {expected} rows but found {actual}")]
    RowCount { expected: usize, actual: usize },

    #[error("Invalid value in row {row}, column '{column}': {reason}")]
    InvalidRow {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Could not create schedule '{name}'")]
    ScheduleCreation { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Registry,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::EmptyFileName => ErrorCategory::Input,
            ImportError::CsvRead { .. }
            | ImportError::HeaderMismatch { .. }
            | ImportError::RowCount { .. }
            | ImportError::InvalidRow { .. } => ErrorCategory::Data,
            ImportError::ScheduleCreation { .. } => ErrorCategory::Registry,
            ImportError::ConfigError { .. }
            | ImportError::ConfigValidationError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ImportError::Io(_) | ImportError::Serialization(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一排程失敗只記錄，不中止
            ImportError::ScheduleCreation { .. } => ErrorSeverity::Low,
            ImportError::RowCount { .. } | ImportError::InvalidRow { .. } => ErrorSeverity::Medium,
            ImportError::Io(_) | ImportError::Serialization(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// 是否中止整個匯入流程
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ImportError::ScheduleCreation { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImportError::EmptyFileName => "Pass the CSV file name with --file-name",
            ImportError::CsvRead { .. } => {
                "Check that the file exists under the base directory and contains only numeric values"
            }
            ImportError::HeaderMismatch { .. } => {
                "The header must contain: timestep, chw_supply_temp_f, chw_flow_fraction, chw_load_w, hw_supply_temp_f, hw_flow_fraction, hw_load_w"
            }
            ImportError::RowCount { .. } => {
                "Provide one row per hour of the year, or disable strict_row_count"
            }
            ImportError::InvalidRow { .. } => {
                "Fix the offending row, or switch the validation policy to permissive"
            }
            ImportError::ScheduleCreation { .. } => {
                "Inspect the column for empty or non-finite values"
            }
            ImportError::Io(_) => "Check file permissions and available disk space",
            ImportError::Serialization(_) => "Report this as a bug",
            ImportError::ConfigError { .. }
            | ImportError::ConfigValidationError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => {
                "Review the configuration file and command line arguments"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::EmptyFileName => "No file name was given".to_string(),
            ImportError::CsvRead { path, .. } => format!("Could not read load profile '{}'", path),
            ImportError::HeaderMismatch { missing, .. } => {
                format!("The load profile is missing columns: {}", missing.join(", "))
            }
            ImportError::MissingConfigError { field } => {
                format!("Missing required argument '{}'", field)
            }
            other => other.to_string(),
        }
    }
}
