use thiserror::Error;

/// 轉換核心的錯誤（致命，整個轉換中止）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid idShort '{id}': {reason}")]
    InvalidIdShort { id: String, reason: String },

    #[error("List '{id}' mixes element shapes that cannot be unified: {shapes}")]
    HeterogeneousList { id: String, shapes: String },

    #[error("Document root must be a mapping, found {found}")]
    InvalidDocument { found: String },
}

#[derive(Error, Debug)]
pub enum AasError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Conversion error: {0}")]
    ConversionError(#[from] ConversionError),

    #[error("Failed to connect to {url}: {message}")]
    ConnectionError { url: String, message: String },

    #[error("Unexpected status {status} from {url}: {body}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        body: String,
    },

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Conversion,
    Network,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// CLI 退出碼
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2, // 重試錯誤
            ErrorSeverity::High => 1, // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl AasError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AasError::ApiError(_)
            | AasError::ConnectionError { .. }
            | AasError::UnexpectedStatus { .. } => ErrorCategory::Network,
            AasError::IoError(_) => ErrorCategory::Storage,
            AasError::SerializationError(_) | AasError::ConversionError(_) => {
                ErrorCategory::Conversion
            }
            AasError::ConfigValidationError { .. }
            | AasError::InvalidConfigValueError { .. }
            | AasError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 嚴重程度決定 CLI 的退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Conversion | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AasError::ConnectionError { url, .. } => {
                format!("Check that the service at {} is running and reachable", url)
            }
            AasError::UnexpectedStatus { status: 409, .. } => {
                "The resource already exists; rerun with --force true to overwrite it".to_string()
            }
            AasError::UnexpectedStatus { .. } | AasError::ApiError(_) => {
                "Inspect the repository logs and retry the request".to_string()
            }
            AasError::IoError(_) => "Check that the file exists and is readable".to_string(),
            AasError::SerializationError(_) => {
                "Make sure the facts file contains valid JSON".to_string()
            }
            AasError::ConversionError(ConversionError::InvalidIdShort { .. }) => {
                "Rename the offending key or enable container id normalization".to_string()
            }
            AasError::ConversionError(ConversionError::HeterogeneousList { .. }) => {
                "Lists may only contain mappings or only scalars".to_string()
            }
            AasError::ConversionError(ConversionError::InvalidDocument { .. }) => {
                "Wrap the facts in a top-level JSON object".to_string()
            }
            AasError::ConfigValidationError { .. }
            | AasError::InvalidConfigValueError { .. }
            | AasError::MissingConfigError { .. } => {
                "Review the configuration file and command-line arguments".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Conversion => format!("Could not convert facts: {}", self),
            ErrorCategory::Network => format!("Repository communication failed: {}", self),
            ErrorCategory::Storage => format!("File access failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AasError>;
