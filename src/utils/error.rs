use thiserror::Error;

/// 轉換核心的錯誤：只有兩種，都帶有給使用者看的訊息
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    InternalError,
}

impl TransformError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        TransformError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        TransformError::InternalError {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::InvalidInput { .. } => ErrorKind::InvalidInput,
            TransformError::InternalError { .. } => ErrorKind::InternalError,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            TransformError::InvalidInput { message } | TransformError::InternalError { message } => {
                message
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason} (got '{value}')")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Transform(TransformError::InvalidInput { .. }) => ErrorSeverity::High,
            AppError::ConfigError { .. } | AppError::InvalidConfigValueError { .. } => {
                ErrorSeverity::Medium
            }
            AppError::Transform(TransformError::InternalError { .. }) | AppError::IoError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// 程式結束碼：輸入錯誤 1、設定錯誤 2、系統或內部錯誤 3
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Transform(err) => err.to_string(),
            AppError::IoError(err) => format!("Could not read or write a file: {}", err),
            AppError::ConfigError { message } => format!("Configuration problem: {}", message),
            AppError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::Transform(TransformError::InvalidInput { .. }) => {
                "Check that the file matches the chosen action (flat JSON or well-quoted CSV)."
            }
            AppError::Transform(TransformError::InternalError { .. }) => {
                "This is a bug in the converter; please report it with the input file."
            }
            AppError::IoError(_) => "Check the file path and its permissions.",
            AppError::ConfigError { .. } | AppError::InvalidConfigValueError { .. } => {
                "Fix the command-line flags or the TOML config file and try again."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
