use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInputError { field: String, reason: String },

    #[error("Unsupported currency: {code}")]
    UnsupportedCurrency { code: String },

    #[error("Invalid file type for {file_name}: only PDF files are accepted")]
    InvalidFileType { file_name: String },

    #[error("{message}")]
    ServerError { status: u16, message: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Server,
    Storage,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ToolError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        ToolError::InvalidInputError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ToolError::ConfigError { .. }
            | ToolError::InvalidConfigValueError { .. }
            | ToolError::MissingConfigError { .. }
            | ToolError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ToolError::InvalidInputError { .. }
            | ToolError::UnsupportedCurrency { .. }
            | ToolError::InvalidFileType { .. } => ErrorCategory::Input,
            ToolError::ApiError(_) => ErrorCategory::Network,
            ToolError::ServerError { .. } => ErrorCategory::Server,
            ToolError::IoError(_) => ErrorCategory::Storage,
            ToolError::CsvError(_)
            | ToolError::SerializationError(_)
            | ToolError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Server => {
                if matches!(self, ToolError::ServerError { status, .. } if *status >= 500) {
                    ErrorSeverity::Medium
                } else {
                    ErrorSeverity::High
                }
            }
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// Message shown to the person at the terminal, without internal detail.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ToolError::ApiError(e) if e.is_timeout() => {
                "The PDF service did not respond in time".to_string()
            }
            ToolError::ApiError(_) => "Could not reach the PDF service".to_string(),
            ToolError::InvalidFileType { file_name } => {
                format!("'{}' is not a PDF file. Please select a PDF.", file_name)
            }
            ToolError::ServerError { message, .. } => message.clone(),
            ToolError::InvalidInputError { field, reason } => {
                format!("Please check {}: {}", field, reason)
            }
            ToolError::UnsupportedCurrency { code } => {
                format!("Currency '{}' is not supported", code)
            }
            ToolError::IoError(e) => format!("File operation failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ToolError::ApiError(_) => {
                "Check the api base_url setting and your network connection".to_string()
            }
            ToolError::ServerError { status, .. } if *status >= 500 => {
                "The service had a problem; try again later".to_string()
            }
            ToolError::ServerError { .. } => {
                "Check the file and the options you supplied".to_string()
            }
            ToolError::InvalidFileType { .. } => {
                "Select a file with a .pdf extension that starts with a PDF header".to_string()
            }
            ToolError::UnsupportedCurrency { .. } => format!(
                "Use one of: {}",
                crate::domain::model::Currency::ALL
                    .iter()
                    .map(|c| c.code())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ToolError::InvalidInputError { .. } => {
                "Correct the highlighted value and run the calculation again".to_string()
            }
            ToolError::ConfigError { .. }
            | ToolError::InvalidConfigValueError { .. }
            | ToolError::MissingConfigError { .. }
            | ToolError::ConfigValidationError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
            ToolError::IoError(_) => {
                "Check that the path exists and is writable".to_string()
            }
            ToolError::CsvError(_) | ToolError::SerializationError(_) => {
                "Check the output destination and try again".to_string()
            }
            ToolError::ProcessingError { .. } => "Check the input data".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_severity_depends_on_status() {
        let client_side = ToolError::ServerError {
            status: 400,
            message: "Incorrect password".to_string(),
        };
        let server_side = ToolError::ServerError {
            status: 503,
            message: "Server error: 503".to_string(),
        };

        assert_eq!(client_side.severity(), ErrorSeverity::High);
        assert_eq!(server_side.severity(), ErrorSeverity::Medium);
        assert_eq!(client_side.user_friendly_message(), "Incorrect password");
    }

    #[test]
    fn test_input_errors_are_input_category() {
        let err = ToolError::InvalidFileType {
            file_name: "notes.txt".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.user_friendly_message().contains("notes.txt"));

        let err = ToolError::UnsupportedCurrency {
            code: "XYZ".to_string(),
        };
        assert!(err.recovery_suggestion().contains("USD"));
    }
}
