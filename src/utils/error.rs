use thiserror::Error;

#[derive(Error, Debug)]
pub enum SantaError {
    #[error("Need at least 2 participants, got {count}")]
    InsufficientParticipants { count: usize },

    #[error("Participant #{index} is invalid: {reason}")]
    InvalidParticipant { index: usize, reason: String },

    #[error("Duplicate participant email: {email}")]
    DuplicateEmail { email: String },

    #[error("Generated assignments are invalid: {message}")]
    InvalidAssignment { message: String },

    #[error("Failed to deliver notification to {recipient}: {message}")]
    DeliveryError { recipient: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
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
    Input,
    Configuration,
    Delivery,
    Internal,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SantaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SantaError::InsufficientParticipants { .. }
            | SantaError::InvalidParticipant { .. }
            | SantaError::DuplicateEmail { .. }
            | SantaError::CsvError(_) => ErrorCategory::Input,
            SantaError::ConfigValidationError { .. }
            | SantaError::InvalidConfigValueError { .. }
            | SantaError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SantaError::DeliveryError { .. } => ErrorCategory::Delivery,
            SantaError::InvalidAssignment { .. } | SantaError::SerializationError(_) => {
                ErrorCategory::Internal
            }
            SantaError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            // 寄送失敗通常可重試
            ErrorCategory::Delivery => ErrorSeverity::Medium,
            ErrorCategory::Internal | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 輸入驗證類錯誤，呼叫端應回報 400 而非 500
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SantaError::InsufficientParticipants { .. }
                | SantaError::InvalidParticipant { .. }
                | SantaError::DuplicateEmail { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SantaError::InsufficientParticipants { count } => format!(
                "Add at least {} more participant(s) to the roster",
                2usize.saturating_sub(*count)
            ),
            SantaError::InvalidParticipant { index, .. } => format!(
                "Make sure participant #{} has both a name and a valid email address",
                index
            ),
            SantaError::DuplicateEmail { email } => format!(
                "Remove the repeated entry for '{}' (emails are compared case-insensitively)",
                email
            ),
            SantaError::InvalidAssignment { .. } => {
                "Check that every participant has a distinct email and run again".to_string()
            }
            SantaError::DeliveryError { .. } => {
                "Check the mail sender settings and the outbox directory, then run again"
                    .to_string()
            }
            SantaError::CsvError(_) => {
                "Make sure the roster CSV has a header row with 'name' and 'email' columns"
                    .to_string()
            }
            SantaError::IoError(_) => {
                "Check that the file exists and that you have permission to access it"
                    .to_string()
            }
            SantaError::SerializationError(_) => {
                "This is likely a bug, please report it with the input that caused it".to_string()
            }
            SantaError::ConfigValidationError { field, .. }
            | SantaError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration file", field)
            }
            SantaError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file or environment", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("The participant list is not valid: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Delivery => format!("Could not send all notifications: {}", self),
            ErrorCategory::Internal => format!("Something went wrong internally: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SantaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_high_severity_input() {
        let err = SantaError::DuplicateEmail {
            email: "a@example.com".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.is_validation());
        assert!(err.recovery_suggestion().contains("a@example.com"));
    }

    #[test]
    fn test_delivery_error_is_retryable() {
        let err = SantaError::DeliveryError {
            recipient: "b@example.com".to_string(),
            message: "disk full".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(!err.is_validation());
        assert!(err.user_friendly_message().contains("b@example.com"));
    }

    #[test]
    fn test_insufficient_participants_suggestion() {
        let err = SantaError::InsufficientParticipants { count: 0 };
        assert_eq!(
            err.recovery_suggestion(),
            "Add at least 2 more participant(s) to the roster"
        );
    }
}
