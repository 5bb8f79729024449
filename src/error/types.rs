// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Aggregated cardinality violations plus probe-failure detail.
    /// The message is complete: a resolution either fully succeeds or
    /// fails with the whole picture.
    #[error("{0}")]
    BlockValidation(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_validation_message_passes_through_unchanged() {
        let err = AppError::BlockValidation(
            "vue-mfc: The following errors were found: Found 0 files for script but 1 are required"
                .to_string(),
        );
        assert_eq!(
            err.to_string(),
            "vue-mfc: The following errors were found: Found 0 files for script but 1 are required"
        );
    }

    #[test]
    fn test_error_serializes_to_display_string() {
        let err = AppError::Other("boom".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Other error: boom\"");
    }

    #[test]
    fn test_domain_error_converts() {
        let err: AppError = DomainError::InvariantViolation("bad path".to_string()).into();
        assert!(matches!(err, AppError::Domain(_)));
        assert!(err.to_string().contains("bad path"));
    }
}
