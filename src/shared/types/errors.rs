use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad or missing caller input. `field` names the offending form field
    /// using its storage column name.
    #[error("Validation: {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Ingestion failed: {0}")]
    Ingestion(String),

    #[error("Export failed: {0}")]
    Export(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::StorageUnavailable(e.to_string())
    }
}

/// Result type for ledger operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_field() {
        let err = DomainError::validation("nombre", "name required");
        assert_eq!(err.to_string(), "Validation: nombre: name required");
    }

    #[test]
    fn db_errors_become_storage_unavailable() {
        let err: DomainError = sea_orm::DbErr::Custom("disk gone".into()).into();
        assert!(matches!(err, DomainError::StorageUnavailable(ref m) if m.contains("disk gone")));
    }
}
