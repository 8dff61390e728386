use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Backend unavailable: {backend} - {message}")]
    BackendUnavailable { backend: String, message: String },

    #[error("No result found: {message}")]
    NoResultFound { message: String },

    #[error("Scene unavailable: {message}")]
    SceneUnavailable { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn backend_unavailable(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            backend: backend.into(),
            message: message.into(),
        }
    }

    pub fn no_result_found(message: impl Into<String>) -> Self {
        Self::NoResultFound {
            message: message.into(),
        }
    }

    pub fn scene_unavailable(message: impl Into<String>) -> Self {
        Self::SceneUnavailable {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Soft failures are reported per candidate but never abort a batch
    pub fn is_soft_failure(&self) -> bool {
        matches!(self, Self::NoResultFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_unavailable_error() {
        let error = DomainError::backend_unavailable("catalog", "connection reset");
        assert_eq!(
            error.to_string(),
            "Backend unavailable: catalog - connection reset"
        );
    }

    #[test]
    fn test_scene_unavailable_error() {
        let error = DomainError::scene_unavailable("no imagery at 0,0");
        assert_eq!(error.to_string(), "Scene unavailable: no imagery at 0,0");
    }

    #[test]
    fn test_soft_failure_classification() {
        assert!(DomainError::no_result_found("Coffee").is_soft_failure());
        assert!(!DomainError::backend_unavailable("catalog", "down").is_soft_failure());
        assert!(!DomainError::storage("disk full").is_soft_failure());
    }
}
