//! Domain-level error taxonomy for headerlint.
//!
//! Per-file findings are never errors: they are reported as
//! [`Diagnostic`](crate::domain::diagnostic::Diagnostic)s. These variants cover
//! startup and I/O failures only.

/// headerlint errors.
#[derive(Debug, thiserror::Error)]
pub enum HeaderLintError {
    #[error("invalid repository identity '{value}': {reason}")]
    InvalidRepository { value: String, reason: String },

    #[error("could not resolve repository identity (tried {tried})")]
    RepositoryUnresolved { tried: String },

    #[error("config error in {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("git error: {0}")]
    GitError(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for headerlint operations.
pub type Result<T> = std::result::Result<T, HeaderLintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_repository_display() {
        let err = HeaderLintError::InvalidRepository {
            value: "foo".to_string(),
            reason: "expected owner/name".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'foo'"));
        assert!(msg.contains("expected owner/name"));
    }

    #[test]
    fn test_unresolved_lists_sources() {
        let err = HeaderLintError::RepositoryUnresolved {
            tried: "config, composer.json, git remote".to_string(),
        };
        assert!(err.to_string().contains("composer.json"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: HeaderLintError = io.into();
        assert!(err.to_string().starts_with("io error"));
    }
}
