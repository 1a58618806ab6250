use std::fmt::Display;

/// Which precomputed artifact an operation concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Catalog,
    SimilarityMatrix,
}

impl Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Catalog => write!(f, "catalog"),
            ArtifactKind::SimilarityMatrix => write!(f, "similarity matrix"),
        }
    }
}

/// Content-sniffing verdict for a raw artifact payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentVerdict {
    Empty,
    Markup,
    Text,
    Binary,
}

impl Display for ContentVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentVerdict::Empty => write!(f, "payload is empty"),
            ContentVerdict::Markup => write!(f, "looks like markup, not binary"),
            ContentVerdict::Text => write!(f, "looks like plain text, not binary"),
            ContentVerdict::Binary => write!(f, "binary payload"),
        }
    }
}

/// Failure to produce a usable catalog or similarity matrix
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("{kind} artifact unavailable from {location}: {reason}")]
    Unavailable {
        kind: ArtifactKind,
        location: String,
        reason: String,
    },

    #[error("{kind} artifact could not be decoded ({byte_len} bytes, {verdict}): {reason}")]
    Malformed {
        kind: ArtifactKind,
        byte_len: usize,
        verdict: ContentVerdict,
        reason: String,
    },

    #[error("{kind} artifact has the wrong shape: {reason}")]
    Shape { kind: ArtifactKind, reason: String },

    #[error("catalog has {catalog_len} rows but similarity matrix is {matrix_dim}x{matrix_dim}")]
    Misaligned {
        catalog_len: usize,
        matrix_dim: usize,
    },
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Artifact load error: {0}")]
    Load(#[from] LoadError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_carries_diagnostics() {
        let err = AppError::from(LoadError::Malformed {
            kind: ArtifactKind::SimilarityMatrix,
            byte_len: 2048,
            verdict: ContentVerdict::Markup,
            reason: "skipped decoding".to_string(),
        });
        let message = err.to_string();
        assert!(message.contains("similarity matrix"));
        assert!(message.contains("2048 bytes"));
        assert!(message.contains("looks like markup, not binary"));
    }

    #[test]
    fn test_misaligned_message() {
        let err = LoadError::Misaligned {
            catalog_len: 4,
            matrix_dim: 3,
        };
        assert_eq!(
            err.to_string(),
            "catalog has 4 rows but similarity matrix is 3x3"
        );
    }
}
