use std::path::PathBuf;

use crate::error::{AppResult, ArtifactKind, LoadError};

/// Backend that produces the raw bytes of an artifact
///
/// The store decodes and memoizes whatever a source returns, so a source only
/// has to care about transport. Local files and remote downloads are
/// interchangeable behind this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Fetch the complete payload for one artifact
    async fn fetch(&self, kind: ArtifactKind) -> AppResult<Vec<u8>>;

    /// Human-readable location of an artifact, for logs and errors
    fn location(&self, kind: ArtifactKind) -> String;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Reads artifacts from the local filesystem
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    movies_path: PathBuf,
    similarity_path: PathBuf,
}

impl LocalFileSource {
    pub fn new(movies_path: impl Into<PathBuf>, similarity_path: impl Into<PathBuf>) -> Self {
        Self {
            movies_path: movies_path.into(),
            similarity_path: similarity_path.into(),
        }
    }

    fn path(&self, kind: ArtifactKind) -> &PathBuf {
        match kind {
            ArtifactKind::Catalog => &self.movies_path,
            ArtifactKind::SimilarityMatrix => &self.similarity_path,
        }
    }
}

#[async_trait::async_trait]
impl ArtifactSource for LocalFileSource {
    async fn fetch(&self, kind: ArtifactKind) -> AppResult<Vec<u8>> {
        let path = self.path(kind);
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| LoadError::Unavailable {
                kind,
                location: path.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            kind = %kind,
            path = %path.display(),
            bytes = bytes.len(),
            "Read artifact from disk"
        );

        Ok(bytes)
    }

    fn location(&self, kind: ArtifactKind) -> String {
        self.path(kind).display().to_string()
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
