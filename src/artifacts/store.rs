use std::sync::Arc;
use std::time::Instant;

use tokio::sync::OnceCell;

use crate::{
    artifacts::{codec, ArtifactSource},
    error::{AppError, AppResult, ArtifactKind, LoadError},
    memoized,
    models::{Catalog, SimilarityMatrix},
};

/// Catalog and similarity matrix, checked to be index-aligned
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub catalog: Arc<Catalog>,
    pub matrix: Arc<SimilarityMatrix>,
}

/// Lazy, load-once access to the precomputed recommendation artifacts
///
/// Construct one per process and share it. Each artifact is fetched and
/// decoded on first use and then held for the lifetime of the store; reads
/// after that are lock-free.
pub struct ArtifactStore {
    source: Arc<dyn ArtifactSource>,
    catalog: OnceCell<Arc<Catalog>>,
    matrix: OnceCell<Arc<SimilarityMatrix>>,
}

impl ArtifactStore {
    pub fn new(source: Arc<dyn ArtifactSource>) -> Self {
        Self {
            source,
            catalog: OnceCell::new(),
            matrix: OnceCell::new(),
        }
    }

    /// Returns the movie catalog, loading it on first call
    pub async fn get_catalog(&self) -> AppResult<Arc<Catalog>> {
        memoized!(self.catalog, async {
            let bytes = self.fetch(ArtifactKind::Catalog).await?;
            let catalog = codec::decode_catalog(&bytes)?;

            tracing::info!(
                source = self.source.name(),
                movies = catalog.len(),
                "Catalog loaded"
            );

            Ok::<_, AppError>(Arc::new(catalog))
        })
    }

    /// Returns the similarity matrix, loading it on first call
    pub async fn get_similarity_matrix(&self) -> AppResult<Arc<SimilarityMatrix>> {
        memoized!(self.matrix, async {
            let bytes = self.fetch(ArtifactKind::SimilarityMatrix).await?;
            let matrix = codec::decode_matrix(&bytes)?;

            tracing::info!(
                source = self.source.name(),
                dim = matrix.dim(),
                "Similarity matrix loaded"
            );

            Ok::<_, AppError>(Arc::new(matrix))
        })
    }

    /// Returns both artifacts after checking that they describe the same rows
    pub async fn artifacts(&self) -> AppResult<Artifacts> {
        let catalog = self.get_catalog().await?;
        let matrix = self.get_similarity_matrix().await?;

        if catalog.len() != matrix.dim() {
            return Err(LoadError::Misaligned {
                catalog_len: catalog.len(),
                matrix_dim: matrix.dim(),
            }
            .into());
        }

        Ok(Artifacts { catalog, matrix })
    }

    /// Catalog titles in catalog order
    pub async fn titles(&self) -> AppResult<Vec<String>> {
        Ok(self.get_catalog().await?.titles())
    }

    async fn fetch(&self, kind: ArtifactKind) -> AppResult<Vec<u8>> {
        let started = Instant::now();
        let result = self.source.fetch(kind).await;

        match &result {
            Ok(bytes) => tracing::debug!(
                kind = %kind,
                location = %self.source.location(kind),
                bytes = bytes.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Artifact fetched"
            ),
            Err(e) => tracing::error!(
                kind = %kind,
                location = %self.source.location(kind),
                error = %e,
                "Artifact fetch failed"
            ),
        }

        result
    }
}
