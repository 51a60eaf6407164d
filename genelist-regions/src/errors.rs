use thiserror::Error;

use genelist_core::errors::{SchemaError, ValidationError};

/// Ingestion could not produce a usable entity set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// First invalid row under the fail-fast policy.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Could not build lookup thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
