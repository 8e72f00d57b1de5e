//! DICOM service - Stores series metadata from uploaded files.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::DicomSeries;
use crate::errors::{AppError, AppResult};
use crate::infra::{read_series_metadata, UnitOfWork};

/// DICOM ingest trait for dependency injection.
#[async_trait]
pub trait DicomService: Send + Sync {
    /// Parse an uploaded file and persist its series record
    async fn upload(&self, bytes: Vec<u8>) -> AppResult<DicomSeries>;
}

/// Concrete implementation of DicomService using Unit of Work.
pub struct DicomIngest<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DicomIngest<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DicomService for DicomIngest<U> {
    async fn upload(&self, bytes: Vec<u8>) -> AppResult<DicomSeries> {
        let size = bytes.len();

        // Parsing is CPU-bound; keep it off the async workers.
        let metadata = tokio::task::spawn_blocking(move || read_series_metadata(&bytes))
            .await
            .map_err(|e| AppError::internal(format!("DICOM parser task failed: {}", e)))??;

        let series = self.uow.dicom_series().create(metadata).await?;

        tracing::info!(
            series_id = series.id,
            modality = %series.modality,
            bytes = size,
            "DICOM series stored"
        );
        Ok(series)
    }
}
