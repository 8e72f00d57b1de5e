//! DICOM series repository implementation.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::base::{ReadRepository, WriteRepository};
use super::entities::{
    dicom_series, DicomSeriesActiveModel, DicomSeriesEntity, DicomSeriesModel,
};
use crate::domain::{DicomSeries, NewDicomSeries};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// DICOM series repository trait for dependency injection.
/// Records are insert-only.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DicomSeriesRepository: Send + Sync {
    /// Persist one extracted series
    async fn create(&self, series: NewDicomSeries) -> AppResult<DicomSeries>;

    /// All series uploaded for a patient, oldest first
    async fn list_for_patient(&self, patient_id: &str) -> AppResult<Vec<DicomSeries>>;

    /// Number of stored series
    async fn total(&self) -> AppResult<u64>;
}

/// Concrete implementation of DicomSeriesRepository
pub struct DicomSeriesStore {
    db: DatabaseConnection,
}

impl DicomSeriesStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReadRepository<DicomSeriesEntity, DicomSeriesModel> for DicomSeriesStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl WriteRepository<DicomSeriesEntity, DicomSeriesModel, DicomSeriesActiveModel>
    for DicomSeriesStore
{
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl DicomSeriesRepository for DicomSeriesStore {
    async fn create(&self, series: NewDicomSeries) -> AppResult<DicomSeries> {
        let active_model = DicomSeriesActiveModel {
            patient_id: Set(series.patient_id),
            study_instance_uid: Set(series.study_instance_uid),
            series_instance_uid: Set(series.series_instance_uid),
            modality: Set(series.modality),
            body_part_examined: Set(series.body_part_examined),
            ..Default::default()
        };

        let model = self.insert(active_model).await?;
        Ok(DicomSeries::from(model))
    }

    async fn list_for_patient(&self, patient_id: &str) -> AppResult<Vec<DicomSeries>> {
        let models = DicomSeriesEntity::find()
            .filter(dicom_series::Column::PatientId.eq(patient_id))
            .order_by_asc(dicom_series::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(DicomSeries::from).collect())
    }

    async fn total(&self) -> AppResult<u64> {
        self.count().await
    }
}
