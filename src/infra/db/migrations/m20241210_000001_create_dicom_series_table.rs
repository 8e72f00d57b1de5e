//! Migration: Create the dicom_series table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DicomSeries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DicomSeries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DicomSeries::PatientId).string().not_null())
                    .col(ColumnDef::new(DicomSeries::StudyInstanceUid).string().not_null())
                    .col(ColumnDef::new(DicomSeries::SeriesInstanceUid).string().not_null())
                    .col(ColumnDef::new(DicomSeries::Modality).string().not_null())
                    .col(ColumnDef::new(DicomSeries::BodyPartExamined).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_dicom_series_patient_id")
                    .table(DicomSeries::Table)
                    .col(DicomSeries::PatientId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_dicom_series_patient_id")
                    .table(DicomSeries::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DicomSeries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DicomSeries {
    Table,
    Id,
    PatientId,
    StudyInstanceUid,
    SeriesInstanceUid,
    Modality,
    BodyPartExamined,
}
