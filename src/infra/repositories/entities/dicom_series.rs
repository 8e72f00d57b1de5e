//! DICOM series entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::DicomSeries;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "dicom_series")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub patient_id: String,
    pub study_instance_uid: String,
    pub series_instance_uid: String,
    pub modality: String,
    pub body_part_examined: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for DicomSeries {
    fn from(model: Model) -> Self {
        DicomSeries {
            id: model.id,
            patient_id: model.patient_id,
            study_instance_uid: model.study_instance_uid,
            series_instance_uid: model.series_instance_uid,
            modality: model.modality,
            body_part_examined: model.body_part_examined,
        }
    }
}
