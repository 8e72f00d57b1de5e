//! DICOM series metadata.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Series metadata extracted from one uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewDicomSeries {
    #[schema(example = "PAT001")]
    pub patient_id: String,
    #[schema(example = "1.2.840.113619.2.55.3.604688119.868.1234567890.1")]
    pub study_instance_uid: String,
    #[schema(example = "1.2.840.113619.2.55.3.604688119.868.1234567890.2")]
    pub series_instance_uid: String,
    #[schema(example = "CT")]
    pub modality: String,
    #[schema(example = "CHEST")]
    pub body_part_examined: String,
}

/// Stored series record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DicomSeries {
    pub id: i32,
    pub patient_id: String,
    pub study_instance_uid: String,
    pub series_instance_uid: String,
    pub modality: String,
    pub body_part_examined: String,
}
