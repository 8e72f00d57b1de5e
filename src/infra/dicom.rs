//! DICOM file reader.
//!
//! Parses an uploaded Part 10 file and pulls out the series-level
//! attributes we persist.

use dicom_core::Tag;
use dicom_dictionary_std::tags;
use dicom_object::{DefaultDicomObject, InMemDicomObject};

use crate::domain::NewDicomSeries;
use crate::errors::{AppError, AppResult};

const PREAMBLE_LEN: usize = 128;
const MAGIC_CODE: &[u8; 4] = b"DICM";

/// Parse `bytes` and extract PatientID, StudyInstanceUID,
/// SeriesInstanceUID, Modality and BodyPartExamined.
///
/// The 128-byte preamble is optional. All five attributes must be present
/// and non-blank.
pub fn read_series_metadata(bytes: &[u8]) -> AppResult<NewDicomSeries> {
    let obj = open(bytes)?;
    extract(&obj)
}

fn open(bytes: &[u8]) -> AppResult<DefaultDicomObject> {
    let body = match bytes.get(PREAMBLE_LEN..PREAMBLE_LEN + MAGIC_CODE.len()) {
        Some(magic) if magic == MAGIC_CODE => &bytes[PREAMBLE_LEN..],
        _ => bytes,
    };

    dicom_object::from_reader(body)
        .map_err(|e| AppError::bad_request(format!("Error processing DICOM file: {}", e)))
}

fn extract(obj: &InMemDicomObject) -> AppResult<NewDicomSeries> {
    let patient_id = text_value(obj, tags::PATIENT_ID);
    let study_instance_uid = text_value(obj, tags::STUDY_INSTANCE_UID);
    let series_instance_uid = text_value(obj, tags::SERIES_INSTANCE_UID);
    let modality = text_value(obj, tags::MODALITY);
    let body_part_examined = text_value(obj, tags::BODY_PART_EXAMINED);

    match (
        patient_id,
        study_instance_uid,
        series_instance_uid,
        modality,
        body_part_examined,
    ) {
        (
            Some(patient_id),
            Some(study_instance_uid),
            Some(series_instance_uid),
            Some(modality),
            Some(body_part_examined),
        ) => Ok(NewDicomSeries {
            patient_id,
            study_instance_uid,
            series_instance_uid,
            modality,
            body_part_examined,
        }),
        missing => {
            tracing::debug!(?missing, "DICOM file lacks required attributes");
            Err(AppError::bad_request("Missing required DICOM metadata"))
        }
    }
}

/// String value of `tag` with the DICOM space/NUL padding removed.
/// Blank values count as absent.
fn text_value(obj: &InMemDicomObject, tag: Tag) -> Option<String> {
    obj.element(tag)
        .ok()
        .and_then(|e| e.to_str().ok())
        .map(|s| s.trim_end_matches(|c| c == ' ' || c == '\0').trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
    use dicom_dictionary_std::{tags, uids};
    use dicom_object::{FileMetaTableBuilder, InMemDicomObject};

    pub(crate) fn build_file(elements: &[(Tag, VR, &str)]) -> Vec<u8> {
        let obj = InMemDicomObject::from_element_iter(
            elements
                .iter()
                .map(|(tag, vr, value)| DataElement::new(*tag, *vr, PrimitiveValue::from(*value))),
        );
        let file = obj
            .with_meta(
                FileMetaTableBuilder::new()
                    .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                    .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
                    .media_storage_sop_instance_uid("1.2.826.0.1.3680043.2.1125.1"),
            )
            .unwrap();

        let mut out = Vec::new();
        file.write_all(&mut out).unwrap();
        out
    }

    pub(crate) fn complete_elements() -> Vec<(Tag, VR, &'static str)> {
        vec![
            (tags::PATIENT_ID, VR::LO, "PAT001"),
            (tags::STUDY_INSTANCE_UID, VR::UI, "1.2.3.4"),
            (tags::SERIES_INSTANCE_UID, VR::UI, "1.2.3.4.5"),
            (tags::MODALITY, VR::CS, "CT"),
            (tags::BODY_PART_EXAMINED, VR::CS, "CHEST"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{build_file, complete_elements};
    use super::*;
    use dicom_core::VR;

    #[test]
    fn test_extracts_all_fields() {
        let bytes = build_file(&complete_elements());
        let series = read_series_metadata(&bytes).unwrap();

        assert_eq!(
            series,
            NewDicomSeries {
                patient_id: "PAT001".to_string(),
                study_instance_uid: "1.2.3.4".to_string(),
                series_instance_uid: "1.2.3.4.5".to_string(),
                modality: "CT".to_string(),
                body_part_examined: "CHEST".to_string(),
            }
        );
    }

    #[test]
    fn test_accepts_file_without_preamble() {
        let bytes = build_file(&complete_elements());
        let stripped = match bytes.get(PREAMBLE_LEN..PREAMBLE_LEN + 4) {
            Some(magic) if magic == MAGIC_CODE => bytes[PREAMBLE_LEN..].to_vec(),
            _ => bytes,
        };

        assert_eq!(read_series_metadata(&stripped).unwrap().modality, "CT");
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        for skip in 0..5 {
            let elements: Vec<_> = complete_elements()
                .into_iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, e)| e)
                .collect();
            let bytes = build_file(&elements);

            let err = read_series_metadata(&bytes).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(ref m) if m == "Missing required DICOM metadata"));
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut elements = complete_elements();
        elements[3] = (tags::MODALITY, VR::CS, "  ");
        let bytes = build_file(&elements);

        assert!(read_series_metadata(&bytes).is_err());
    }

    #[test]
    fn test_garbage_is_reported_as_bad_request() {
        let err = read_series_metadata(b"definitely not a dicom file").unwrap_err();
        match err {
            AppError::BadRequest(message) => {
                assert!(message.starts_with("Error processing DICOM file: "))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
