use shared_types::{
    AppError, AudioResponse, CourtResponse, DocketResponse, ExportRecord, ObjectType,
    OpinionResponse,
};

/// Renders one record as the JSON its public API resource returns.
pub trait RecordSerializer: Sync {
    fn object_type(&self) -> ObjectType;

    fn serialize(&self, record: &ExportRecord) -> Result<Vec<u8>, AppError>;
}

pub struct DocumentSerializer;
pub struct AudioSerializer;
pub struct DocketSerializer;
pub struct JurisdictionSerializer;

/// The serializer for each object type.
pub fn for_type(object_type: ObjectType) -> &'static dyn RecordSerializer {
    match object_type {
        ObjectType::Document => &DocumentSerializer,
        ObjectType::Audio => &AudioSerializer,
        ObjectType::Docket => &DocketSerializer,
        ObjectType::Jurisdiction => &JurisdictionSerializer,
    }
}

fn wrong_kind(expected: ObjectType, record: &ExportRecord) -> AppError {
    AppError::internal(format!(
        "{expected} serializer cannot render a {} record",
        record.object_type()
    ))
}

impl RecordSerializer for DocumentSerializer {
    fn object_type(&self) -> ObjectType {
        ObjectType::Document
    }

    fn serialize(&self, record: &ExportRecord) -> Result<Vec<u8>, AppError> {
        match record {
            ExportRecord::Document(opinion) => {
                Ok(serde_json::to_vec(&OpinionResponse::from(opinion.clone()))?)
            }
            other => Err(wrong_kind(self.object_type(), other)),
        }
    }
}

impl RecordSerializer for AudioSerializer {
    fn object_type(&self) -> ObjectType {
        ObjectType::Audio
    }

    fn serialize(&self, record: &ExportRecord) -> Result<Vec<u8>, AppError> {
        match record {
            ExportRecord::Audio(audio) => {
                Ok(serde_json::to_vec(&AudioResponse::from(audio.clone()))?)
            }
            other => Err(wrong_kind(self.object_type(), other)),
        }
    }
}

impl RecordSerializer for DocketSerializer {
    fn object_type(&self) -> ObjectType {
        ObjectType::Docket
    }

    fn serialize(&self, record: &ExportRecord) -> Result<Vec<u8>, AppError> {
        match record {
            ExportRecord::Docket(docket) => {
                Ok(serde_json::to_vec(&DocketResponse::from(docket.clone()))?)
            }
            other => Err(wrong_kind(self.object_type(), other)),
        }
    }
}

impl RecordSerializer for JurisdictionSerializer {
    fn object_type(&self) -> ObjectType {
        ObjectType::Jurisdiction
    }

    fn serialize(&self, record: &ExportRecord) -> Result<Vec<u8>, AppError> {
        match record {
            ExportRecord::Jurisdiction(court) => {
                Ok(serde_json::to_vec(&CourtResponse::from(court.clone()))?)
            }
            other => Err(wrong_kind(self.object_type(), other)),
        }
    }
}
