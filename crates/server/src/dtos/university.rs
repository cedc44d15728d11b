use database::entities::universities;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct UniversityResponse {
    pub id: Uuid,
    pub name: String,
    pub abbreviation: String,
}

impl From<universities::Model> for UniversityResponse {
    fn from(university: universities::Model) -> Self {
        Self {
            id: university.id,
            name: university.name,
            abbreviation: university.abbreviation,
        }
    }
}
