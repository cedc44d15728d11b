use chrono::{DateTime, Utc};
use database::entities::exams;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// An exam row as the legacy listing page expects it: flat, snake_case.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExamResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub subject: String,
    pub grade: i16,
    pub year: i16,
}

impl From<exams::Model> for ExamResponse {
    fn from(exam: exams::Model) -> Self {
        Self {
            id: exam.id,
            created_at: exam.created_at,
            title: exam.title,
            subject: exam.subject,
            grade: exam.grade,
            year: exam.year,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadExamResponse {
    pub message: String,
    pub exam_data: ExamResponse,
}
