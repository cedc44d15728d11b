use chrono::{DateTime, Utc};
use database::{
    entities::{courses, document_files, documents, lecturers},
    services::query_document::{DocumentDetail, DocumentListing},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub lecturer_name: Option<String>,
    pub university_id: Option<Uuid>,
    /// Populated on the detail endpoint only; the listing returns `[]`.
    pub sections: Vec<SectionResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionResponse {
    pub title: String,
    pub files: Vec<FileResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub id: Uuid,
    pub name: String,
    /// Relative download endpoint for this file.
    pub url: String,
    pub file_type: String,
    /// Size in KB.
    pub size: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDocumentsResponse {
    pub data: Vec<DocumentResponse>,
    pub total_pages: u64,
    pub current_page: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadDocumentResponse {
    pub message: String,
    pub document_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_limit")]
    pub limit: u64,

    /// University UUID or abbreviation.
    pub university_id: Option<String>,

    pub search_term: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

fn document_response(
    document: documents::Model,
    course: Option<courses::Model>,
    lecturer: Option<lecturers::Model>,
    sections: Vec<SectionResponse>,
) -> DocumentResponse {
    DocumentResponse {
        id: document.id,
        title: document.title,
        description: document.description,
        created_at: document.created_at,
        course_name: course.as_ref().map(|c| c.name.clone()),
        course_code: course.as_ref().and_then(|c| c.code.clone()),
        lecturer_name: lecturer.map(|l| l.name),
        university_id: course.map(|c| c.university_id),
        sections,
    }
}

impl From<DocumentListing> for DocumentResponse {
    fn from(listing: DocumentListing) -> Self {
        document_response(listing.document, listing.course, listing.lecturer, vec![])
    }
}

impl From<DocumentDetail> for DocumentResponse {
    fn from(detail: DocumentDetail) -> Self {
        let sections = detail
            .sections
            .into_iter()
            .map(|(section, files)| SectionResponse {
                title: section.title,
                files: files.into_iter().map(FileResponse::from).collect(),
            })
            .collect();

        document_response(detail.document, detail.course, detail.lecturer, sections)
    }
}

impl From<document_files::Model> for FileResponse {
    fn from(file: document_files::Model) -> Self {
        Self {
            url: format!("/api/download/file/{}", file.id),
            id: file.id,
            name: file.name,
            file_type: file.file_type,
            size: file.size_kb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_defaults() {
        let params: DocumentQueryParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert_eq!(params.university_id, None);
        assert_eq!(params.search_term, None);

        let params: DocumentQueryParams =
            serde_json::from_str(r#"{"page": 2, "universityId": "VNU", "searchTerm": "calc"}"#)
                .unwrap();
        assert_eq!(params.page, 2);
        assert_eq!(params.university_id.as_deref(), Some("VNU"));
        assert_eq!(params.search_term.as_deref(), Some("calc"));
    }

    #[test]
    fn test_document_response_uses_contract_field_names() {
        let file = document_files::Model {
            id: Uuid::new_v4(),
            section_id: Uuid::new_v4(),
            name: "midterm.pdf".to_string(),
            file_type: "PDF".to_string(),
            size_kb: 120,
            telegram_file_id: "BQACAgUAAx0".to_string(),
        };
        let file_id = file.id;

        let response = FileResponse::from(file);
        assert_eq!(response.url, format!("/api/download/file/{file_id}"));

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("fileType").is_some());
        assert_eq!(value["size"], 120);

        let document = documents::Model {
            id: Uuid::new_v4(),
            title: "Midterm".to_string(),
            description: None,
            course_id: Uuid::new_v4(),
            lecturer_id: None,
            uploader_ip: None,
            status: "approved".to_string(),
            created_at: Utc::now(),
        };
        let value =
            serde_json::to_value(document_response(document, None, None, vec![])).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("courseName").is_some());
        assert!(value.get("universityId").is_some());
        assert_eq!(value["sections"], serde_json::json!([]));
    }
}
