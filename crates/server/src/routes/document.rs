use crate::{
    dtos::document::{
        DocumentQueryParams, DocumentResponse, PaginatedDocumentsResponse, UploadDocumentResponse,
    },
    error::ApiError,
    routes::university::resolve_university_filter,
    state::AppState,
};
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use database::services::{
    query_document::QueryDocumentService,
    save_document::{NewDocument, NewDocumentFile, SaveDocumentService},
};
use log::{info, warn};
use models::{
    file_type::FileType,
    upload::{SectionField, SectionsBuilder, UploadedFile, parse_section_key},
};
use uuid::Uuid;

const MISSING_FIELDS: &str =
    "Missing required fields, or a section is missing a title or files.";

/// Get paginated list of approved documents
#[utoipa::path(
    get,
    path = "/api/documents",
    params(DocumentQueryParams),
    responses(
        (status = 200, description = "Page of documents", body = PaginatedDocumentsResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Documents"
)]
pub async fn get_documents(
    State(state): State<AppState>,
    Query(params): Query<DocumentQueryParams>,
) -> Result<Json<PaginatedDocumentsResponse>, ApiError> {
    let university_id =
        resolve_university_filter(&state.db, params.university_id.as_deref()).await?;

    let (listings, total_items) = QueryDocumentService::list_documents(
        &state.db,
        params.page,
        params.limit,
        university_id,
        params.search_term,
    )
    .await?;

    Ok(Json(PaginatedDocumentsResponse {
        data: listings.into_iter().map(DocumentResponse::from).collect(),
        total_pages: total_items.div_ceil(params.limit.max(1)),
        current_page: params.page,
    }))
}

/// Get a specific document with its sections and files
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    params(
        ("id" = Uuid, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Document found", body = DocumentResponse),
        (status = 404, description = "Document not found or not approved"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Documents"
)]
pub async fn get_document_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, ApiError> {
    match QueryDocumentService::get_document_detail(&state.db, id).await? {
        Some(detail) => Ok(Json(DocumentResponse::from(detail))),
        None => Err(ApiError::NotFound(
            "Document not found or an error occurred".to_string(),
        )),
    }
}

/// Upload a new document
///
/// Multipart form with `title`, `courseName`, `universityId` and optional
/// `courseCode`, `lecturerName`, `description`, plus one or more sections in
/// bracket-index notation (`sections[0][title]`, `sections[0][files]`, ...).
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body(content_type = "multipart/form-data", description = "The document submission."),
    responses(
        (status = 201, description = "Upload accepted, pending review", body = UploadDocumentResponse),
        (status = 400, description = "Missing or malformed fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Documents"
)]
pub async fn upload_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadDocumentResponse>), ApiError> {
    let uploader_ip = client_ip(&headers);
    let form = parse_document_form(multipart).await?;

    info!(
        "document upload \"{}\" with {} sections",
        form.title,
        form.sections.len()
    );

    let course_id = SaveDocumentService::get_or_create_course(
        &state.db,
        &form.course_name,
        form.course_code,
        form.university_id,
    )
    .await?;

    let lecturer_id = match form.lecturer_name.as_deref() {
        Some(name) => Some(
            SaveDocumentService::get_or_create_lecturer(&state.db, name, form.university_id)
                .await?,
        ),
        None => None,
    };

    let document_id = SaveDocumentService::insert_document(
        &state.db,
        NewDocument {
            title: form.title,
            description: form.description,
            course_id,
            lecturer_id,
            uploader_ip,
        },
    )
    .await?;

    // Relay each file and persist its handle. Ordered and sequential; the
    // first failure aborts the rest of the loop (rows already written stay,
    // the document remains pending and thus invisible).
    for section in form.sections {
        let section_id =
            SaveDocumentService::insert_section(&state.db, document_id, &section.title).await?;

        for file in section.files {
            let Some(file_type) = FileType::from_mime_type(&file.content_type) else {
                warn!(
                    "skipping \"{}\": unsupported content type {}",
                    file.name, file.content_type
                );
                continue;
            };

            let size_kb = file.size_kb();
            let telegram_file_id = state
                .relay
                .send_document(&file.name, &file.content_type, file.data)
                .await?;

            SaveDocumentService::insert_file(
                &state.db,
                NewDocumentFile {
                    section_id,
                    name: file.name,
                    file_type,
                    size_kb,
                    telegram_file_id,
                },
            )
            .await?;
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(UploadDocumentResponse {
            message: "Upload successful, pending review.".to_string(),
            document_id,
        }),
    ))
}

/// A validated document submission.
struct DocumentUploadForm {
    title: String,
    course_name: String,
    course_code: Option<String>,
    university_id: Uuid,
    lecturer_name: Option<String>,
    description: Option<String>,
    sections: Vec<models::upload::SectionUpload>,
}

/// Drains the multipart stream into document-level fields and the
/// bracket-indexed section builder, then validates the whole submission.
async fn parse_document_form(mut multipart: Multipart) -> Result<DocumentUploadForm, ApiError> {
    let mut title: Option<String> = None;
    let mut course_name: Option<String> = None;
    let mut course_code: Option<String> = None;
    let mut university_id: Option<String> = None;
    let mut lecturer_name: Option<String> = None;
    let mut description: Option<String> = None;
    let mut builder = SectionsBuilder::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read multipart data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "title" => title = non_empty(read_text(field).await?),
            "courseName" => course_name = non_empty(read_text(field).await?),
            "courseCode" => course_code = non_empty(read_text(field).await?),
            "universityId" => university_id = non_empty(read_text(field).await?),
            "lecturerName" => lecturer_name = non_empty(read_text(field).await?),
            "description" => description = non_empty(read_text(field).await?),
            key => {
                let Some((index, section_field)) = parse_section_key(key) else {
                    continue; // unknown flat fields are ignored
                };

                match section_field {
                    SectionField::Title => builder.set_title(index, read_text(field).await?),
                    SectionField::Files => {
                        let file_name = field.file_name().unwrap_or("untitled").to_string();
                        let content_type = field
                            .content_type()
                            .unwrap_or("application/octet-stream")
                            .to_string();
                        let data = field
                            .bytes()
                            .await
                            .map_err(|e| {
                                ApiError::Validation(format!("Failed to read file bytes: {e}"))
                            })?
                            .to_vec();

                        builder.add_file(
                            index,
                            UploadedFile {
                                name: file_name,
                                content_type,
                                data,
                            },
                        );
                    }
                }
            }
        }
    }

    let (Some(title), Some(course_name), Some(university_id)) =
        (title, course_name, university_id)
    else {
        return Err(ApiError::Validation(MISSING_FIELDS.to_string()));
    };

    let university_id = Uuid::parse_str(&university_id)
        .map_err(|_| ApiError::Validation("universityId must be a valid UUID".to_string()))?;

    let sections = builder
        .into_sections()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    Ok(DocumentUploadForm {
        title,
        course_name,
        course_code,
        university_id,
        lecturer_name,
        description,
        sections,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read multipart data: {e}")))
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

/// The caller's network origin, for the audit column. The service sits behind
/// a proxy, so only forwarded headers are consulted.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("cf-connecting-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .or_else(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(',').next())
                .map(|value| value.trim().to_owned())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_prefers_cf_header() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-connecting-ip", "203.0.113.9".parse().unwrap());
        headers.insert("x-forwarded-for", "198.51.100.1, 10.0.0.1".parse().unwrap());

        assert_eq!(client_ip(&headers), Some("203.0.113.9".to_string()));
    }

    #[test]
    fn test_client_ip_falls_back_to_first_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "198.51.100.1, 10.0.0.1".parse().unwrap());

        assert_eq!(client_ip(&headers), Some("198.51.100.1".to_string()));
    }

    #[test]
    fn test_client_ip_absent() {
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }

    #[test]
    fn test_non_empty_trims_blank_values() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("Calc I".to_string()), Some("Calc I".to_string()));
    }
}
