use crate::{error::ApiError, state::AppState};
use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::Response,
};
use database::services::{exam::ExamService, query_document::QueryDocumentService};
use uuid::Uuid;

/// Download a document file
///
/// Resolves the stored file handle with the relay and streams the binary back
/// with an attachment disposition built from the stored file name.
#[utoipa::path(
    get,
    path = "/api/download/file/{file_id}",
    params(
        ("file_id" = Uuid, Path, description = "Document file ID")
    ),
    responses(
        (status = 200, description = "File stream"),
        (status = 404, description = "File not found"),
        (status = 500, description = "Relay error")
    ),
    tag = "Downloads"
)]
pub async fn download_document_file(
    State(state): State<AppState>,
    Path(file_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let file = QueryDocumentService::get_document_file(&state.db, file_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("File not found in database".to_string()))?;

    let (_, download) = state.relay.fetch_document(&file.telegram_file_id).await?;

    stream_attachment(download, &file.name)
}

/// Download an exam file (legacy flow)
///
/// The attachment filename is rebuilt from the exam's subject and title, with
/// the extension taken from the resolved relay path.
#[utoipa::path(
    get,
    path = "/api/download/{exam_id}",
    params(
        ("exam_id" = Uuid, Path, description = "Exam ID")
    ),
    responses(
        (status = 200, description = "File stream"),
        (status = 404, description = "Exam not found"),
        (status = 500, description = "Relay error")
    ),
    tag = "Downloads"
)]
pub async fn download_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let exam = ExamService::get(&state.db, exam_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Exam not found".to_string()))?;

    let (file_path, download) = state.relay.fetch_document(&exam.telegram_file_id).await?;

    let filename = format!(
        "{}{}",
        sanitize_filename(&format!("{}-{}", exam.subject, exam.title)),
        extension_of(&file_path)
    );

    stream_attachment(download, &filename)
}

/// Re-emits a relay response verbatim as an attachment download.
fn stream_attachment(download: reqwest::Response, filename: &str) -> Result<Response, ApiError> {
    let content_type = download
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_owned();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from_stream(download.bytes_stream()))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Lowercases and replaces everything outside `[a-z0-9.\- ]` with `_`.
fn sanitize_filename(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// The dot-extension of a relay file path, or empty when there is none.
fn extension_of(file_path: &str) -> String {
    match file_path.rsplit_once('.') {
        Some((_, extension)) if !extension.is_empty() && !extension.contains('/') => {
            format!(".{extension}")
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Toán-Đề giữa kỳ 2024"), "to_n-__ gi_a k_ 2024");
        assert_eq!(sanitize_filename("Math-Midterm 2024"), "math-midterm 2024");
        assert_eq!(sanitize_filename("a/b\\c:d*e"), "a_b_c_d_e");
        assert_eq!(sanitize_filename("already-safe.name 1"), "already-safe.name 1");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("documents/file_42.pdf"), ".pdf");
        assert_eq!(extension_of("documents/file_42"), "");
        assert_eq!(extension_of("documents.v2/file_42"), "");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
    }
}
