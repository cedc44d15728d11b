use crate::{
    dtos::exam::{ExamResponse, UploadExamResponse},
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use database::services::exam::{ExamService, NewExam};
use log::info;

/// Get all approved exams (legacy flow)
#[utoipa::path(
    get,
    path = "/api/exams",
    responses(
        (status = 200, description = "List of exams", body = Vec<ExamResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Exams"
)]
pub async fn get_exams(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExamResponse>>, ApiError> {
    let exams = ExamService::list_approved(&state.db).await?;

    Ok(Json(exams.into_iter().map(ExamResponse::from).collect()))
}

/// Upload a new exam (legacy flow)
///
/// Multipart form with a `document` file plus `title`, `subject`, `grade` and
/// `year` fields.
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content_type = "multipart/form-data", description = "The exam submission."),
    responses(
        (status = 201, description = "Upload accepted, pending review", body = UploadExamResponse),
        (status = 400, description = "Missing or malformed fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Exams"
)]
pub async fn upload_exam(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadExamResponse>), ApiError> {
    let form = parse_exam_form(multipart).await?;

    info!("exam upload \"{}\" ({})", form.title, form.file_name);

    let telegram_file_id = state
        .relay
        .send_document(&form.file_name, &form.content_type, form.data)
        .await?;

    let exam = ExamService::insert(
        &state.db,
        NewExam {
            title: form.title,
            subject: form.subject,
            grade: form.grade,
            year: form.year,
            telegram_file_id,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadExamResponse {
            message: "Upload successful, pending review.".to_string(),
            exam_data: exam.into(),
        }),
    ))
}

struct ExamUploadForm {
    title: String,
    subject: String,
    grade: i16,
    year: i16,
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

async fn parse_exam_form(mut multipart: Multipart) -> Result<ExamUploadForm, ApiError> {
    let mut title: Option<String> = None;
    let mut subject: Option<String> = None;
    let mut grade: Option<String> = None;
    let mut year: Option<String> = None;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read multipart data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "title" => title = Some(read_text(field).await?),
            "subject" => subject = Some(read_text(field).await?),
            "grade" => grade = Some(read_text(field).await?),
            "year" => year = Some(read_text(field).await?),
            "document" => {
                let file_name = field.file_name().unwrap_or("untitled").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Failed to read file bytes: {e}")))?
                    .to_vec();

                file = Some((file_name, content_type, data));
            }
            _ => {}
        }
    }

    let (Some(title), Some(subject), Some(grade), Some(year), Some((file_name, content_type, data))) =
        (title, subject, grade, year, file)
    else {
        return Err(ApiError::Validation("Missing required fields.".to_string()));
    };

    if title.trim().is_empty() || subject.trim().is_empty() || data.is_empty() {
        return Err(ApiError::Validation("Missing required fields.".to_string()));
    }

    let grade = grade
        .trim()
        .parse::<i16>()
        .map_err(|_| ApiError::Validation("grade must be a number".to_string()))?;
    let year = year
        .trim()
        .parse::<i16>()
        .map_err(|_| ApiError::Validation("year must be a number".to_string()))?;

    Ok(ExamUploadForm {
        title,
        subject,
        grade,
        year,
        file_name,
        content_type,
        data,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read multipart data: {e}")))
}
