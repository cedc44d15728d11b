use crate::routes::{document, download, exam, health, review, root, university};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        university::get_universities,
        document::get_documents,
        document::get_document_by_id,
        document::upload_document,
        download::download_document_file,
        download::download_exam,
        exam::get_exams,
        exam::upload_exam,
        review::get_reviews
    ),
    tags(
        (name = "Universities", description = "University reference data"),
        (name = "Documents", description = "Document listing, detail and upload"),
        (name = "Downloads", description = "File download endpoints"),
        (name = "Exams", description = "Legacy exam sharing endpoints"),
        (name = "Reviews", description = "Lecturer review endpoints"),
        (name = "Health", description = "Service health"),
    ),
    info(
        title = "Docs Hub API",
        version = "1.0.0",
        description = "Document and exam sharing API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
