use crate::{dtos::university::UniversityResponse, error::ApiError, state::AppState};
use axum::{Json, extract::State};
use database::services::university::UniversityService;
use log::warn;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Get all universities
#[utoipa::path(
    get,
    path = "/api/universities",
    responses(
        (status = 200, description = "List of universities", body = Vec<UniversityResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Universities"
)]
pub async fn get_universities(
    State(state): State<AppState>,
) -> Result<Json<Vec<UniversityResponse>>, ApiError> {
    let universities = UniversityService::list(&state.db).await?;

    Ok(Json(
        universities
            .into_iter()
            .map(UniversityResponse::from)
            .collect(),
    ))
}

/// Turns an optional UUID-or-abbreviation query value into a university
/// filter.
///
/// An identifier that resolves to nothing drops the filter instead of failing
/// the request.
pub(crate) async fn resolve_university_filter(
    db: &DatabaseConnection,
    identifier: Option<&str>,
) -> Result<Option<Uuid>, ApiError> {
    let Some(identifier) = identifier.filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    let resolved = UniversityService::resolve_identifier(db, identifier).await?;
    if resolved.is_none() {
        warn!("could not find university with abbreviation: {identifier}");
    }

    Ok(resolved)
}
