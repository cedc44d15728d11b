use crate::{error::ApiError, routes::university::resolve_university_filter, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
};
use database::services::review::ReviewService;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueryParams {
    /// University UUID or abbreviation.
    pub university_id: Option<String>,

    pub search_term: Option<String>,
}

/// Get reviews grouped by lecturer
///
/// Filtering and aggregation are delegated to the `get_reviews_by_lecturer`
/// stored procedure; its rows are returned verbatim.
#[utoipa::path(
    get,
    path = "/api/reviews",
    params(ReviewQueryParams),
    responses(
        (status = 200, description = "Lecturer-grouped reviews"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reviews"
)]
pub async fn get_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewQueryParams>,
) -> Result<Json<Vec<serde_json::Value>>, ApiError> {
    let university_id =
        resolve_university_filter(&state.db, params.university_id.as_deref()).await?;

    let reviews =
        ReviewService::reviews_by_lecturer(&state.db, university_id, params.search_term).await?;

    Ok(Json(reviews))
}
