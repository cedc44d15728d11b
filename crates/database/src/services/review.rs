use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, JsonValue, Statement};
use uuid::Uuid;

pub struct ReviewService;

impl ReviewService {
    /// Lecturer-grouped reviews, computed entirely by the
    /// `get_reviews_by_lecturer` stored procedure.
    ///
    /// Filtering and aggregation live server-side; the rows come back as
    /// opaque JSON and are returned to the client verbatim.
    pub async fn reviews_by_lecturer(
        db: &DatabaseConnection,
        university_id: Option<Uuid>,
        search_term: Option<String>,
    ) -> Result<Vec<JsonValue>, DbErr> {
        let statement = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM get_reviews_by_lecturer($1, $2)",
            [university_id.into(), search_term.into()],
        );

        JsonValue::find_by_statement(statement).all(db).await
    }
}
