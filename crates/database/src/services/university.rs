use crate::entities::universities;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct UniversityService;

impl UniversityService {
    /// All universities, ordered by name for display.
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<universities::Model>, DbErr> {
        universities::Entity::find()
            .order_by_asc(universities::Column::Name)
            .all(db)
            .await
    }

    /// Resolves a university identifier that may be either a UUID or an
    /// abbreviation.
    ///
    /// A UUID passes through unchanged; anything else is looked up as an
    /// abbreviation. An unknown abbreviation resolves to `None` so callers can
    /// degrade to an unfiltered query instead of failing the request.
    pub async fn resolve_identifier(
        db: &DatabaseConnection,
        identifier: &str,
    ) -> Result<Option<Uuid>, DbErr> {
        if let Ok(id) = Uuid::parse_str(identifier) {
            return Ok(Some(id));
        }

        Ok(universities::Entity::find()
            .filter(universities::Column::Abbreviation.eq(identifier))
            .one(db)
            .await?
            .map(|university| university.id))
    }
}
