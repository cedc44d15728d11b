use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Legacy flat exam records from the original exam-sharing flow.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub title: String,
    pub subject: String,
    pub grade: i16,
    pub year: i16,
    pub telegram_file_id: String,
    pub status: String, // pending, approved
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
