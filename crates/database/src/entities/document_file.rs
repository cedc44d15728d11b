use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub section_id: Uuid,
    pub name: String,
    pub file_type: String, // PDF, DOCX, PPTX, ZIP
    pub size_kb: i32,
    pub telegram_file_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::document_section::Entity",
        from = "Column::SectionId",
        to = "super::document_section::Column::Id"
    )]
    Section,
}

impl Related<super::document_section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
