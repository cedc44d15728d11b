use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Unique natural keys backing the get-or-create upserts. Without
        // these, concurrent identical uploads could create duplicate rows.
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_name_university_id")
                    .table(Courses::Table)
                    .col(Courses::Name)
                    .col(Courses::UniversityId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lecturers_name_university_id")
                    .table(Lecturers::Table)
                    .col(Lecturers::Name)
                    .col(Lecturers::UniversityId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Listing always filters on status and orders by created_at
        manager
            .create_index(
                Index::create()
                    .name("idx_documents_status_created_at")
                    .table(Documents::Table)
                    .col(Documents::Status)
                    .col(Documents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index on document_sections.document_id for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_document_sections_document_id")
                    .table(DocumentSections::Table)
                    .col(DocumentSections::DocumentId)
                    .to_owned(),
            )
            .await?;

        // Index on document_files.section_id for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_document_files_section_id")
                    .table(DocumentFiles::Table)
                    .col(DocumentFiles::SectionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(
                Index::drop()
                    .name("idx_document_files_section_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_document_sections_document_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_documents_status_created_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_lecturers_name_university_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_name_university_id")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Name,
    UniversityId,
}

#[derive(Iden)]
enum Lecturers {
    Table,
    Name,
    UniversityId,
}

#[derive(Iden)]
enum Documents {
    Table,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum DocumentSections {
    Table,
    DocumentId,
}

#[derive(Iden)]
enum DocumentFiles {
    Table,
    SectionId,
}
