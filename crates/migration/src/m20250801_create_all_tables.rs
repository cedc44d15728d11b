use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create universities table
        manager
            .create_table(
                Table::create()
                    .table(Universities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Universities::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Universities::Name).string().not_null())
                    .col(
                        ColumnDef::new(Universities::Abbreviation)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Universities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Code).string())
                    .col(ColumnDef::new(Courses::UniversityId).uuid().not_null())
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-university_id")
                            .from(Courses::Table, Courses::UniversityId)
                            .to(Universities::Table, Universities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create lecturers table
        manager
            .create_table(
                Table::create()
                    .table(Lecturers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lecturers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lecturers::Name).string().not_null())
                    .col(ColumnDef::new(Lecturers::UniversityId).uuid().not_null())
                    .col(
                        ColumnDef::new(Lecturers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lecturers-university_id")
                            .from(Lecturers::Table, Lecturers::UniversityId)
                            .to(Universities::Table, Universities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create documents table
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::Title).string().not_null())
                    .col(ColumnDef::new(Documents::Description).text())
                    .col(ColumnDef::new(Documents::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Documents::LecturerId).uuid())
                    .col(ColumnDef::new(Documents::UploaderIp).string())
                    .col(
                        ColumnDef::new(Documents::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Documents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-documents-course_id")
                            .from(Documents::Table, Documents::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-documents-lecturer_id")
                            .from(Documents::Table, Documents::LecturerId)
                            .to(Lecturers::Table, Lecturers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create document_sections table
        manager
            .create_table(
                Table::create()
                    .table(DocumentSections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentSections::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DocumentSections::DocumentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DocumentSections::Title).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-document_sections-document_id")
                            .from(DocumentSections::Table, DocumentSections::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create document_files table
        manager
            .create_table(
                Table::create()
                    .table(DocumentFiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentFiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DocumentFiles::SectionId).uuid().not_null())
                    .col(ColumnDef::new(DocumentFiles::Name).string().not_null())
                    .col(ColumnDef::new(DocumentFiles::FileType).string().not_null())
                    .col(ColumnDef::new(DocumentFiles::SizeKb).integer().not_null())
                    .col(
                        ColumnDef::new(DocumentFiles::TelegramFileId)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-document_files-section_id")
                            .from(DocumentFiles::Table, DocumentFiles::SectionId)
                            .to(DocumentSections::Table, DocumentSections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create exams table (legacy flat flow)
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Exams::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Exams::Title).string().not_null())
                    .col(ColumnDef::new(Exams::Subject).string().not_null())
                    .col(ColumnDef::new(Exams::Grade).small_integer().not_null())
                    .col(ColumnDef::new(Exams::Year).small_integer().not_null())
                    .col(ColumnDef::new(Exams::TelegramFileId).string().not_null())
                    .col(
                        ColumnDef::new(Exams::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Exams::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DocumentFiles::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DocumentSections::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Lecturers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Universities::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Universities {
    Table,
    Id,
    Name,
    Abbreviation,
    CreatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    Code,
    UniversityId,
    CreatedAt,
}

#[derive(Iden)]
enum Lecturers {
    Table,
    Id,
    Name,
    UniversityId,
    CreatedAt,
}

#[derive(Iden)]
enum Documents {
    Table,
    Id,
    Title,
    Description,
    CourseId,
    LecturerId,
    UploaderIp,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum DocumentSections {
    Table,
    Id,
    DocumentId,
    Title,
}

#[derive(Iden)]
enum DocumentFiles {
    Table,
    Id,
    SectionId,
    Name,
    FileType,
    SizeKb,
    TelegramFileId,
}

#[derive(Iden)]
enum Exams {
    Table,
    Id,
    Title,
    Subject,
    Grade,
    Year,
    TelegramFileId,
    Status,
    CreatedAt,
}
