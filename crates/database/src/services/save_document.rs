use crate::entities::{courses, document_files, document_sections, documents, lecturers};
use chrono::Utc;
use models::{file_type::FileType, status::ModerationStatus};
use sea_orm::{
    ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, sea_query::OnConflict,
};
use uuid::Uuid;

/// Document-level fields collected from a validated upload.
pub struct NewDocument {
    pub title: String,
    pub description: Option<String>,
    pub course_id: Uuid,
    pub lecturer_id: Option<Uuid>,
    pub uploader_ip: Option<String>,
}

/// Metadata for one relayed file.
pub struct NewDocumentFile {
    pub section_id: Uuid,
    pub name: String,
    pub file_type: FileType,
    pub size_kb: i32,
    pub telegram_file_id: String,
}

pub struct SaveDocumentService;

impl SaveDocumentService {
    /// Get-or-create a course by its natural key (name, university).
    ///
    /// Done as a conflict-handling insert against the unique index so that
    /// concurrent identical uploads converge on a single row. The no-op
    /// `name = excluded.name` update makes `RETURNING` yield the surviving
    /// row's id on both paths.
    pub async fn get_or_create_course(
        db: &DatabaseConnection,
        name: &str,
        code: Option<String>,
        university_id: Uuid,
    ) -> Result<Uuid, DbErr> {
        let course = courses::Entity::insert(courses::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_owned()),
            code: Set(code),
            university_id: Set(university_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([courses::Column::Name, courses::Column::UniversityId])
                .update_column(courses::Column::Name)
                .to_owned(),
        )
        .exec_with_returning(db)
        .await?;

        Ok(course.id)
    }

    /// Get-or-create a lecturer by its natural key (name, university).
    pub async fn get_or_create_lecturer(
        db: &DatabaseConnection,
        name: &str,
        university_id: Uuid,
    ) -> Result<Uuid, DbErr> {
        let lecturer = lecturers::Entity::insert(lecturers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_owned()),
            university_id: Set(university_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([lecturers::Column::Name, lecturers::Column::UniversityId])
                .update_column(lecturers::Column::Name)
                .to_owned(),
        )
        .exec_with_returning(db)
        .await?;

        Ok(lecturer.id)
    }

    /// Insert the document row in `pending` state.
    pub async fn insert_document(
        db: &DatabaseConnection,
        new_document: NewDocument,
    ) -> Result<Uuid, DbErr> {
        let document_id = Uuid::new_v4();

        documents::Entity::insert(documents::ActiveModel {
            id: Set(document_id),
            title: Set(new_document.title),
            description: Set(new_document.description),
            course_id: Set(new_document.course_id),
            lecturer_id: Set(new_document.lecturer_id),
            uploader_ip: Set(new_document.uploader_ip),
            status: Set(ModerationStatus::Pending.as_str().to_owned()),
            created_at: Set(Utc::now()),
        })
        .exec(db)
        .await?;

        Ok(document_id)
    }

    pub async fn insert_section(
        db: &DatabaseConnection,
        document_id: Uuid,
        title: &str,
    ) -> Result<Uuid, DbErr> {
        let section_id = Uuid::new_v4();

        document_sections::Entity::insert(document_sections::ActiveModel {
            id: Set(section_id),
            document_id: Set(document_id),
            title: Set(title.to_owned()),
        })
        .exec(db)
        .await?;

        Ok(section_id)
    }

    pub async fn insert_file(
        db: &DatabaseConnection,
        new_file: NewDocumentFile,
    ) -> Result<Uuid, DbErr> {
        let file_id = Uuid::new_v4();

        document_files::Entity::insert(document_files::ActiveModel {
            id: Set(file_id),
            section_id: Set(new_file.section_id),
            name: Set(new_file.name),
            file_type: Set(new_file.file_type.as_str().to_owned()),
            size_kb: Set(new_file.size_kb),
            telegram_file_id: Set(new_file.telegram_file_id),
        })
        .exec(db)
        .await?;

        Ok(file_id)
    }
}
