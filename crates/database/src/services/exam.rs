use crate::entities::exams;
use chrono::Utc;
use models::status::ModerationStatus;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

/// Fields for a new exam from the legacy upload form.
pub struct NewExam {
    pub title: String,
    pub subject: String,
    pub grade: i16,
    pub year: i16,
    pub telegram_file_id: String,
}

pub struct ExamService;

impl ExamService {
    /// Approved exams, newest first.
    pub async fn list_approved(db: &DatabaseConnection) -> Result<Vec<exams::Model>, DbErr> {
        exams::Entity::find()
            .filter(exams::Column::Status.eq(ModerationStatus::Approved.as_str()))
            .order_by_desc(exams::Column::CreatedAt)
            .all(db)
            .await
    }

    pub async fn insert(
        db: &DatabaseConnection,
        new_exam: NewExam,
    ) -> Result<exams::Model, DbErr> {
        exams::Entity::insert(exams::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new_exam.title),
            subject: Set(new_exam.subject),
            grade: Set(new_exam.grade),
            year: Set(new_exam.year),
            telegram_file_id: Set(new_exam.telegram_file_id),
            status: Set(ModerationStatus::Pending.as_str().to_owned()),
            created_at: Set(Utc::now()),
        })
        .exec_with_returning(db)
        .await
    }

    pub async fn get(db: &DatabaseConnection, exam_id: Uuid) -> Result<Option<exams::Model>, DbErr> {
        exams::Entity::find_by_id(exam_id).one(db).await
    }
}
