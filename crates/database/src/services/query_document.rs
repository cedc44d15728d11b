use crate::entities::{courses, document_files, document_sections, documents, lecturers};
use models::status::ModerationStatus;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, prelude::Expr,
};
use std::collections::HashMap;
use uuid::Uuid;

/// One row of the paginated listing, with its display joins resolved.
pub struct DocumentListing {
    pub document: documents::Model,
    pub course: Option<courses::Model>,
    pub lecturer: Option<lecturers::Model>,
}

/// A full document with its nested sections and files.
pub struct DocumentDetail {
    pub document: documents::Model,
    pub course: Option<courses::Model>,
    pub lecturer: Option<lecturers::Model>,
    pub sections: Vec<(document_sections::Model, Vec<document_files::Model>)>,
}

pub struct QueryDocumentService;

impl QueryDocumentService {
    /// Query approved documents with pagination and filtering
    pub async fn list_documents(
        db: &DatabaseConnection,
        page: u64,
        limit: u64,
        university_id: Option<Uuid>,
        search_term: Option<String>,
    ) -> Result<(Vec<DocumentListing>, u64), DbErr> {
        let mut query = documents::Entity::find()
            .join(JoinType::InnerJoin, documents::Relation::Course.def())
            .join(JoinType::LeftJoin, documents::Relation::Lecturer.def())
            .filter(documents::Column::Status.eq(ModerationStatus::Approved.as_str()));

        if let Some(university_id) = university_id {
            query = query.filter(courses::Column::UniversityId.eq(university_id));
        }

        if let Some(term) = search_term
            && !term.trim().is_empty()
        {
            query = query.filter(Self::build_search_condition(&term));
        }

        let query = query.order_by_desc(documents::Column::CreatedAt);

        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, limit);
        let page_documents = paginator.fetch_page(page.max(1) - 1).await?;

        let listings = Self::attach_display_fields(db, page_documents).await?;
        Ok((listings, total_items))
    }

    /// Case-insensitive substring match across the searchable display fields
    fn build_search_condition(term: &str) -> Condition {
        let pattern = format!("%{term}%");
        Condition::any()
            .add(Expr::cust_with_expr("documents.title ILIKE $1", pattern.clone()))
            .add(Expr::cust_with_expr(
                "COALESCE(documents.description, '') ILIKE $1",
                pattern.clone(),
            ))
            .add(Expr::cust_with_expr("courses.name ILIKE $1", pattern.clone()))
            .add(Expr::cust_with_expr("COALESCE(lecturers.name, '') ILIKE $1", pattern))
    }

    /// Batch-fetch the course and lecturer rows for a page of documents
    async fn attach_display_fields(
        db: &DatabaseConnection,
        page_documents: Vec<documents::Model>,
    ) -> Result<Vec<DocumentListing>, DbErr> {
        if page_documents.is_empty() {
            return Ok(vec![]);
        }

        let course_ids: Vec<Uuid> = page_documents.iter().map(|d| d.course_id).collect();
        let lecturer_ids: Vec<Uuid> =
            page_documents.iter().filter_map(|d| d.lecturer_id).collect();

        let courses_by_id: HashMap<Uuid, courses::Model> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|course| (course.id, course))
            .collect();

        let lecturers_by_id: HashMap<Uuid, lecturers::Model> = if lecturer_ids.is_empty() {
            HashMap::new()
        } else {
            lecturers::Entity::find()
                .filter(lecturers::Column::Id.is_in(lecturer_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|lecturer| (lecturer.id, lecturer))
                .collect()
        };

        let listings = page_documents
            .into_iter()
            .map(|document| {
                let course = courses_by_id.get(&document.course_id).cloned();
                let lecturer = document
                    .lecturer_id
                    .and_then(|id| lecturers_by_id.get(&id).cloned());

                DocumentListing {
                    document,
                    course,
                    lecturer,
                }
            })
            .collect();

        Ok(listings)
    }

    /// Get a single approved document with all its sections and files
    pub async fn get_document_detail(
        db: &DatabaseConnection,
        document_id: Uuid,
    ) -> Result<Option<DocumentDetail>, DbErr> {
        let document = match documents::Entity::find_by_id(document_id)
            .filter(documents::Column::Status.eq(ModerationStatus::Approved.as_str()))
            .one(db)
            .await?
        {
            Some(document) => document,
            None => return Ok(None),
        };

        let course = courses::Entity::find_by_id(document.course_id).one(db).await?;
        let lecturer = match document.lecturer_id {
            Some(lecturer_id) => lecturers::Entity::find_by_id(lecturer_id).one(db).await?,
            None => None,
        };

        let sections = document_sections::Entity::find()
            .filter(document_sections::Column::DocumentId.eq(document_id))
            .all(db)
            .await?;

        if sections.is_empty() {
            return Ok(Some(DocumentDetail {
                document,
                course,
                lecturer,
                sections: vec![],
            }));
        }

        let section_ids: Vec<Uuid> = sections.iter().map(|s| s.id).collect();

        // Batch fetch all files for all sections
        let files = document_files::Entity::find()
            .filter(document_files::Column::SectionId.is_in(section_ids))
            .all(db)
            .await?;

        let mut files_by_section: HashMap<Uuid, Vec<document_files::Model>> = HashMap::new();
        for file in files {
            files_by_section.entry(file.section_id).or_default().push(file);
        }

        let result_sections = sections
            .into_iter()
            .map(|section| {
                let section_files = files_by_section.remove(&section.id).unwrap_or_default();
                (section, section_files)
            })
            .collect();

        Ok(Some(DocumentDetail {
            document,
            course,
            lecturer,
            sections: result_sections,
        }))
    }

    /// Look up a stored file row for the download path
    pub async fn get_document_file(
        db: &DatabaseConnection,
        file_id: Uuid,
    ) -> Result<Option<document_files::Model>, DbErr> {
        document_files::Entity::find_by_id(file_id).one(db).await
    }
}
