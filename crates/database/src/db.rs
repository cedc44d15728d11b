use sea_orm::{Database, DatabaseConnection, DbErr};

/// Creates a database connection pool from the configured URL
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
