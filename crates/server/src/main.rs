mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use config::Config;
use file_relay::RelayClient;
use log::info;
use state::AppState;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Uploads carry whole document bundles, so the default 2 MB body cap is far
/// too small.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::from_env().expect("Failed to load configuration");

    let db = database::db::create_connection(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let relay = RelayClient::new(
        config.telegram_bot_token.clone(),
        config.telegram_channel_id.clone(),
    );

    let state = AppState { db, relay };

    let api = Router::new()
        .route("/universities", get(routes::university::get_universities))
        .route(
            "/documents",
            get(routes::document::get_documents).post(routes::document::upload_document),
        )
        .route("/documents/{id}", get(routes::document::get_document_by_id))
        .route(
            "/download/file/{file_id}",
            get(routes::download::download_document_file),
        )
        .route("/download/{exam_id}", get(routes::download::download_exam))
        .route("/exams", get(routes::exam::get_exams))
        .route("/upload", post(routes::exam::upload_exam))
        .route("/reviews", get(routes::review::get_reviews))
        .route("/health", get(routes::health::health))
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    let app = Router::new()
        .route("/", get(routes::root::root))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .expect("Failed to bind address");
    info!("Running axum on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown::shutdown_signal())
        .await
        .expect("Server error");
}
