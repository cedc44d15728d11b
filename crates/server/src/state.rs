use file_relay::RelayClient;
use sea_orm::DatabaseConnection;

/// The shared application state, created once at startup and passed to all
/// handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub relay: RelayClient,
}
