use std::sync::Arc;

use alumni_db::Store;

use crate::auth::oauth::IdentityProvider;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence. [`alumni_db::PgStore`] in production, an in-memory store in tests.
    pub store: Arc<dyn Store>,
    pub config: Arc<ServerConfig>,
    /// Federated sign-in, present only when the provider is configured.
    pub identity_provider: Option<Arc<dyn IdentityProvider>>,
}
