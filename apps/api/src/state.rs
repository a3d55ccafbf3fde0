use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds configuration only: every request builds its own `DocumentProcessor`, so no
/// document state is shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
