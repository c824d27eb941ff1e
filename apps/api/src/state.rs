use crate::analysis::dispatcher::Dispatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}
