mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;

pub fn create_router(db: Database) -> Router {
    let api = Router::new()
        // Weekly listing (the journal's read path)
        .route("/weeks", get(handlers::list_weeks))
        // Entries
        .route("/entries", get(handlers::list_entries))
        .route("/entries", post(handlers::create_entry))
        .route("/entries/{id}", get(handlers::get_entry))
        .route("/entries/{id}", put(handlers::update_entry))
        .route("/entries/{id}", delete(handlers::delete_entry))
        // Health
        .route("/health", get(handlers::health));

    // Form submission endpoints used by the journal pages
    let forms = Router::new()
        .route("/entries", post(handlers::submit_entry))
        .route("/entries/{id}/edit", post(handlers::submit_entry_edit));

    Router::new()
        .nest("/api/v1", api)
        .merge(forms)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
