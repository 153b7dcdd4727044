//! Route definitions for the Procurement Management Dashboard

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Supplier registry
        .nest("/supplier", supplier_routes())
        // Material requests and the make-po flow
        .nest("/material-request", material_request_routes())
        // Item master
        .nest("/item", item_routes())
        // Flat reference listings for the filter controls
        .route("/category", get(handlers::list_categories))
        .route("/uom", get(handlers::list_uoms))
        .route("/top", get(handlers::list_tops))
        // Purchase history
        .route("/transaction", get(handlers::list_transactions))
        // Dashboard aggregations and export
        .nest("/dashboard", dashboard_routes())
        // Geographic reference proxy
        .nest("/region", region_routes())
}

/// Supplier registry routes
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route("/:supplier_code", get(handlers::get_supplier))
}

/// Material request routes
fn material_request_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_material_requests))
        .route("/make-po", post(handlers::make_po))
}

/// Item master routes
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_items))
        .route(
            "/:item_code/price-comparison",
            get(handlers::price_comparison),
        )
}

/// Material request dashboard routes
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/material-request",
            get(handlers::material_request_dashboard),
        )
        .route(
            "/material-request/export",
            get(handlers::export_material_requests),
        )
}

/// Geographic reference routes
fn region_routes() -> Router<AppState> {
    Router::new()
        .route("/country", get(handlers::list_countries))
        .route("/province", get(handlers::list_provinces))
        .route("/city/:code", get(handlers::list_cities))
}
