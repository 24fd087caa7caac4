// ============================
// catalog-backend-lib/src/router.rs
// ============================
//! HTTP router.
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{products, users};
use crate::middleware::require_token;
use crate::AppState;

/// Create the catalog router
///
/// `/products` and `/products/{id}` require a token; the filters,
/// `/register` and `/login` are public.
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            put(products::update_product).delete(products::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    let public = Router::new()
        .route("/products/featured", get(products::featured_products))
        .route(
            "/products/price/{max_price}",
            get(products::products_below_price),
        )
        .route(
            "/products/rating/{min_rating}",
            get(products::products_above_rating),
        )
        .route("/register", post(users::register))
        .route("/login", post(users::login));

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
