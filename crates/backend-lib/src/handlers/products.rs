// ============================
// crates/backend-lib/src/handlers/products.rs
// ============================
//! Product handlers.
//!
//! Create, list, update and delete sit behind the token gate; the three
//! filters are public.
use std::sync::Arc;

use ::metrics::counter;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use catalog_common::{NewProduct, Product, ProductPatch};

use crate::auth::Claims;
use crate::storage::all;
use crate::validation::{self, ValidationError};
use crate::{error::AppError, metrics, AppState};

/// Public product queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductFilter {
    /// `featured == true`
    Featured,
    /// `price < max`
    PriceBelow(f64),
    /// `rating > min`; products without a rating never match
    RatingAbove(f64),
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match *self {
            ProductFilter::Featured => product.featured == Some(true),
            ProductFilter::PriceBelow(max) => product.price < max,
            ProductFilter::RatingAbove(min) => product.rating.is_some_and(|r| r > min),
        }
    }
}

async fn filtered(state: &AppState, filter: ProductFilter) -> Result<Json<Vec<Product>>, AppError> {
    let products = state
        .products
        .find_many(&|p: &Product| filter.matches(p))
        .await?;
    tracing::debug!(?filter, count = products.len(), "filtered products");
    Ok(Json(products))
}

fn missing_product(id: &str) -> AppError {
    AppError::NotFound(format!("Product {id} not found"))
}

/// `POST /products`
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let Json(body) = payload?;
    let product = validation::validate_new_product(body)?;

    let taken = state
        .products
        .find_one(&|p: &Product| p.product_id == product.product_id)
        .await?;
    if taken.is_some() {
        return Err(ValidationError::Duplicate("productID", product.product_id).into());
    }

    let saved = state.products.save(product).await?;
    tracing::info!(
        id = %saved.id,
        product_id = %saved.product_id,
        by = %claims.username,
        "product created"
    );
    counter!(metrics::PRODUCT_CREATED).increment(1);

    Ok((StatusCode::CREATED, Json(saved)))
}

/// `GET /products`
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.products.find_many(&all::<Product>).await?;
    Ok(Json(products))
}

/// `PUT /products/{id}`
///
/// An unknown id answers `200 null` unless `products.strict_missing_ids` is set.
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Option<Product>>, AppError> {
    let Path(id) = path?;
    let id = validation::validate_record_id(&id)?;
    let Json(patch) = payload?;
    validation::validate_patch(&patch)?;

    let updated = state
        .products
        .update_by_id(id, &|p: &mut Product| patch.apply_to(p))
        .await?;

    match updated {
        Some(product) => {
            tracing::info!(id, by = %claims.username, "product updated");
            Ok(Json(Some(product)))
        },
        None if state.settings.products.strict_missing_ids => Err(missing_product(id)),
        None => {
            tracing::debug!(id, "update matched no product");
            Ok(Json(None))
        },
    }
}

/// `DELETE /products/{id}`
///
/// Always `204` unless `products.strict_missing_ids` is set.
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let id = validation::validate_record_id(&id)?;

    match state.products.delete_by_id(id).await? {
        Some(product) => {
            tracing::info!(
                id,
                product_id = %product.product_id,
                by = %claims.username,
                "product deleted"
            );
            counter!(metrics::PRODUCT_DELETED).increment(1);
            Ok(StatusCode::NO_CONTENT)
        },
        None if state.settings.products.strict_missing_ids => Err(missing_product(id)),
        None => Ok(StatusCode::NO_CONTENT),
    }
}

/// `GET /products/featured`
pub async fn featured_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, AppError> {
    filtered(&state, ProductFilter::Featured).await
}

/// `GET /products/price/{max_price}`
pub async fn products_below_price(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Product>>, AppError> {
    let Path(max_price) = path?;
    let max = validation::parse_threshold("maxPrice", &max_price)?;
    filtered(&state, ProductFilter::PriceBelow(max)).await
}

/// `GET /products/rating/{min_rating}`
pub async fn products_above_rating(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Product>>, AppError> {
    let Path(min_rating) = path?;
    let min = validation::parse_threshold("minRating", &min_rating)?;
    filtered(&state, ProductFilter::RatingAbove(min)).await
}
