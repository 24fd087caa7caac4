// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request validation module.
//!
//! Required-field and parameter checks run here, before any repository call.

use catalog_common::{Credentials, NewProduct, Product, ProductPatch};
use thiserror::Error;
use uuid::Uuid;

/// Possible validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0} validation failed: missing required field(s): {}", .1.join(", "))]
    MissingFields(&'static str, Vec<&'static str>),

    #[error("Invalid id: {0:?} is not a valid identifier")]
    InvalidId(String),

    #[error("Invalid {0}: {1:?} is not a number")]
    InvalidNumber(&'static str, String),

    #[error("Invalid {0}: {1}")]
    InvalidField(&'static str, String),

    #[error("Duplicate {0}: {1:?} already exists")]
    Duplicate(&'static str, String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Turn a create-product body into a record ready to save (id left empty)
pub fn validate_new_product(body: NewProduct) -> ValidationResult<Product> {
    let product_id = present(body.product_id);
    let name = present(body.name);
    let company = present(body.company);

    let mut missing = Vec::new();
    if product_id.is_none() {
        missing.push("productID");
    }
    if name.is_none() {
        missing.push("name");
    }
    if body.price.is_none() {
        missing.push("price");
    }
    if body.created_at.is_none() {
        missing.push("createdAt");
    }
    if company.is_none() {
        missing.push("company");
    }

    match (product_id, name, body.price, body.created_at, company) {
        (Some(product_id), Some(name), Some(price), Some(created_at), Some(company)) => {
            Ok(Product {
                id: String::new(),
                product_id,
                name,
                price,
                featured: body.featured,
                rating: body.rating,
                created_at,
                company,
            })
        },
        _ => Err(ValidationError::MissingFields("Product", missing)),
    }
}

/// Reject patches that would blank out a required string field
pub fn validate_patch(patch: &ProductPatch) -> ValidationResult<()> {
    for (field, value) in [
        ("productID", &patch.product_id),
        ("name", &patch.name),
        ("company", &patch.company),
    ] {
        if value.as_deref() == Some("") {
            return Err(ValidationError::InvalidField(
                field,
                "must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

/// Split a register/login body into `(username, password)`
pub fn validate_credentials(body: Credentials) -> ValidationResult<(String, String)> {
    let username = present(body.username);
    let password = present(body.password);

    match (username, password) {
        (Some(username), Some(password)) => Ok((username, password)),
        (username, password) => {
            let mut missing = Vec::new();
            if username.is_none() {
                missing.push("username");
            }
            if password.is_none() {
                missing.push("password");
            }
            Err(ValidationError::MissingFields("User", missing))
        },
    }
}

/// Check that a path id looks like a repository identifier
pub fn validate_record_id(id: &str) -> ValidationResult<&str> {
    Uuid::parse_str(id)
        .map(|_| id)
        .map_err(|_| ValidationError::InvalidId(id.to_string()))
}

/// Parse a numeric path parameter such as `maxPrice`
pub fn parse_threshold(name: &'static str, raw: &str) -> ValidationResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber(name, raw.to_string()))
}
