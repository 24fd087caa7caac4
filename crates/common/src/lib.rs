// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between catalog clients and the server.
//! This module defines the JSON bodies accepted and returned by the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A stored product record
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    /// Repository-generated identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Caller-chosen product code, unique across the catalog
    #[serde(rename = "productID")]
    pub product_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub company: String,
}

/// Body of `POST /products`
///
/// Every field is optional at the wire level so that missing required
/// fields can be reported together instead of failing on the first one.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    #[serde(rename = "productID", default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub company: Option<String>,
}

/// Body of `PUT /products/{id}`. Absent fields are left untouched.
///
/// The optional fields distinguish an absent key (`None`) from an explicit
/// `null` (`Some(None)`), which clears the stored value.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    #[serde(rename = "productID", default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub featured: Option<Option<bool>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<Option<f64>>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl ProductPatch {
    /// Overwrite the fields of `product` that this patch carries
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(product_id) = &self.product_id {
            product.product_id.clone_from(product_id);
        }
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(featured) = self.featured {
            product.featured = featured;
        }
        if let Some(rating) = self.rating {
            product.rating = rating;
        }
        if let Some(created_at) = self.created_at {
            product.created_at = created_at;
        }
        if let Some(company) = &self.company {
            product.company.clone_from(company);
        }
    }
}

/// A present key, `null` included, becomes `Some`; `default` covers absence
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `POST /register` and `POST /login`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Credentials {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }
}

/// Successful login response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub token: String,
}

/// Plain acknowledgement, e.g. after registration
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body returned by every failing endpoint except the auth gate
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}
