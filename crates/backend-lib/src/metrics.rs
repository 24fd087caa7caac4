// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const PRODUCT_CREATED: &str = "product.created";
pub const PRODUCT_DELETED: &str = "product.deleted";
pub const USER_REGISTERED: &str = "user.registered";
pub const LOGIN_SUCCESS: &str = "login.success";
pub const LOGIN_FAILURE: &str = "login.failure";
pub const AUTH_REJECTED: &str = "auth.rejected";
