//! HTTP inbound adapter exposing the REST endpoints.

use actix_web::web;

pub mod crud;
pub mod error;
pub mod health;
pub mod products;
pub mod recipes;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;

/// Register extractor configuration and the `/api` resource scopes.
///
/// Expects an [`state::HttpState`] to be registered as application data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(products::scope())
        .service(recipes::scope())
        .service(users::scope());
}
