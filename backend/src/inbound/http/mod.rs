//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate JSON requests into driving-port calls and render the
//! success and failure envelopes. Everything except the health probes lives
//! under the `/api` scope built by [`api_scope`].

use actix_web::{Scope, web};

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod envelope;
pub mod error;
pub mod fallback;
pub mod health;
pub mod orders;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Build the `/api` scope with every laundry endpoint registered.
///
/// The scope carries the JSON extractor configuration so malformed bodies
/// surface as validation failures. Requests that match no route get the
/// 404 failure envelope.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(validation::json_config())
        .service(auth::student_signup)
        .service(auth::student_login)
        .service(auth::washerman_signup)
        .service(auth::washerman_login)
        .service(orders::create_order)
        .service(orders::student_orders)
        .service(orders::all_orders)
        .service(orders::pending_orders)
        .service(orders::update_order_status)
        .service(orders::update_order_count)
        .service(dashboard::student_dashboard)
        .service(dashboard::washerman_dashboard)
        .service(admin::list_students)
        .service(admin::update_student)
        .service(admin::delete_student)
        .service(admin::list_washermen)
        .service(admin::update_washerman)
        .service(admin::delete_washerman)
        .default_service(web::route().to(fallback::route_not_found))
}
