//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every laundry endpoint plus the health probes, and
//! registers the envelope and entity schemas they reference. The document is
//! served by Swagger UI in debug builds and exported with
//! `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{
    ErrorCode, FieldError, Order, OrderCounts, OrderStatus, StudentDashboard, StudentOrder,
    StudentProfile, WashermanDashboard, WashermanProfile,
};
use crate::inbound::http::admin::{StudentUpdateBody, WashermanUpdateBody};
use crate::inbound::http::auth::{
    StudentLoginRequest, StudentSignupRequest, WashermanCredentialsRequest,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::health::{HealthReport, HealthStatus, ServiceBanner};
use crate::inbound::http::orders::{CreateOrderBody, UpdateCountBody, UpdateStatusBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Laundry backend API",
        description = "Student laundry orders, washerman workflow and account administration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::student_signup,
        crate::inbound::http::auth::student_login,
        crate::inbound::http::auth::washerman_signup,
        crate::inbound::http::auth::washerman_login,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::student_orders,
        crate::inbound::http::orders::all_orders,
        crate::inbound::http::orders::pending_orders,
        crate::inbound::http::orders::update_order_status,
        crate::inbound::http::orders::update_order_count,
        crate::inbound::http::dashboard::student_dashboard,
        crate::inbound::http::dashboard::washerman_dashboard,
        crate::inbound::http::admin::list_students,
        crate::inbound::http::admin::update_student,
        crate::inbound::http::admin::delete_student,
        crate::inbound::http::admin::list_washermen,
        crate::inbound::http::admin::update_washerman,
        crate::inbound::http::admin::delete_washerman,
        crate::inbound::http::health::banner,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorEnvelope,
        ErrorCode,
        FieldError,
        StudentProfile,
        WashermanProfile,
        Order,
        StudentOrder,
        OrderStatus,
        OrderCounts,
        StudentDashboard,
        WashermanDashboard,
        StudentSignupRequest,
        StudentLoginRequest,
        WashermanCredentialsRequest,
        CreateOrderBody,
        UpdateStatusBody,
        UpdateCountBody,
        StudentUpdateBody,
        WashermanUpdateBody,
        HealthReport,
        HealthStatus,
        ServiceBanner,
    )),
    tags(
        (name = "auth", description = "Student and washerman signup and login"),
        (name = "orders", description = "Order creation, listing and lifecycle"),
        (name = "dashboard", description = "Aggregated order views"),
        (name = "admin", description = "Account administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
