//! Service banner, health report and the orchestration probes.
//!
//! ```text
//! GET /              banner with version and current time
//! GET /health        {"status", "uptime", "timestamp"}
//! GET /health/ready  200 once serving, 503 before
//! GET /health/live   200 while alive, 503 once draining
//! ```
//!
//! These routes sit outside `/api` and do not use the response envelopes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use serde::Serialize;
use utoipa::ToSchema;

const SERVICE_NAME: &str = "Laundry Backend API";

/// Readiness and liveness flags plus the instant the process started.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl HealthState {
    /// Not ready yet, but live, timed by the system clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as [`HealthState::new`] with an injected clock; uptime counts
    /// from the clock's current time.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.utc();
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            clock,
            started_at,
        }
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether the server has finished starting.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether the server is still accepting work.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn report(&self) -> HealthReport {
        let now = self.clock.utc();
        HealthReport {
            status: if self.is_alive() {
                HealthStatus::Healthy
            } else {
                HealthStatus::Unhealthy
            },
            uptime: (now - self.started_at)
                .to_std()
                .unwrap_or_default()
                .as_secs_f64(),
            timestamp: now,
        }
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Seconds since the server started.
    #[schema(example = 42.5)]
    pub uptime: f64,
    pub timestamp: DateTime<Utc>,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceBanner {
    #[schema(example = "Laundry Backend API")]
    pub message: &'static str,
    #[schema(example = "running")]
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    responses((status = 200, description = "Service banner", body = ServiceBanner))
)]
#[get("/")]
pub async fn banner(state: web::Data<HealthState>) -> HttpResponse {
    HttpResponse::Ok().json(ServiceBanner {
        message: SERVICE_NAME,
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: state.clock.utc(),
    })
}

/// Health report with uptime. Answers 503 once the server is draining.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is healthy", body = HealthReport),
        (status = 503, description = "Server is shutting down", body = HealthReport)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    let report = state.report();
    let mut response = match report.status {
        HealthStatus::Healthy => HttpResponse::Ok(),
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable(),
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(report)
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
