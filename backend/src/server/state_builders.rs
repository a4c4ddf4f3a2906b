//! Builders wiring domain services onto the configured storage backend.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use laundry_backend::domain::ports::{OrderRepository, StudentRepository, WashermanRepository};
use laundry_backend::domain::{
    DashboardService, EmailPolicy, OrderService, StudentService, WashermanService,
};
use laundry_backend::inbound::http::state::{HttpState, HttpStatePorts};
use laundry_backend::outbound::memory::InMemoryStore;
use laundry_backend::outbound::persistence::{
    DieselOrderRepository, DieselStudentRepository, DieselWashermanRepository,
};
use laundry_backend::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Repository handles shared by every service.
struct Repositories<S, O, W> {
    students: Arc<S>,
    orders: Arc<O>,
    washermen: Arc<W>,
}

/// Wire every driving port over one set of repositories.
fn build_ports<S, O, W>(
    repos: Repositories<S, O, W>,
    email_policy: &EmailPolicy,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts
where
    S: StudentRepository + 'static,
    O: OrderRepository + 'static,
    W: WashermanRepository + 'static,
{
    let Repositories {
        students,
        orders,
        washermen,
    } = repos;
    let hasher = Arc::new(Argon2PasswordHasher);
    let order_service = Arc::new(OrderService::new(
        students.clone(),
        orders.clone(),
        clock.clone(),
    ));

    HttpStatePorts {
        orders: order_service.clone(),
        order_query: order_service,
        students: Arc::new(StudentService::new(
            students.clone(),
            hasher.clone(),
            email_policy.clone(),
            clock.clone(),
        )),
        washermen: Arc::new(WashermanService::new(washermen, hasher, clock)),
        dashboards: Arc::new(DashboardService::new(students, orders)),
    }
}

/// Build the shared HTTP state, using PostgreSQL when a pool is configured
/// and the in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Repositories {
                students: Arc::new(DieselStudentRepository::new(pool.clone())),
                orders: Arc::new(DieselOrderRepository::new(pool.clone())),
                washermen: Arc::new(DieselWashermanRepository::new(pool.clone())),
            },
            &config.email_policy,
            clock,
        ),
        None => {
            let store = Arc::new(InMemoryStore::new());
            build_ports(
                Repositories {
                    students: store.clone(),
                    orders: store.clone(),
                    washermen: store,
                },
                &config.email_policy,
                clock,
            )
        }
    };

    web::Data::new(HttpState::new(ports, config.email_policy.clone()))
}
