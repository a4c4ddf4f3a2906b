//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::EmailPolicy;
use crate::domain::ports::{
    DashboardQuery, OrderLifecycle, OrderQuery, StudentAccounts, WashermanAccounts,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub orders: Arc<dyn OrderLifecycle>,
    pub order_query: Arc<dyn OrderQuery>,
    pub students: Arc<dyn StudentAccounts>,
    pub washermen: Arc<dyn WashermanAccounts>,
    pub dashboards: Arc<dyn DashboardQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub orders: Arc<dyn OrderLifecycle>,
    pub order_query: Arc<dyn OrderQuery>,
    pub students: Arc<dyn StudentAccounts>,
    pub washermen: Arc<dyn WashermanAccounts>,
    pub dashboards: Arc<dyn DashboardQuery>,
    /// Signup field validation needs the configured institution domain.
    pub email_policy: EmailPolicy,
}

impl HttpState {
    /// Construct state from a ports bundle and the email policy.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use laundry_backend::domain::{DashboardService, EmailPolicy, OrderService};
    /// use laundry_backend::domain::{StudentService, WashermanService};
    /// use laundry_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use laundry_backend::outbound::memory::InMemoryStore;
    /// use laundry_backend::outbound::security::Argon2PasswordHasher;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let clock = Arc::new(DefaultClock);
    /// let hasher = Arc::new(Argon2PasswordHasher);
    /// let orders = Arc::new(OrderService::new(store.clone(), store.clone(), clock.clone()));
    /// let ports = HttpStatePorts {
    ///     orders: orders.clone(),
    ///     order_query: orders,
    ///     students: Arc::new(StudentService::new(
    ///         store.clone(),
    ///         hasher.clone(),
    ///         EmailPolicy::default(),
    ///         clock.clone(),
    ///     )),
    ///     washermen: Arc::new(WashermanService::new(store.clone(), hasher, clock)),
    ///     dashboards: Arc::new(DashboardService::new(store.clone(), store)),
    /// };
    /// let state = HttpState::new(ports, EmailPolicy::default());
    /// let _orders = state.orders.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, email_policy: EmailPolicy) -> Self {
        let HttpStatePorts {
            orders,
            order_query,
            students,
            washermen,
            dashboards,
        } = ports;
        Self {
            orders,
            order_query,
            students,
            washermen,
            dashboards,
            email_policy,
        }
    }
}
