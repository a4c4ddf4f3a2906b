//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test, web};
use serde_json::Value;

use crate::Trace;
use crate::domain::EmailPolicy;
use crate::domain::ports::{
    MockDashboardQuery, MockOrderLifecycle, MockOrderQuery, MockStudentAccounts,
    MockWashermanAccounts,
};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Builds [`HttpState`] from mocks; ports left unset get a mock with no
/// expectations, so any call to them fails the test.
#[derive(Default)]
pub struct HttpStateBuilder {
    orders: Option<MockOrderLifecycle>,
    order_query: Option<MockOrderQuery>,
    students: Option<MockStudentAccounts>,
    washermen: Option<MockWashermanAccounts>,
    dashboards: Option<MockDashboardQuery>,
}

impl HttpStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(mut self, mock: MockOrderLifecycle) -> Self {
        self.orders = Some(mock);
        self
    }

    pub fn order_query(mut self, mock: MockOrderQuery) -> Self {
        self.order_query = Some(mock);
        self
    }

    pub fn students(mut self, mock: MockStudentAccounts) -> Self {
        self.students = Some(mock);
        self
    }

    pub fn washermen(mut self, mock: MockWashermanAccounts) -> Self {
        self.washermen = Some(mock);
        self
    }

    pub fn dashboards(mut self, mock: MockDashboardQuery) -> Self {
        self.dashboards = Some(mock);
        self
    }

    pub fn build(self) -> HttpState {
        let ports = HttpStatePorts {
            orders: Arc::new(self.orders.unwrap_or_default()),
            order_query: Arc::new(self.order_query.unwrap_or_default()),
            students: Arc::new(self.students.unwrap_or_default()),
            washermen: Arc::new(self.washermen.unwrap_or_default()),
            dashboards: Arc::new(self.dashboards.unwrap_or_default()),
        };
        HttpState::new(ports, EmailPolicy::default())
    }
}

/// Application wired like production: trace middleware plus the `/api` scope.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(api_scope())
}

/// Send one request and decode the JSON response body.
pub async fn call_json(
    state: HttpState,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let app = test::init_service(test_app(state)).await;
    let mut request = test::TestRequest::default().method(method).uri(uri);
    if let Some(body) = body {
        request = request.set_json(body);
    }

    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}
