//! End-to-end HTTP tests over the in-memory store.
//!
//! Each test builds the production `/api` scope with real services so the
//! envelopes, status codes and cascade behaviour are checked together.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use laundry_backend::Trace;
use laundry_backend::domain::{
    DashboardService, EmailPolicy, OrderService, StudentService, TRACE_ID_HEADER,
    WashermanService,
};
use laundry_backend::inbound::http::api_scope;
use laundry_backend::inbound::http::state::{HttpState, HttpStatePorts};
use laundry_backend::outbound::memory::InMemoryStore;
use laundry_backend::outbound::security::Argon2PasswordHasher;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(DefaultClock);
    let hasher = Arc::new(Argon2PasswordHasher);
    let orders = Arc::new(OrderService::new(store.clone(), store.clone(), clock.clone()));
    let ports = HttpStatePorts {
        orders: orders.clone(),
        order_query: orders,
        students: Arc::new(StudentService::new(
            store.clone(),
            hasher.clone(),
            EmailPolicy::default(),
            clock.clone(),
        )),
        washermen: Arc::new(WashermanService::new(store.clone(), hasher, clock)),
        dashboards: Arc::new(DashboardService::new(store.clone(), store)),
    };
    HttpState::new(ports, EmailPolicy::default())
}

fn student(bag_no: &str, email: &str, enrollment_no: &str) -> Value {
    json!({
        "bagNo": bag_no,
        "name": "Asha Verma",
        "email": email,
        "enrollmentNo": enrollment_no,
        "phoneNo": "9876543210",
        "residencyNo": "H-204",
        "password": "secret1"
    })
}

async fn send<S>(app: &S, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = match method {
        "POST" => test::TestRequest::post(),
        "PUT" => test::TestRequest::put(),
        "DELETE" => test::TestRequest::delete(),
        _ => test::TestRequest::get(),
    }
    .uri(uri);
    let request = match body {
        Some(body) => request.set_json(body),
        None => request,
    };
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .wrap(Trace)
                .service(api_scope()),
        )
        .await
    };
}

#[rstest]
#[actix_web::test]
async fn signup_login_and_order_lifecycle(state: HttpState) {
    let app = init_app!(state);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/student/signup",
        Some(student("B-12", "A@Rishihood.edu.in", "2023CS101")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "a@rishihood.edu.in");
    assert!(body["data"].get("password").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/student/login",
        Some(json!({"email": "a@rishihood.edu.in", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders/create",
        Some(json!({"bagNo": "B-12", "numberOfClothes": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = body["data"]["id"].as_i64().expect("order id");

    let status_uri = format!("/api/orders/{order_id}/status");
    let (status, body) = send(&app, "PUT", &status_uri, Some(json!({"status": "inprogress"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "INPROGRESS");

    let (status, body) = send(&app, "PUT", &status_uri, Some(json!({"status": "pending"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid status transition");

    let (_, body) = send(&app, "GET", "/api/student/dashboard/B-12", None).await;
    assert_eq!(body["data"]["totalOrders"], 1);
    assert_eq!(body["data"]["inprogressOrders"], 1);
    assert_eq!(body["data"]["student"]["bagNo"], "B-12");
}

#[rstest]
#[actix_web::test]
async fn wrong_password_matches_unknown_account(state: HttpState) {
    let app = init_app!(state);
    send(
        &app,
        "POST",
        "/api/auth/student/signup",
        Some(student("B-1", "b@rishihood.edu.in", "E1")),
    )
    .await;

    let (wrong_status, wrong_body) = send(
        &app,
        "POST",
        "/api/auth/student/login",
        Some(json!({"email": "b@rishihood.edu.in", "password": "nope123"})),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        "POST",
        "/api/auth/student/login",
        Some(json!({"email": "z@rishihood.edu.in", "password": "nope123"})),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body["error"], unknown_body["error"]);
}

#[rstest]
#[case(student("B-2", "a@rishihood.edu.in", "E9"), "Email already exists")]
#[case(student("B-2", "c@rishihood.edu.in", "E1"), "Enrollment number already exists")]
#[case(student("B-1", "c@rishihood.edu.in", "E9"), "Bag number already exists")]
#[actix_web::test]
async fn duplicate_student_fields_conflict(
    state: HttpState,
    #[case] duplicate: Value,
    #[case] message: &str,
) {
    let app = init_app!(state);
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/student/signup",
        Some(student("B-1", "a@rishihood.edu.in", "E1")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/auth/student/signup", Some(duplicate)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], message);
}

#[rstest]
#[actix_web::test]
async fn deleting_a_student_cascades_to_orders(state: HttpState) {
    let app = init_app!(state);
    send(
        &app,
        "POST",
        "/api/auth/student/signup",
        Some(student("G-3", "g@rishihood.edu.in", "E3")),
    )
    .await;
    let (_, body) = send(
        &app,
        "POST",
        "/api/orders/create",
        Some(json!({"bagNo": "G-3", "numberOfClothes": 50})),
    )
    .await;
    let order_id = body["data"]["id"].as_i64().expect("order id");

    let (status, body) = send(&app, "DELETE", "/api/admin/students/G-3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student deleted successfully");

    let (_, body) = send(&app, "GET", "/api/orders/all", None).await;
    assert_eq!(body["data"], json!([]));

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/count"),
        Some(json!({"numberOfClothes": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn validation_failures_list_fields(state: HttpState) {
    let app = init_app!(state);

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders/create",
        Some(json!({"numberOfClothes": 51})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["statusCode"], 400);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("field list")
        .iter()
        .filter_map(|entry| entry["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["bagNo", "numberOfClothes"]);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/orders/abc/status",
        Some(json!({"status": "complete"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "orderId");
}

#[rstest]
#[actix_web::test]
async fn values_wider_than_their_columns_are_field_errors(state: HttpState) {
    let app = init_app!(state);
    let mut signup = student("B-7", "wide@rishihood.edu.in", "E7");
    signup["name"] = json!("n".repeat(256));

    let (status, body) = send(&app, "POST", "/api/auth/student/signup", Some(signup)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["errors"][0]["field"], "name");
    assert_eq!(body["errors"][0]["message"], "Name must be at most 255 characters");

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/washerman/signup",
        Some(json!({"username": "u".repeat(256), "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "username");
}

#[rstest]
#[actix_web::test]
async fn responses_carry_trace_ids(state: HttpState) {
    let app = init_app!(state);
    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/orders/999/none").to_request(),
    )
    .await;
    assert!(response.headers().contains_key(TRACE_ID_HEADER));

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/student/dashboard/B-404")
            .to_request(),
    )
    .await;
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace header");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["traceId"], header);
    assert_eq!(body["error"], "Student not found");
}
