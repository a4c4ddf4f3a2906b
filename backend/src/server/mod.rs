//! Server construction and middleware wiring.

mod config;
mod cors;
mod state_builders;

pub use config::{AppSettings, ServerConfig};
pub use cors::AllowedOrigins;

use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use laundry_backend::Trace;
#[cfg(debug_assertions)]
use laundry_backend::doc::ApiDoc;
use laundry_backend::inbound::http::api_scope;
use laundry_backend::inbound::http::fallback::route_not_found;
use laundry_backend::inbound::http::health::{HealthState, banner, health, live, ready};
use laundry_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(cors)
        .wrap(Trace)
        .service(api_scope())
        .service(banner)
        .service(health)
        .service(ready)
        .service(live)
        .default_service(web::route().to(route_not_found));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing the bind address, email
///   policy, CORS origins and optional database pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr;
    let origins = config.allowed_origins;

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            origins.cors(),
        )
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use laundry_backend::domain::EmailPolicy;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::net::SocketAddr;

    fn in_memory_state() -> web::Data<HttpState> {
        build_http_state(&ServerConfig::new(
            SocketAddr::from(([127, 0, 0, 1], 0)),
            EmailPolicy::default(),
        ))
    }

    #[rstest]
    #[actix_web::test]
    async fn health_routes_sit_outside_the_api_scope() {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        let app = test::init_service(build_app(
            health_state,
            in_memory_state(),
            AllowedOrigins::Any.cors(),
        ))
        .await;

        for uri in ["/health/ready", "/health", "/"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request())
                .await;
            assert_eq!(res.status(), StatusCode::OK, "{uri}");
        }
    }

    #[rstest]
    #[case("/laundry")]
    #[case("/api/orders/7")]
    #[actix_web::test]
    async fn unmatched_routes_answer_with_the_failure_envelope(#[case] uri: &str) {
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            in_memory_state(),
            AllowedOrigins::Any.cors(),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::delete().uri(uri).to_request())
            .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], format!("Cannot DELETE {uri}"));
    }

    #[rstest]
    #[actix_web::test]
    async fn api_responses_carry_cors_headers_for_allowed_origins() {
        let origins = AllowedOrigins::parse("https://laundry.example.edu").expect("valid origin");
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            in_memory_state(),
            origins.cors(),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/api/orders/all")
            .insert_header((header::ORIGIN, "https://laundry.example.edu"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("https://laundry.example.edu")
        );
        assert!(res.headers().contains_key("trace-id"));
    }

    #[rstest]
    #[actix_web::test]
    async fn signup_then_order_round_trip() {
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            in_memory_state(),
            AllowedOrigins::Any.cors(),
        ))
        .await;

        let signup = test::TestRequest::post()
            .uri("/api/auth/student/signup")
            .set_json(json!({
                "bagNo": "G-4",
                "name": "Meera Nair",
                "email": "meera@rishihood.edu.in",
                "enrollmentNo": "2023EE044",
                "phoneNo": "9123456780",
                "residencyNo": "H-110",
                "password": "secret1"
            }))
            .to_request();
        let res = test::call_service(&app, signup).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let create = test::TestRequest::post()
            .uri("/api/orders/create")
            .set_json(json!({"bagNo": "G-4", "numberOfClothes": 5}))
            .to_request();
        let res = test::call_service(&app, create).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["data"]["status"], "PENDING");
    }
}
