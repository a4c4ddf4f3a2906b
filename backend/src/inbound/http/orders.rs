//! Order lifecycle and listing handlers.
//!
//! ```text
//! POST /api/orders/create             {"bagNo":"B-12","numberOfClothes":3}
//! GET  /api/orders/student/{bagNo}
//! GET  /api/orders/all
//! GET  /api/orders/pending
//! PUT  /api/orders/{orderId}/status   {"status":"inprogress"}
//! PUT  /api/orders/{orderId}/count    {"numberOfClothes":5}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::OrderStatus;
use crate::domain::ports::{
    CreateOrderRequest, UpdateOrderCountRequest, UpdateOrderStatusRequest,
};
use crate::domain::{Order, StudentOrder};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    BAG_NO, FieldErrors, STATUS, bag_number_path, clothes_count, order_id_path,
};

/// `POST /orders/create` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateOrderBody {
    #[schema(example = "B-12")]
    pub bag_no: Option<String>,
    /// Integer between 1 and 50.
    #[schema(value_type = Option<i64>, example = 3)]
    pub number_of_clothes: Option<Value>,
}

/// `PUT /orders/{orderId}/status` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UpdateStatusBody {
    /// One of `pending`, `inprogress` or `complete`, any case.
    #[schema(example = "inprogress")]
    pub status: Option<String>,
}

/// `PUT /orders/{orderId}/count` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCountBody {
    #[schema(value_type = Option<i64>, example = 5)]
    pub number_of_clothes: Option<Value>,
}

/// Place a new order for an existing student.
#[utoipa::path(
    post,
    path = "/api/orders/create",
    request_body = CreateOrderBody,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<Order>),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 404, description = "Student with this bag number not found", body = ErrorEnvelope)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders/create")]
pub async fn create_order(
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrderBody>,
) -> ApiResult<HttpResponse> {
    let CreateOrderBody {
        bag_no,
        number_of_clothes,
    } = payload.into_inner();

    let mut errors = FieldErrors::new();
    errors.require_text(bag_no.as_deref(), BAG_NO, "Bag number is required");
    let count = clothes_count(number_of_clothes.as_ref(), &mut errors);
    errors.finish()?;

    let request = CreateOrderRequest {
        bag_no: bag_no.unwrap_or_default(),
        number_of_clothes: count.unwrap_or_default(),
    };
    let order = state.orders.create_order(request).await?;
    Ok(ApiResponse::with_message("Order created successfully", order).created())
}

/// Orders belonging to one student, newest first.
#[utoipa::path(
    get,
    path = "/api/orders/student/{bagNo}",
    params(("bagNo" = String, Path, description = "Student bag number", example = "B-12")),
    responses(
        (status = 200, description = "Student orders", body = ApiResponse<Vec<StudentOrder>>),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 404, description = "Student not found", body = ErrorEnvelope)
    ),
    tags = ["orders"],
    operation_id = "getStudentOrders"
)]
#[get("/orders/student/{bag_no}")]
pub async fn student_orders(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let bag_no = bag_number_path(&path.into_inner())?;
    let orders = state.order_query.student_orders(&bag_no).await?;
    Ok(ApiResponse::data(orders).ok())
}

/// Every order, newest first.
#[utoipa::path(
    get,
    path = "/api/orders/all",
    responses(
        (status = 200, description = "All orders", body = ApiResponse<Vec<StudentOrder>>),
        (status = 503, description = "Store unavailable", body = ErrorEnvelope)
    ),
    tags = ["orders"],
    operation_id = "getAllOrders"
)]
#[get("/orders/all")]
pub async fn all_orders(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let orders = state.order_query.all_orders().await?;
    Ok(ApiResponse::data(orders).ok())
}

/// Orders still waiting to be picked up, newest first.
#[utoipa::path(
    get,
    path = "/api/orders/pending",
    responses(
        (status = 200, description = "Pending orders", body = ApiResponse<Vec<StudentOrder>>),
        (status = 503, description = "Store unavailable", body = ErrorEnvelope)
    ),
    tags = ["orders"],
    operation_id = "getPendingOrders"
)]
#[get("/orders/pending")]
pub async fn pending_orders(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let orders = state.order_query.pending_orders().await?;
    Ok(ApiResponse::data(orders).ok())
}

/// Advance an order along `PENDING -> INPROGRESS -> COMPLETE`.
#[utoipa::path(
    put,
    path = "/api/orders/{orderId}/status",
    params(("orderId" = i32, Path, description = "Order identifier")),
    request_body = UpdateStatusBody,
    responses(
        (status = 200, description = "Order status updated", body = ApiResponse<Order>),
        (status = 400, description = "Validation failed or invalid status transition", body = ErrorEnvelope),
        (status = 404, description = "Order not found", body = ErrorEnvelope)
    ),
    tags = ["orders"],
    operation_id = "updateOrderStatus"
)]
#[put("/orders/{order_id}/status")]
pub async fn update_order_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusBody>,
) -> ApiResult<HttpResponse> {
    let order_id = order_id_path(&path.into_inner())?;
    let status = payload.into_inner().status.unwrap_or_default();

    let mut errors = FieldErrors::new();
    if OrderStatus::parse_requested(&status).is_err() {
        errors.push(STATUS, "Status must be pending, inprogress, or complete");
    }
    errors.finish()?;

    let order = state
        .orders
        .update_status(UpdateOrderStatusRequest { order_id, status })
        .await?;
    Ok(ApiResponse::with_message("Order status updated successfully", order).ok())
}

/// Correct the number of clothes in an order; the status is untouched.
#[utoipa::path(
    put,
    path = "/api/orders/{orderId}/count",
    params(("orderId" = i32, Path, description = "Order identifier")),
    request_body = UpdateCountBody,
    responses(
        (status = 200, description = "Order count updated", body = ApiResponse<Order>),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 404, description = "Order not found", body = ErrorEnvelope)
    ),
    tags = ["orders"],
    operation_id = "updateOrderCount"
)]
#[put("/orders/{order_id}/count")]
pub async fn update_order_count(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateCountBody>,
) -> ApiResult<HttpResponse> {
    let order_id = order_id_path(&path.into_inner())?;

    let mut errors = FieldErrors::new();
    let count = clothes_count(payload.number_of_clothes.as_ref(), &mut errors);
    errors.finish()?;

    let request = UpdateOrderCountRequest {
        order_id,
        number_of_clothes: count.unwrap_or_default(),
    };
    let order = state.orders.update_count(request).await?;
    Ok(ApiResponse::with_message("Order count updated successfully", order).ok())
}
