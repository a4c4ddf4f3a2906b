//! Catch-all for requests no route matched.

use actix_web::{HttpRequest, HttpResponse};

use crate::domain::Error;
use crate::inbound::http::ApiResult;

/// Render a 404 failure envelope naming the method and path.
pub async fn route_not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!(
        "Cannot {} {}",
        req.method(),
        req.path()
    )))
}
