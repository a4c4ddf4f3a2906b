//! Browser CORS policy for the API.

use actix_cors::Cors;
use actix_web::http::{Uri, header};
use thiserror::Error;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AllowedOrigins {
    #[default]
    Any,
    List(Vec<String>),
}

/// A configured origin that is not an absolute `scheme://host[:port]`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid CORS origin `{origin}`: expected scheme://host[:port] or *")]
pub struct InvalidOrigin {
    origin: String,
}

fn parse_origin(origin: &str) -> Result<String, InvalidOrigin> {
    match origin.parse::<Uri>() {
        Ok(uri)
            if uri.scheme().is_some()
                && uri.host().is_some()
                && uri.path() == "/"
                && uri.query().is_none() =>
        {
            Ok(origin.trim_end_matches('/').to_owned())
        }
        _ => Err(InvalidOrigin {
            origin: origin.to_owned(),
        }),
    }
}

impl AllowedOrigins {
    /// Parse a comma-separated origin list. `*` or an empty value allows
    /// any origin.
    pub fn parse(raw: &str) -> Result<Self, InvalidOrigin> {
        let origins: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect();
        if origins.is_empty() || origins.contains(&"*") {
            return Ok(Self::Any);
        }
        origins
            .into_iter()
            .map(parse_origin)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::List)
    }

    /// Build the middleware. Credentials are allowed, so the "any origin"
    /// policy echoes the caller's origin instead of sending `*`.
    pub fn cors(&self) -> Cors {
        let cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
            .supports_credentials()
            .max_age(PREFLIGHT_MAX_AGE_SECS);
        match self {
            Self::Any => cors.allow_any_origin(),
            Self::List(origins) => origins
                .iter()
                .fold(cors, |cors, origin| cors.allowed_origin(origin)),
        }
    }
}
