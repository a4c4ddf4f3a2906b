//! Application settings loaded via OrthoConfig and the server configuration
//! derived from them.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use laundry_backend::domain::{DEFAULT_EMAIL_DOMAIN, EmailPolicy};
use laundry_backend::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::cors::{AllowedOrigins, InvalidOrigin};

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_POOL_SIZE: u32 = 10;

/// Settings read from CLI flags, `LAUNDRY_*` environment variables and an
/// optional configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LAUNDRY")]
pub struct AppSettings {
    /// Address to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Listening port; defaults to 8000.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: Option<u32>,
    /// Institution domain student emails must end with.
    pub email_domain: Option<String>,
    /// Browser origins allowed by CORS, comma separated; `*` allows any.
    pub cors_origin: Option<String>,
    /// Apply embedded migrations before serving traffic.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Email policy for student signup and login.
    pub fn email_policy(&self) -> EmailPolicy {
        EmailPolicy::new(self.email_domain.as_deref().unwrap_or(DEFAULT_EMAIL_DOMAIN))
    }

    /// CORS origins; any origin when unset.
    ///
    /// # Errors
    /// Returns [`InvalidOrigin`] when an entry is not `scheme://host[:port]`.
    pub fn allowed_origins(&self) -> Result<AllowedOrigins, InvalidOrigin> {
        self.cors_origin
            .as_deref()
            .map_or(Ok(AllowedOrigins::Any), AllowedOrigins::parse)
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            PoolConfig::new(url).with_max_size(self.pool_size.unwrap_or(DEFAULT_POOL_SIZE))
        })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) email_policy: EmailPolicy,
    pub(crate) allowed_origins: AllowedOrigins,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, email_policy: EmailPolicy) -> Self {
        Self {
            bind_addr,
            email_policy,
            allowed_origins: AllowedOrigins::Any,
            db_pool: None,
        }
    }

    /// Restrict browser callers to the given origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: AllowedOrigins) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server stores accounts and orders in PostgreSQL
    /// instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
