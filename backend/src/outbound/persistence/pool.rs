//! bb8 pool of `diesel-async` PostgreSQL connections shared by every
//! repository and the readiness probe.

use std::fmt;
use std::time::Duration;

use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::define_port_error;

const DEFAULT_MAX_SIZE: u32 = 10;
const DEFAULT_MIN_IDLE: u32 = 2;
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

define_port_error! {
    /// Pool construction and checkout failures.
    pub enum PoolError {
        Build { message } => "failed to build connection pool: {message}",
        Checkout { message } => "no database connection available: {message}",
    }
}

impl PoolError {
    /// Driver message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Build { message } | Self::Checkout { message } => message,
        }
    }
}

/// Pool sizing. Two connections stay idle unless the pool is smaller; a
/// checkout waits at most 30 seconds.
///
/// ```
/// use recruit_admin::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/recruit").with_max_size(1);
/// assert_eq!(config.max_size(), 1);
/// assert_eq!(config.min_idle(), 1);
/// ```
#[derive(Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Zero is raised to one.
    #[must_use]
    pub fn with_max_size(self, max_size: u32) -> Self {
        Self {
            max_size: max_size.max(1),
            ..self
        }
    }

    pub const fn max_size(&self) -> u32 {
        self.max_size
    }

    pub fn min_idle(&self) -> u32 {
        DEFAULT_MIN_IDLE.min(self.max_size)
    }
}

impl fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The URL may embed credentials.
        f.debug_struct("PoolConfig")
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool, opening the idle connections up front.
    ///
    /// # Errors
    ///
    /// [`PoolError::Build`] when the URL is unusable or the server refuses
    /// the initial connections.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let min_idle = config.min_idle();
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(min_idle))
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// [`PoolError::Checkout`] when none frees up before the timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }

    /// Run `SELECT 1` on a pooled connection.
    ///
    /// # Errors
    ///
    /// [`PoolError::Checkout`] when the database cannot be reached.
    pub async fn ping(&self) -> Result<(), PoolError> {
        let mut conn = self.get().await?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(drop)
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
