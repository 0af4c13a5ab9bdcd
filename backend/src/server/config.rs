//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use crate::inbound::http::session_config::SessionSettings;
use crate::outbound::memory::MemoryStore;
use crate::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) memory_store: MemoryStore,
    pub(crate) swagger_ui: bool,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            memory_store: MemoryStore::new(),
            swagger_ui: cfg!(debug_assertions),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server runs on the in-memory adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Serve the in-memory adapters from `store`, typically one that
    /// startup seeding has already filled. Ignored when a pool is attached.
    #[must_use]
    pub fn with_memory_store(mut self, store: MemoryStore) -> Self {
        self.memory_store = store;
        self
    }

    /// Serve Swagger UI at `/docs`.
    #[must_use]
    pub fn with_swagger_ui(mut self, enabled: bool) -> Self {
        self.swagger_ui = enabled;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether persistence adapters are backed by PostgreSQL.
    #[must_use]
    pub fn has_database(&self) -> bool {
        self.db_pool.is_some()
    }
}
