use std::sync::Arc;

use portfolio_core::clock::Clock;

use crate::auth::guard::SessionGuard;
use crate::config::ServerConfig;
use crate::notifications::telegram::TelegramClient;
use crate::store::{HttpProjectSource, KvProjectSource, ProjectSource, ProjectStore};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: portfolio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Time source shared by the guard and the store.
    pub clock: Arc<dyn Clock>,
    /// Admin login, lockout and session checks.
    pub guard: Arc<SessionGuard>,
    /// Portfolio projects and their backing source.
    pub store: Arc<ProjectStore>,
    /// Contact form delivery, when configured.
    pub telegram: Option<Arc<TelegramClient>>,
}

impl AppState {
    /// Wire the guard, the store (local or remote source), and the Telegram
    /// client from `config`.
    pub fn new(pool: portfolio_db::DbPool, config: ServerConfig, clock: Arc<dyn Clock>) -> Self {
        let source: Arc<dyn ProjectSource> = match &config.upstream {
            Some(upstream) => {
                tracing::info!(base_url = %upstream.base_url, "Using remote project source");
                Arc::new(HttpProjectSource::new(
                    upstream.base_url.clone(),
                    upstream.password.clone(),
                ))
            }
            None => Arc::new(KvProjectSource::new(pool.clone(), Arc::clone(&clock))),
        };

        let guard = SessionGuard::new(
            pool.clone(),
            Arc::clone(&clock),
            config.admin_password.clone(),
        );
        let store = ProjectStore::new(source, Arc::clone(&clock));
        let telegram = config
            .telegram
            .as_ref()
            .map(|t| Arc::new(TelegramClient::new(t)));

        Self {
            pool,
            config: Arc::new(config),
            clock,
            guard: Arc::new(guard),
            store: Arc::new(store),
            telegram,
        }
    }
}
