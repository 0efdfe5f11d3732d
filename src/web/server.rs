//! Web server for fileshare.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::db::Database;
use crate::file::FileStorage;
use crate::{Result, ShareError};

use super::handlers::AppState;
use super::router::create_router;

/// HTTP server for the file-sharing API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server from configuration and an open database.
    ///
    /// The storage root and its subtrees are created here.
    pub fn new(config: &Config, db: &Database) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| ShareError::Config(format!("invalid server address: {e}")))?;

        let storage = FileStorage::new(&config.storage.base_dir)?;
        tracing::info!("File storage initialized at: {}", config.storage.base_dir);

        let app_state = AppState::new(
            db,
            storage,
            config.links.code_length,
            config.storage.max_upload_size_mb,
        );

        Ok(Self::with_state(addr, Arc::new(app_state)))
    }

    /// Create a web server over prepared state.
    pub fn with_state(addr: SocketAddr, app_state: Arc<AppState>) -> Self {
        Self { addr, app_state }
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = create_router(self.app_state);

        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!("Web server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = create_router(self.app_state);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
