use std::sync::Arc;

use tracing::info;

use crate::pipeline::Dashboard;

pub mod api;
pub mod page;
pub mod routes;

#[derive(Debug, Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(dashboard: Arc<Dashboard>) -> Self {
        Self { dashboard }
    }
}

/// Serves the dashboard until the process is stopped. Blocks the calling thread; the
/// dashboard (and its blocking HTTP client) must be built before calling.
pub fn run_server(dashboard: Arc<Dashboard>, bind_addr: &str) -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(bind_addr).await?;
        info!("genderscope server listening on http://{bind_addr}");
        axum::serve(listener, routes::router(AppState::new(dashboard))).await
    })
}
