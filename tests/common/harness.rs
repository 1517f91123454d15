//! Test server harness.

use rerank::engine::MockGenerator;
use rerank::gateway::{AppState, create_router_with_state};
use rerank::scoring::RelevanceScorer;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub struct TestServerConfig {
    pub port: u16,
    /// Generator backing the scorer; `None` starts the server without a model.
    pub generator: Option<Arc<MockGenerator>>,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            generator: Some(Arc::new(MockGenerator::yes_no(-0.1, -3.0))),
        }
    }
}

impl TestServerConfig {
    pub fn with_generator(generator: MockGenerator) -> Self {
        Self {
            generator: Some(Arc::new(generator)),
            ..Default::default()
        }
    }

    pub fn without_model() -> Self {
        Self {
            generator: None,
            ..Default::default()
        }
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState<Arc<MockGenerator>>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a server backed by [`MockGenerator`] on a loopback port.
///
/// With [`TestServerConfig::without_model`] the scorer slot stays empty, which
/// is how the server looks before startup finishes loading the model.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let state: AppState<Arc<MockGenerator>> = AppState::new();
    if let Some(generator) = config.generator {
        let scorer = RelevanceScorer::new(generator)
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
        state
            .install(scorer)
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    }

    let app = create_router_with_state(state.clone());

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        state,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
