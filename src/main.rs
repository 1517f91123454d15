//! Reranker HTTP server entrypoint.

use std::net::SocketAddr;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use rerank::config::Config;
use rerank::engine::CandleGenerator;
use rerank::gateway::{AppState, create_router_with_state};
use rerank::scoring::RelevanceScorer;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        model_dir = %config.model_dir.display(),
        bind_addr = %config.bind_addr,
        port = config.port,
        "Reranker starting"
    );

    let state = AppState::new();
    let scorer = load_scorer(config).await.inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load model");
    })?;
    state.install(scorer)?;

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Reranker shutdown complete");
    Ok(())
}

async fn load_scorer(config: Config) -> anyhow::Result<RelevanceScorer<CandleGenerator>> {
    config.validate()?;
    let engine_config = config.engine_config();

    let scorer = tokio::task::spawn_blocking(move || {
        let generator = CandleGenerator::load(engine_config)?;
        let scorer = RelevanceScorer::new(generator)?;
        Ok::<_, anyhow::Error>(scorer)
    })
    .await??;

    tracing::info!(
        yes_id = scorer.tokens().yes_id,
        no_id = scorer.tokens().no_id,
        "Model and tokenizer loaded successfully"
    );

    Ok(scorer)
}

async fn run_health_check() -> i32 {
    let url = format!("http://127.0.0.1:{}/health", Config::default().port);

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    {
        Ok(client) => client,
        Err(_) => return 1,
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
