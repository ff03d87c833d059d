//! Podium HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use podium::config::Config;
use podium::gateway::{HandlerState, RateLimiter, create_router_with_state};
use podium::roster::Roster;
use podium::scoring::Evaluator;
use podium::storage::UploadStore;
use podium::submissions::SqliteStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
██████╗  ██████╗ ██████╗ ██╗██╗   ██╗███╗   ███╗
██╔══██╗██╔═══██╗██╔══██╗██║██║   ██║████╗ ████║
██████╔╝██║   ██║██║  ██║██║██║   ██║██╔████╔██║
██╔═══╝ ██║   ██║██║  ██║██║██║   ██║██║╚██╔╝██║
██║     ╚██████╔╝██████╔╝██║╚██████╔╝██║ ╚═╝ ██║
╚═╝      ╚═════╝ ╚═════╝ ╚═╝ ╚═════╝ ╚═╝     ╚═╝

        UPLOAD. SCORE. RANK.
                                        AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        task = %config.task_type,
        "Podium starting"
    );

    let store = Arc::new(SqliteStore::open(&config.database_path)?);

    // A missing reference file must not take the server down; submissions
    // get a clear "reference data unavailable" answer until it is fixed.
    let evaluator = Arc::new(Evaluator::load_or_degraded(&config.reference_path));

    let roster = Arc::new(Roster::from_csv_path(&config.roster_path)?);

    let uploads = UploadStore::new(config.upload_dir.clone());
    let limiter = RateLimiter::per_minute(config.rate_limit_per_minute);

    let state = HandlerState::new(
        evaluator,
        roster,
        store,
        uploads,
        config.task_type,
        limiter,
    );
    let app = create_router_with_state(state, config.max_upload_bytes);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Podium shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("PODIUM_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
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
