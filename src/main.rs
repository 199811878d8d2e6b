use focus_brain::{
    clock::SystemClock, load_data, router, tips::GeminiTips, AppState, Config,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::{fs, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    if config.gemini_api_key.is_none() {
        warn!("no Gemini API key configured; focus tips will use the fallback message");
    }
    let tips = GeminiTips::new(
        config.gemini_endpoint.clone(),
        config.gemini_model.clone(),
        config.gemini_api_key.clone(),
    );

    let data = load_data(&config.data_path).await;
    let state = AppState::new(
        config.data_path.clone(),
        data,
        Arc::new(SystemClock),
        Arc::new(tips),
        config.tip_timeout,
    );
    {
        let core = state.core.lock().await;
        state.persist(core.data()).await;
    }

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down");
}
