use std::env;

use anyhow::Context;
use tokio::net::TcpListener;

use docask_backend::core::logging;
use docask_backend::server;
use docask_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let state = AppState::initialize().await?;
    logging::init(&state.paths.log_dir);

    let settings = state.config.load();
    let index_path = settings
        .index_path
        .unwrap_or_else(|| state.paths.index_path.clone());
    tracing::info!(
        backend = %settings.llm_model_type,
        model = %settings.llm_model_name,
        index = %index_path.display(),
        "pipeline initialized"
    );

    let port = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(8000);
    let addr = format!("127.0.0.1:{}", port);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let app = server::router(state.clone());
    axum::serve(listener, app).await.context("Server stopped")?;

    Ok(())
}
