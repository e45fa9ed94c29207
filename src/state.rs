//! Shared application state and the reconfiguration path.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::core::config::{validate_settings, AppPaths, AppSettings, ConfigService};
use crate::core::errors::ApiError;
use crate::pipeline::{build_pipeline, QueryPipeline};

/// Global state shared across routes: configuration plus the live pipeline.
///
/// The pipeline sits behind an RwLock'd Arc. Handlers clone the Arc and drop
/// the lock before doing any work, so a settings change swaps what the next
/// request observes while in-flight requests finish on the old instances.
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub config: ConfigService,
    pipeline: RwLock<Arc<QueryPipeline>>,
}

impl AppState {
    pub async fn initialize() -> Result<Arc<Self>, ApiError> {
        Self::with_paths(Arc::new(AppPaths::new())).await
    }

    /// Initialization against explicit paths; tests point this at a temp dir.
    pub async fn with_paths(paths: Arc<AppPaths>) -> Result<Arc<Self>, ApiError> {
        let config = ConfigService::new(paths.clone());
        let settings = config.load();
        let pipeline = build_pipeline(&settings, &paths).await?;

        Ok(Arc::new(Self {
            paths,
            config,
            pipeline: RwLock::new(Arc::new(pipeline)),
        }))
    }

    /// The pipeline a new request should use.
    pub async fn pipeline(&self) -> Arc<QueryPipeline> {
        self.pipeline.read().await.clone()
    }

    /// Applies a settings update: resolve the redaction placeholder, validate,
    /// build the new pipeline, persist only once the build succeeded, then
    /// swap the live reference.
    pub async fn apply_settings(&self, incoming: AppSettings) -> Result<(), ApiError> {
        let settings = self.config.resolve_update(incoming);
        validate_settings(&settings)?;

        let pipeline = build_pipeline(&settings, &self.paths).await?;
        self.config.save(&settings)?;

        let mut live = self.pipeline.write().await;
        *live = Arc::new(pipeline);

        tracing::info!(
            backend = live.backend.name(),
            model = live.backend.model_name(),
            "settings applied"
        );

        Ok(())
    }
}
