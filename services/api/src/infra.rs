use loan_eligibility::config::AppConfig;
use loan_eligibility::eligibility::{LinearPipeline, ModelLoadError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    /// Set when the model failed to load; assessments are refused until restart.
    pub(crate) model_error: Option<Arc<str>>,
}

/// Command-line override first, then `APP_MODEL_PATH`.
pub(crate) fn resolve_model_path(
    override_path: Option<PathBuf>,
) -> Result<PathBuf, loan_eligibility::config::ConfigError> {
    match override_path {
        Some(path) => Ok(path),
        None => Ok(AppConfig::load()?.model.path),
    }
}

pub(crate) fn load_pipeline(path: &Path) -> Result<Arc<LinearPipeline>, ModelLoadError> {
    match LinearPipeline::from_path(path) {
        Ok(pipeline) => {
            info!(path = %path.display(), threshold = pipeline.threshold, "model artifact loaded");
            Ok(Arc::new(pipeline))
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "model artifact unavailable");
            Err(err)
        }
    }
}
