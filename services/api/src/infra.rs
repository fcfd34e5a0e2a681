use churn_guard::config::AppConfig;
use churn_guard::error::AppError;
use churn_guard::prediction::LinearChurnModel;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Model path from the command line, falling back to `CHURN_MODEL_PATH`.
pub(crate) fn resolve_model_path(cli_override: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match cli_override {
        Some(path) => Ok(path),
        None => Ok(AppConfig::load()?.model.path),
    }
}

/// Loads the classifier once; the caller shares the returned handle read-only.
pub(crate) fn load_classifier(path: &Path) -> Result<Arc<LinearChurnModel>, AppError> {
    let model = LinearChurnModel::from_path(path)?;
    Ok(Arc::new(model))
}
