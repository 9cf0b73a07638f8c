//! Shared application state

use crate::config::ServerConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use predikit_core::{Error, Result};
use predikit_host::{load_component, LoadedComponent, ProvisionContext};
use predikit_platform::Platform;
use predikit_plugin::Capabilities;
use std::sync::Arc;
use tracing::info;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// The predictor component, when one was configured at startup
    component: Option<Arc<LoadedComponent>>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    pub(crate) fn new(
        config: ServerConfig,
        component: Option<LoadedComponent>,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            config: Arc::new(config),
            component: component.map(Arc::new),
            metrics_handle,
        }
    }

    /// One-shot startup initialization: load and initialize the predictor
    /// component, if one was configured. Runs exactly once, before the
    /// server starts accepting requests.
    pub async fn initialize(
        config: ServerConfig,
        platform: &dyn Platform,
        ctx: &ProvisionContext,
        metrics_handle: PrometheusHandle,
    ) -> Result<Self> {
        let component = load_component(config.predictor_file.as_deref(), platform, ctx).await?;

        match &component {
            Some(component) => info!("Predictor component '{}' ready", component.name()),
            None => info!("Running without a predictor component"),
        }

        Ok(Self::new(config, component, metrics_handle))
    }

    /// The component instance, for request handlers.
    ///
    /// Returns an explicit error when no component was configured at
    /// startup; handlers surface it as 503.
    pub fn component(&self) -> Result<&Arc<LoadedComponent>> {
        self.component.as_ref().ok_or(Error::ComponentUnavailable)
    }

    /// Capability flags of the component; all false when none is configured
    pub fn capabilities(&self) -> Capabilities {
        self.component
            .as_ref()
            .map(|component| component.capabilities())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use predikit_plugin::Predictor;

    fn test_config() -> ServerConfig {
        ServerConfig {
            model_name: "demo".into(),
            api_protocol: "v1".into(),
            predictor_file: None,
            listen: "127.0.0.1".into(),
            port: 0,
        }
    }

    fn test_metrics_handle() -> PrometheusHandle {
        PrometheusBuilder::new().build_recorder().handle()
    }

    struct Null;
    impl Predictor for Null {}

    #[test]
    fn accessor_errors_without_a_component() {
        let state = AppState::new(test_config(), None, test_metrics_handle());
        let err = state.component().unwrap_err();
        assert!(matches!(err, Error::ComponentUnavailable));
        assert_eq!(state.capabilities(), Capabilities::default());
    }

    #[test]
    fn accessor_returns_the_configured_component() {
        let component = LoadedComponent::from_instance("null", Box::new(Null));
        let state = AppState::new(test_config(), Some(component), test_metrics_handle());
        assert_eq!(state.component().unwrap().name(), "null");
    }
}
