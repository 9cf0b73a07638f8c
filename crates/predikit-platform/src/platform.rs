//! Serving-platform connection and project-scoped registries

use crate::handles::{DeploymentHandle, ModelHandle};
use async_trait::async_trait;
use predikit_core::Result;
use std::fmt;
use std::sync::Arc;

/// Pluggable serving-platform backend.
///
/// Implement this trait to connect the host to a concrete platform. The REST
/// client in this crate is the production implementation; tests use the
/// in-memory one.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Authenticate against the platform and return the project handle.
    async fn login(&self) -> Result<ProjectHandle>;
}

/// Project-scoped operations exposed by a platform backend.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Name of the project this session is scoped to.
    fn project_name(&self) -> &str;

    /// Look up a deployment by name in the project's serving registry.
    async fn get_deployment(&self, name: &str) -> Result<DeploymentHandle>;

    /// Look up a model by name and version in the project's model registry.
    async fn get_model(&self, name: &str, version: u32) -> Result<ModelHandle>;
}

/// Live handle to a platform project, obtained from [`Platform::login`].
#[derive(Clone)]
pub struct ProjectHandle {
    api: Arc<dyn ProjectApi>,
}

impl ProjectHandle {
    /// Wrap a backend project session
    pub fn new(api: Arc<dyn ProjectApi>) -> Self {
        Self { api }
    }

    /// Project name
    pub fn name(&self) -> &str {
        self.api.project_name()
    }

    /// The project's serving registry
    pub fn model_serving(&self) -> ModelServing {
        ModelServing {
            api: Arc::clone(&self.api),
        }
    }

    /// The project's model registry
    pub fn model_registry(&self) -> ModelRegistry {
        ModelRegistry {
            api: Arc::clone(&self.api),
        }
    }
}

impl fmt::Debug for ProjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectHandle")
            .field("project", &self.api.project_name())
            .finish()
    }
}

/// Serving registry scoped to a project
pub struct ModelServing {
    api: Arc<dyn ProjectApi>,
}

impl ModelServing {
    /// Fetch a deployment handle by name
    pub async fn get_deployment(&self, name: &str) -> Result<DeploymentHandle> {
        self.api.get_deployment(name).await
    }
}

/// Model registry scoped to a project
pub struct ModelRegistry {
    api: Arc<dyn ProjectApi>,
}

impl ModelRegistry {
    /// Fetch a model handle by name and version
    pub async fn get_model(&self, name: &str, version: u32) -> Result<ModelHandle> {
        self.api.get_model(name, version).await
    }
}
