//! In-memory platform backend for local development and tests

use crate::handles::{DeploymentHandle, ModelHandle};
use crate::platform::{Platform, ProjectApi, ProjectHandle};
use async_trait::async_trait;
use predikit_core::{Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Platform backend with canned projects, deployments and models.
///
/// Tracks how many logins were performed so callers can assert that a
/// predictor requesting no handles never touches the platform.
pub struct MemoryPlatform {
    project: String,
    deployments: HashMap<String, DeploymentHandle>,
    models: HashMap<(String, u32), ModelHandle>,
    logins: AtomicUsize,
}

impl MemoryPlatform {
    /// Create a backend scoped to the given project name
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            deployments: HashMap::new(),
            models: HashMap::new(),
            logins: AtomicUsize::new(0),
        }
    }

    /// Register a deployment in the serving registry
    pub fn with_deployment(mut self, deployment: DeploymentHandle) -> Self {
        self.deployments.insert(deployment.name.clone(), deployment);
        self
    }

    /// Register a model version in the model registry
    pub fn with_model(mut self, model: ModelHandle) -> Self {
        self.models.insert((model.name.clone(), model.version), model);
        self
    }

    /// Number of logins performed against this backend
    pub fn login_count(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Platform for MemoryPlatform {
    async fn login(&self) -> Result<ProjectHandle> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        Ok(ProjectHandle::new(Arc::new(MemoryProject {
            project: self.project.clone(),
            deployments: self.deployments.clone(),
            models: self.models.clone(),
        })))
    }
}

struct MemoryProject {
    project: String,
    deployments: HashMap<String, DeploymentHandle>,
    models: HashMap<(String, u32), ModelHandle>,
}

#[async_trait]
impl ProjectApi for MemoryProject {
    fn project_name(&self) -> &str {
        &self.project
    }

    async fn get_deployment(&self, name: &str) -> Result<DeploymentHandle> {
        self.deployments
            .get(name)
            .cloned()
            .ok_or_else(|| Error::platform(format!("deployment '{}' not found", name)))
    }

    async fn get_model(&self, name: &str, version: u32) -> Result<ModelHandle> {
        self.models
            .get(&(name.to_string(), version))
            .cloned()
            .ok_or_else(|| Error::platform(format!("model '{}' version {} not found", name, version)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, version: u32) -> ModelHandle {
        ModelHandle {
            name: name.into(),
            version,
            model_path: Some(format!("/models/{}/{}", name, version)),
        }
    }

    #[tokio::test]
    async fn login_returns_project_and_counts() {
        let platform = MemoryPlatform::new("demo");
        assert_eq!(platform.login_count(), 0);

        let project = platform.login().await.unwrap();
        assert_eq!(project.name(), "demo");
        assert_eq!(platform.login_count(), 1);
    }

    #[tokio::test]
    async fn model_registry_resolves_by_name_and_version() {
        let platform = MemoryPlatform::new("demo").with_model(model("fraud", 2));
        let project = platform.login().await.unwrap();

        let handle = project.model_registry().get_model("fraud", 2).await.unwrap();
        assert_eq!(handle.name, "fraud");
        assert_eq!(handle.version, 2);

        let missing = project.model_registry().get_model("fraud", 3).await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn serving_registry_resolves_deployments() {
        let deployment = DeploymentHandle {
            name: "fraud-live".into(),
            artifact_version: Some(2),
            state: Some("running".into()),
            url: None,
        };
        let platform = MemoryPlatform::new("demo").with_deployment(deployment);
        let project = platform.login().await.unwrap();

        let handle = project
            .model_serving()
            .get_deployment("fraud-live")
            .await
            .unwrap();
        assert_eq!(handle.artifact_version, Some(2));
    }
}
