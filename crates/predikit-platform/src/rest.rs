//! REST client for the serving platform

use crate::handles::{DeploymentHandle, ModelHandle};
use crate::platform::{Platform, ProjectApi, ProjectHandle};
use async_trait::async_trait;
use predikit_core::{Error, Result};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Environment variable naming the platform API base URL
pub const API_URL_VAR: &str = "PREDIKIT_API_URL";
/// Environment variable holding the platform API key
pub const API_KEY_VAR: &str = "PREDIKIT_API_KEY";

/// REST-backed platform client.
///
/// Connection settings are read from the environment at login time, so a
/// server running without a predictor, or with a predictor that requests no
/// handles, never needs them.
pub struct RestPlatform {
    http: reqwest::Client,
}

impl RestPlatform {
    /// Create a client for the platform API
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::platform(format!("failed to build http client: {}", e)))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Platform for RestPlatform {
    async fn login(&self) -> Result<ProjectHandle> {
        let base_url = env_var(API_URL_VAR)?;
        let api_key = env_var(API_KEY_VAR)?;

        tracing::info!("Logging in to serving platform at {}", base_url);

        let response = self
            .http
            .post(format!("{}/api/v1/login", base_url))
            .header("x-api-key", &api_key)
            .send()
            .await
            .map_err(|e| Error::platform(format!("login request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| Error::platform(format!("login rejected: {}", e)))?;

        let session: LoginResponse = response
            .json()
            .await
            .map_err(|e| Error::platform(format!("invalid login response: {}", e)))?;

        tracing::info!("Logged in to project '{}'", session.project_name);

        Ok(ProjectHandle::new(Arc::new(RestProject {
            http: self.http.clone(),
            base_url,
            api_key,
            project: session.project_name,
        })))
    }
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::config(format!("{} is not set", name)))
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    project_name: String,
}

/// Project session against the REST API
struct RestProject {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    project: String,
}

impl RestProject {
    async fn get_json<T>(&self, url: &str, what: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!("Fetching {} from {}", what, url);

        let response = self
            .http
            .get(url)
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| Error::platform(format!("{} request failed: {}", what, e)))?
            .error_for_status()
            .map_err(|e| Error::platform(format!("{} lookup failed: {}", what, e)))?;

        response
            .json()
            .await
            .map_err(|e| Error::platform(format!("invalid {} response: {}", what, e)))
    }
}

#[async_trait]
impl ProjectApi for RestProject {
    fn project_name(&self) -> &str {
        &self.project
    }

    async fn get_deployment(&self, name: &str) -> Result<DeploymentHandle> {
        let url = format!(
            "{}/api/v1/project/{}/serving/{}",
            self.base_url, self.project, name
        );
        self.get_json(&url, "deployment").await
    }

    async fn get_model(&self, name: &str, version: u32) -> Result<ModelHandle> {
        let url = format!(
            "{}/api/v1/project/{}/models/{}/{}",
            self.base_url, self.project, name, version
        );
        self.get_json(&url, "model").await
    }
}
