//! Handle kinds and resolved handle bundles

use crate::platform::ProjectHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of handles a predictor constructor may request.
///
/// This set is fixed for the lifetime of the process and acts as the
/// validation oracle for plugin declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// The project handle returned by login
    Project,
    /// A deployment from the project's serving registry
    Deployment,
    /// A model from the project's model registry
    Model,
}

impl HandleKind {
    /// All supported handle kinds
    pub const ALL: [HandleKind; 3] = [HandleKind::Project, HandleKind::Deployment, HandleKind::Model];

    /// The name a plugin declaration uses to request this handle
    pub fn as_str(&self) -> &'static str {
        match self {
            HandleKind::Project => "project",
            HandleKind::Deployment => "deployment",
            HandleKind::Model => "model",
        }
    }

    /// Parse a requested handle name; `None` for anything outside the set
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "project" => Some(HandleKind::Project),
            "deployment" => Some(HandleKind::Deployment),
            "model" => Some(HandleKind::Model),
            _ => None,
        }
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deployment registered in the project's serving registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentHandle {
    /// Deployment name
    pub name: String,

    /// Version of the model artifact the deployment serves
    #[serde(default)]
    pub artifact_version: Option<u32>,

    /// Current state reported by the serving registry
    #[serde(default)]
    pub state: Option<String>,

    /// Prediction endpoint URL
    #[serde(default)]
    pub url: Option<String>,
}

/// A model version registered in the project's model registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelHandle {
    /// Model name
    pub name: String,

    /// Model version
    pub version: u32,

    /// Path to the model artifacts
    #[serde(default)]
    pub model_path: Option<String>,
}

/// The handles resolved for a predictor constructor.
///
/// Contains exactly the subset the plugin declaration requested; unrequested
/// fields stay `None`.
#[derive(Debug, Clone, Default)]
pub struct Handles {
    pub project: Option<ProjectHandle>,
    pub deployment: Option<DeploymentHandle>,
    pub model: Option<ModelHandle>,
}

impl Handles {
    /// True when no handle was resolved
    pub fn is_empty(&self) -> bool {
        self.project.is_none() && self.deployment.is_none() && self.model.is_none()
    }

    /// True when the handle of the given kind was resolved
    pub fn contains(&self, kind: HandleKind) -> bool {
        match kind {
            HandleKind::Project => self.project.is_some(),
            HandleKind::Deployment => self.deployment.is_some(),
            HandleKind::Model => self.model.is_some(),
        }
    }
}
