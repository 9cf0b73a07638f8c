//! Handle validation and provisioning against the serving platform

use predikit_core::{Error, Result};
use predikit_platform::{HandleKind, Handles, Platform};

/// Environment variable naming the deployment to resolve
pub const DEPLOYMENT_NAME_VAR: &str = "DEPLOYMENT_NAME";
/// Environment variable naming the model to resolve
pub const MODEL_NAME_VAR: &str = "MODEL_NAME";
/// Environment variable holding the model version to resolve
pub const MODEL_VERSION_VAR: &str = "MODEL_VERSION";

/// Environment-derived names used to resolve deployment and model handles.
///
/// Each value is only required when the corresponding handle kind is actually
/// requested by the predictor.
#[derive(Debug, Clone, Default)]
pub struct ProvisionContext {
    pub deployment_name: Option<String>,
    pub model_name: Option<String>,
    pub model_version: Option<u32>,
}

impl ProvisionContext {
    /// Capture the handle-resolution variables from the process environment
    pub fn from_env() -> Result<Self> {
        let model_version = match std::env::var(MODEL_VERSION_VAR) {
            Ok(raw) => Some(raw.parse::<u32>().map_err(|_| {
                Error::config(format!(
                    "{} must be a version number, got '{}'",
                    MODEL_VERSION_VAR, raw
                ))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            deployment_name: std::env::var(DEPLOYMENT_NAME_VAR).ok(),
            model_name: std::env::var(MODEL_NAME_VAR).ok(),
            model_version,
        })
    }

    fn deployment_name(&self) -> Result<&str> {
        self.deployment_name
            .as_deref()
            .ok_or_else(|| Error::config(format!("{} is not set", DEPLOYMENT_NAME_VAR)))
    }

    fn model(&self) -> Result<(&str, u32)> {
        let name = self
            .model_name
            .as_deref()
            .ok_or_else(|| Error::config(format!("{} is not set", MODEL_NAME_VAR)))?;
        let version = self
            .model_version
            .ok_or_else(|| Error::config(format!("{} is not set", MODEL_VERSION_VAR)))?;
        Ok((name, version))
    }
}

/// Validate requested handle names against the closed set.
///
/// Any name outside {project, deployment, model} fails, naming the predictor
/// and the valid set. Duplicates collapse so each kind resolves once.
pub fn parse_requested_handles(module: &str, names: &[&str]) -> Result<Vec<HandleKind>> {
    let mut kinds = Vec::new();
    for name in names {
        let kind = HandleKind::parse(name).ok_or_else(|| {
            Error::provision(format!(
                "predictor '{}' requests unsupported handle '{}'. Valid handles are 'project', 'deployment' and 'model'.",
                module, name
            ))
        })?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

/// Log in to the serving platform and resolve the requested handles.
///
/// An empty request set returns an empty bundle without contacting the
/// platform at all. Otherwise a single login is performed and each requested
/// kind resolves through its registry; any platform failure propagates.
pub async fn provision(
    platform: &dyn Platform,
    ctx: &ProvisionContext,
    requested: &[HandleKind],
) -> Result<Handles> {
    if requested.is_empty() {
        return Ok(Handles::default());
    }

    let project = platform.login().await?;
    tracing::info!("Provisioning {} handle(s) from project '{}'", requested.len(), project.name());

    let mut handles = Handles::default();
    for kind in requested {
        match kind {
            HandleKind::Project => {
                handles.project = Some(project.clone());
            }
            HandleKind::Deployment => {
                let name = ctx.deployment_name()?;
                handles.deployment = Some(project.model_serving().get_deployment(name).await?);
            }
            HandleKind::Model => {
                let (name, version) = ctx.model()?;
                handles.model = Some(project.model_registry().get_model(name, version).await?);
            }
        }
    }

    Ok(handles)
}
