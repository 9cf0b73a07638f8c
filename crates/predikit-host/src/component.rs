//! Component initialization: construct the predictor and derive its capabilities

use crate::loader::PredictorModule;
use crate::provision::{parse_requested_handles, provision, ProvisionContext};
use libloading::Library;
use predikit_core::Result;
use predikit_platform::Platform;
use predikit_plugin::{Capabilities, Predictor, PredictorDeclaration};
use std::fmt;
use std::path::Path;

/// A fully initialized predictor component.
///
/// Created once at process startup and shared read-only across request
/// handlers for the life of the process.
pub struct LoadedComponent {
    name: String,
    capabilities: Capabilities,
    instance: Box<dyn Predictor>,
    // Declared after `instance` so the instance drops before its code unloads.
    _library: Option<Library>,
}

impl LoadedComponent {
    /// Wrap an in-process predictor instance (no dynamic library involved).
    ///
    /// Used for built-in predictors and tests; capability flags are derived
    /// the same way as for plugin-loaded instances.
    pub fn from_instance(name: impl Into<String>, instance: Box<dyn Predictor>) -> Self {
        let capabilities = Capabilities::probe(instance.as_ref());
        Self {
            name: name.into(),
            capabilities,
            instance,
            _library: None,
        }
    }

    /// Module identifier of the predictor
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Advisory capability flags derived at initialization
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The predictor instance
    pub fn instance(&self) -> &dyn Predictor {
        self.instance.as_ref()
    }
}

impl fmt::Debug for LoadedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedComponent")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

/// Construct a predictor from its declaration.
///
/// Validates the declaration's requested handles, provisions them against
/// the platform (a declaration requesting nothing never contacts it),
/// invokes the constructor, and probes the instance's capabilities.
pub async fn initialize_component(
    module: &str,
    declaration: &PredictorDeclaration,
    platform: &dyn Platform,
    ctx: &ProvisionContext,
) -> Result<LoadedComponent> {
    let requested = parse_requested_handles(module, declaration.requested_handles)?;
    let handles = provision(platform, ctx, &requested).await?;
    let instance = (declaration.construct)(handles)?;
    let capabilities = Capabilities::probe(instance.as_ref());

    tracing::info!(
        "Initialized predictor '{}' (chat_template={}, completion={}, chat_completion={})",
        module,
        capabilities.chat_template,
        capabilities.completion,
        capabilities.chat_completion
    );

    Ok(LoadedComponent {
        name: module.to_string(),
        capabilities,
        instance,
        _library: None,
    })
}

/// One-shot startup pipeline: load, resolve, provision, construct, probe.
///
/// `None` means no predictor was configured; nothing is loaded and the
/// platform is never contacted.
pub async fn load_component(
    file: Option<&Path>,
    platform: &dyn Platform,
    ctx: &ProvisionContext,
) -> Result<Option<LoadedComponent>> {
    let Some(path) = file else {
        tracing::info!("No predictor script configured");
        return Ok(None);
    };

    let module = PredictorModule::load(path)?;
    let declaration = module.declaration()?;

    let mut component = initialize_component(module.name(), &declaration, platform, ctx).await?;
    component._library = Some(module.into_library());

    Ok(Some(component))
}
