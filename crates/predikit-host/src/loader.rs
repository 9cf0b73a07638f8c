//! Predictor plugin loading and entry-point resolution

use libloading::Library;
use predikit_core::{Error, Result};
use predikit_plugin::{
    PredictorDeclaration, ABI_VERSION, CONTRACT_VERSION, PREDICTOR_ENTRY, PREDICT_ENTRY,
};
use std::path::Path;

/// Derive the module identifier from a plugin path: the file's base name
/// stripped of directory and extension.
pub fn module_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A predictor plugin library loaded into the process.
///
/// Loading runs the library's initializers with full ambient privileges; no
/// sandboxing is provided.
#[derive(Debug)]
pub struct PredictorModule {
    name: String,
    library: Library,
}

impl PredictorModule {
    /// Load the plugin library at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::loader(format!(
                "predictor library does not exist: {}",
                path.display()
            )));
        }

        let name = module_name(path);
        tracing::info!("Loading predictor module '{}' from {}", name, path.display());

        let library = unsafe { Library::new(path) }.map_err(|e| {
            Error::loader(format!(
                "failed to load predictor library {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self { name, library })
    }

    /// Module identifier derived from the file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve the plugin's declaration.
    ///
    /// Looks for the `predict_declaration` symbol first, then the legacy
    /// `predictor_declaration`. No other symbols are considered.
    pub fn declaration(&self) -> Result<PredictorDeclaration> {
        let predict = unsafe {
            self.library
                .get::<*const PredictorDeclaration>(PREDICT_ENTRY)
                .ok()
        };
        let predictor = unsafe {
            self.library
                .get::<*const PredictorDeclaration>(PREDICTOR_ENTRY)
                .ok()
        };

        let symbol = select_entry(&self.name, predict, predictor)?;
        let declaration = unsafe { **symbol };

        if declaration.abi_version != ABI_VERSION
            || declaration.contract_version != CONTRACT_VERSION
        {
            return Err(Error::resolution(format!(
                "module '{}' was built against plugin contract {} (abi {}), host expects {} (abi {})",
                self.name,
                declaration.contract_version,
                declaration.abi_version,
                CONTRACT_VERSION,
                ABI_VERSION
            )));
        }

        Ok(declaration)
    }

    /// Give up the module, keeping only the loaded library alive
    pub fn into_library(self) -> Library {
        self.library
    }
}

/// Ordered two-step entry-point lookup: `predict` wins over the legacy
/// `predictor`; neither present is a resolution error.
fn select_entry<T>(module: &str, predict: Option<T>, predictor: Option<T>) -> Result<T> {
    predict.or(predictor).ok_or_else(|| {
        Error::resolution(format!(
            "module '{}' does not export a 'predict_declaration' or 'predictor_declaration' entry point",
            module
        ))
    })
}
