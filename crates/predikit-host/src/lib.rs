//! Predikit Host
//!
//! Host-side predictor loading pipeline. Runs once, sequentially, during
//! process startup:
//!
//! 1. Load the plugin library named on the command line ([`loader`])
//! 2. Resolve its declaration entry point ([`loader`])
//! 3. Validate and provision the handles it requests ([`provision`])
//! 4. Construct the instance and derive its capability flags ([`component`])
//!
//! Any failure along the way is fatal to startup; a missing plugin path is
//! the one non-error outcome (no component configured).

pub mod component;
pub mod loader;
pub mod provision;

pub use component::{initialize_component, load_component, LoadedComponent};
pub use loader::{module_name, PredictorModule};
pub use provision::{parse_requested_handles, provision, ProvisionContext};
