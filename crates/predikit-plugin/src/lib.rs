//! Predikit Plugin Contract
//!
//! The contract between the Predikit server and user-supplied predictor
//! plugins. A plugin implements [`Predictor`] (plus whichever capability
//! traits it supports), declares the platform handles its constructor needs,
//! and exports the declaration with [`declare_predictor!`].
//!
//! Both the host and every plugin must be built against the same release of
//! this crate; the host rejects declarations whose [`ABI_VERSION`] or
//! [`CONTRACT_VERSION`] differ from its own.

pub mod declaration;
pub mod predictor;

pub use declaration::{
    ConstructFn, PredictorDeclaration, ABI_VERSION, CONTRACT_VERSION, PREDICTOR_ENTRY,
    PREDICT_ENTRY,
};
pub use predictor::{Capabilities, ChatCompletion, ChatTemplating, Predictor, TextCompletion};

// Re-exported so plugin crates only need this dependency for the common case.
pub use predikit_platform::{DeploymentHandle, HandleKind, Handles, ModelHandle, ProjectHandle};
