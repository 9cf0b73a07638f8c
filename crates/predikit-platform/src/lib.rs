//! Predikit Platform
//!
//! Client for the model-serving platform that owns projects, deployments and
//! model versions. The host's provisioner resolves predictor-requested
//! handles through the traits defined here.
//!
//! This crate provides:
//! - The [`Platform`] login seam and project-scoped registry accessors
//! - Handle types and the closed [`HandleKind`] allow-list
//! - A REST implementation and an in-memory implementation

pub mod handles;
pub mod memory;
pub mod platform;
pub mod rest;

pub use handles::{DeploymentHandle, HandleKind, Handles, ModelHandle};
pub use memory::MemoryPlatform;
pub use platform::{ModelRegistry, ModelServing, Platform, ProjectApi, ProjectHandle};
pub use rest::RestPlatform;
