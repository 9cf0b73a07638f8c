//! Plugin declaration contract
//!
//! A predictor plugin exports a single well-known declaration symbol that the
//! host resolves after loading the library. The declaration carries the
//! contract versions, the handle names the constructor consumes, and the
//! constructor itself.

use crate::predictor::Predictor;
use predikit_platform::Handles;

/// ABI revision of the plugin contract. Bumped on breaking changes to
/// [`PredictorDeclaration`] or the traits it exposes.
pub const ABI_VERSION: u32 = 1;

/// Version of this crate, compiled into both host and plugin. A mismatch
/// means the two were built against different contract releases.
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Primary entry-point symbol looked up by the host
pub const PREDICT_ENTRY: &[u8] = b"predict_declaration";

/// Legacy entry-point symbol, checked second so older plugins keep working
pub const PREDICTOR_ENTRY: &[u8] = b"predictor_declaration";

/// Constructor signature for a predictor component
pub type ConstructFn = fn(Handles) -> predikit_core::Result<Box<dyn Predictor>>;

/// Declaration exported by a predictor plugin.
#[derive(Clone, Copy)]
pub struct PredictorDeclaration {
    /// Must equal the host's [`ABI_VERSION`]
    pub abi_version: u32,

    /// Must equal the host's [`CONTRACT_VERSION`]
    pub contract_version: &'static str,

    /// Handle names the constructor consumes. Validated by the host against
    /// the closed set {project, deployment, model}.
    pub requested_handles: &'static [&'static str],

    /// Builds the predictor from the resolved handles
    pub construct: ConstructFn,
}

/// Export a predictor declaration under the well-known entry-point symbol.
///
/// ```ignore
/// predikit_plugin::declare_predictor! {
///     requires: ["model"],
///     construct: MyPredictor::from_handles,
/// }
/// ```
///
/// The `legacy` form exports the `predictor_declaration` symbol instead, for
/// plugins that predate the current entry-point name.
#[macro_export]
macro_rules! declare_predictor {
    (requires: [$($handle:literal),* $(,)?], construct: $ctor:expr $(,)?) => {
        $crate::declare_predictor!(@emit predict_declaration, [$($handle),*], $ctor);
    };
    (legacy, requires: [$($handle:literal),* $(,)?], construct: $ctor:expr $(,)?) => {
        $crate::declare_predictor!(@emit predictor_declaration, [$($handle),*], $ctor);
    };
    (@emit $symbol:ident, [$($handle:literal),*], $ctor:expr) => {
        #[no_mangle]
        #[allow(non_upper_case_globals)]
        pub static $symbol: $crate::PredictorDeclaration = $crate::PredictorDeclaration {
            abi_version: $crate::ABI_VERSION,
            contract_version: $crate::CONTRACT_VERSION,
            requested_handles: &[$($handle),*],
            construct: $ctor,
        };
    };
}
