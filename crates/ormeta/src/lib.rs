//! ## Crate layout
//! - `core`: descriptors, the model builder, join synthesis and the registry.
//! - `Model` (derive): implements the host-type contract from `#[orm(...)]`
//!   field annotations.
//!
//! The `prelude` module covers what host-type declarations and the startup
//! registration code need.

pub use ormeta_core as core;
pub use ormeta_derive::Model;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::Error;

///
/// Prelude
/// the derive and the trait share the `Model` name; both come in together
///

pub mod prelude {
    pub use crate::core::{
        config::{AutoFieldPolicy, RegistryConfig},
        prelude::*,
    };
    pub use ormeta_derive::Model;
}
