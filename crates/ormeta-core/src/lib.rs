//! Model-metadata compiler for the ormeta mapping layer.
//!
//! A host type declares its attributes once through [`traits::Model`]; the
//! [`build`] pass turns that declaration into a validated, immutable
//! [`model::ModelDescriptor`], and the [`registry`] owns every published
//! descriptor (including synthesized many-to-many join models) for the
//! lifetime of the process.
//!
//! In general:
//! - host types declare *what exists*
//! - `model` holds *what gets read* by query builders and hydrators
#![warn(unreachable_pub)]

pub mod annotation;
pub mod build;
pub mod case;
pub mod config;
pub mod model;
pub mod registry;
pub mod relation;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_fixtures;

use crate::{
    annotation::AnnotationError, build::BuildError, config::ConfigError, registry::RegistryError,
};
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Default length for bounded text columns without an explicit `size(..)`.
pub const DEFAULT_CHAR_SIZE: u32 = 255;

/// Suffix appended to the derived column of foreign-key style relations.
pub const RELATION_COLUMN_SUFFIX: &str = "_id";

/// Suffix appended to synthesized many-to-many join tables.
pub const JOIN_TABLE_SUFFIX: &str = "rel";

///
/// Prelude
///
/// Domain vocabulary only; errors and the registry internals stay one
/// module level down.
///

pub mod prelude {
    pub use crate::{
        model::{
            Attribute, DeclaredType, FieldDescriptor, FieldKind, ModelDescriptor, ModelId,
            RelationKind,
        },
        registry::{Registry, Schema},
        traits::{Manager, Model},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    AnnotationError(#[from] AnnotationError),

    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error(transparent)]
    ConfigError(#[from] ConfigError),

    #[error(transparent)]
    RegistryError(#[from] RegistryError),
}
