//! Schema descriptors read by query builders, SQL generators and hydrators.
//!
//! Descriptors are produced by [`crate::build`] and [`crate::relation`] and
//! never mutated after they are published to a registry.

mod attribute;
mod field;
mod fields;
mod kind;
mod model;

pub use attribute::Attribute;
pub use field::{FieldDescriptor, Relation};
pub use fields::{FieldGroup, Fields};
pub use kind::{DeclaredType, FieldKind, RelationKind, ScalarType, TypeKey};
pub use model::{Instance, ModelDescriptor, ModelId, ModelOrigin};
