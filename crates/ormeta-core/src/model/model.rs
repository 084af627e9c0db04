use crate::{
    model::{FieldDescriptor, Fields, TypeKey},
    traits::Model,
};
use derive_more::Display;
use std::{any::Any, fmt};

///
/// ModelId
/// Arena handle of a published model inside its registry.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("model#{_0}")]
pub struct ModelId(usize);

impl ModelId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

///
/// Instance
///
/// Prototype of a host type kept by its descriptor. Hydrators take fresh
/// per-row working copies from it.
///

pub struct Instance {
    proto: Box<dyn Prototype>,
}

impl Instance {
    #[must_use]
    pub fn new<M: Model>(instance: M) -> Self {
        Self {
            proto: Box::new(instance),
        }
    }

    /// Typed working copy; `None` if `M` is not the prototype's type.
    #[must_use]
    pub fn fresh<M: Model>(&self) -> Option<M> {
        self.prototype::<M>().cloned()
    }

    /// Type-erased working copy.
    #[must_use]
    pub fn fresh_any(&self) -> Box<dyn Any + Send> {
        self.proto.fresh()
    }

    #[must_use]
    pub fn prototype<M: Model>(&self) -> Option<&M> {
        self.proto.as_any().downcast_ref::<M>()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.proto.type_name())
            .finish()
    }
}

// Prototype
// object-safe view over a cloneable host value
trait Prototype: Send + Sync {
    fn fresh(&self) -> Box<dyn Any + Send>;
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<M: Model> Prototype for M {
    fn fresh(&self) -> Box<dyn Any + Send> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<M>()
    }
}

///
/// ModelOrigin
///

#[derive(Debug)]
pub enum ModelOrigin {
    /// Built from a registered host type.
    Host { ty: TypeKey, instance: Instance },

    /// Fabricated join relation with no host type behind it.
    Synthetic,
}

///
/// ModelDescriptor
///
/// Complete, validated schema of one mapped type or synthesized join.
/// Immutable once published.
///

#[derive(Debug)]
pub struct ModelDescriptor {
    pub id: ModelId,
    /// Package qualifier of the host type.
    pub module: String,
    /// Short type name.
    pub name: String,
    /// `<module>::<name>`; registry key and diagnostics label.
    pub full_name: String,
    pub table: String,
    pub fields: Fields,
    pub origin: ModelOrigin,
}

impl ModelDescriptor {
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        matches!(self.origin, ModelOrigin::Synthetic)
    }

    /// Host type identity; `None` for synthetic models.
    #[must_use]
    pub const fn type_key(&self) -> Option<TypeKey> {
        match &self.origin {
            ModelOrigin::Host { ty, .. } => Some(*ty),
            ModelOrigin::Synthetic => None,
        }
    }

    #[must_use]
    pub const fn instance(&self) -> Option<&Instance> {
        match &self.origin {
            ModelOrigin::Host { instance, .. } => Some(instance),
            ModelOrigin::Synthetic => None,
        }
    }

    #[must_use]
    pub fn primary_key(&self) -> Option<&FieldDescriptor> {
        self.fields.primary_key()
    }

    #[must_use]
    pub fn auto_field(&self) -> Option<&FieldDescriptor> {
        self.fields.auto()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }
}

impl fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name, self.table)
    }
}
