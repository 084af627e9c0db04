//! Process-wide model registry.
//!
//! Models are registered one by one during startup; a model may only relate
//! to models registered before it (or to itself). Every many-to-many field
//! pulls its join model into the registry as a side effect. Once startup is
//! over the registry is frozen into a [`Schema`], which is read-only and can
//! be shared across threads.


use crate::{
    build::{BuildError, ModelBuilder, ModelLookup},
    config::RegistryConfig,
    model::{FieldDescriptor, ModelDescriptor, ModelId, RelationKind, TypeKey},
    relation::{join_table_name, synthesize_join},
    traits::Model,
};
use derive_more::Deref;
use std::{collections::HashMap, sync::Arc};
use thiserror::Error as ThisError;
use tracing::{debug, info};

///
/// RegistryError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum RegistryError {
    #[error("type {ty} is already registered as {model}")]
    AlreadyRegistered { ty: &'static str, model: String },

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("table '{table}' of {model} is already used by {existing}")]
    DuplicateTable {
        table: String,
        model: String,
        existing: String,
    },

    #[error("type {ty} is not registered")]
    NotRegistered { ty: &'static str },

    #[error("no model published under {id}")]
    UnknownModel { id: ModelId },
}

///
/// Catalog
///
/// Arena of published descriptors plus the indexes over it. Handles are
/// positions in the arena and stay valid for the catalog's lifetime.
///

#[derive(Debug, Default)]
pub struct Catalog {
    models: Vec<ModelDescriptor>,
    by_type: HashMap<TypeKey, ModelId>,
    by_table: HashMap<String, ModelId>,
    by_full_name: HashMap<String, ModelId>,
    joins: HashMap<(ModelId, ModelId), ModelId>,
}

impl Catalog {
    #[must_use]
    pub fn get(&self, id: ModelId) -> Option<&ModelDescriptor> {
        self.models.get(id.index())
    }

    /// Like [`Self::get`], for callers holding a handle they expect to be live.
    pub fn model(&self, id: ModelId) -> Result<&ModelDescriptor, RegistryError> {
        self.get(id).ok_or(RegistryError::UnknownModel { id })
    }

    #[must_use]
    pub fn by_type(&self, ty: &TypeKey) -> Option<&ModelDescriptor> {
        self.by_type.get(ty).and_then(|&id| self.get(id))
    }

    /// Descriptor of host type `M`.
    #[must_use]
    pub fn lookup<M: Model>(&self) -> Option<&ModelDescriptor> {
        self.by_type(&TypeKey::of::<M>())
    }

    #[must_use]
    pub fn by_full_name(&self, full_name: &str) -> Option<&ModelDescriptor> {
        self.by_full_name.get(full_name).and_then(|&id| self.get(id))
    }

    #[must_use]
    pub fn by_table(&self, table: &str) -> Option<&ModelDescriptor> {
        self.by_table.get(table).and_then(|&id| self.get(id))
    }

    /// Join model synthesized for the `owner` -> `target` many-to-many pair.
    #[must_use]
    pub fn join_of(&self, owner: ModelId, target: ModelId) -> Option<&ModelDescriptor> {
        self.joins.get(&(owner, target)).and_then(|&id| self.get(id))
    }

    /// Model on the other side of a relation field.
    #[must_use]
    pub fn related(&self, field: &FieldDescriptor) -> Option<&ModelDescriptor> {
        field.related_model().and_then(|id| self.get(id))
    }

    /// Models in publication order.
    pub fn iter(&self) -> std::slice::Iter<'_, ModelDescriptor> {
        self.models.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    //
    // publication
    //

    const fn next_id(&self) -> ModelId {
        ModelId::new(self.models.len())
    }

    fn table_owner(&self, table: &str) -> Option<&str> {
        self.by_table(table).map(|m| m.full_name.as_str())
    }

    fn check_table(&self, table: &str, model: &str) -> Result<(), RegistryError> {
        match self.table_owner(table) {
            Some(existing) => Err(RegistryError::DuplicateTable {
                table: table.to_string(),
                model: model.to_string(),
                existing: existing.to_string(),
            }),
            None => Ok(()),
        }
    }

    // caller has checked the table; the descriptor id must be next_id
    fn insert(&mut self, model: ModelDescriptor) -> ModelId {
        let id = model.id;
        debug_assert_eq!(id, self.next_id());

        if let Some(ty) = model.type_key() {
            self.by_type.insert(ty, id);
        }
        self.by_table.insert(model.table.clone(), id);
        self.by_full_name.insert(model.full_name.clone(), id);

        info!(
            model = %model.full_name,
            table = %model.table,
            id = %id,
            synthetic = model.is_synthetic(),
            "model published"
        );
        self.models.push(model);

        id
    }

    // publish the join for owner -> target unless it already exists
    fn ensure_join(&mut self, owner: ModelId, target: ModelId) -> Result<ModelId, RegistryError> {
        if let Some(&existing) = self.joins.get(&(owner, target)) {
            debug!(owner = %owner, target = %target, "join already published");
            return Ok(existing);
        }

        let a = self.model(owner)?;
        let b = self.model(target)?;
        let join = synthesize_join(self.next_id(), a, b);
        self.check_table(&join.table, &join.full_name)?;

        let id = self.insert(join);
        self.joins.insert((owner, target), id);

        Ok(id)
    }
}

impl ModelLookup for Catalog {
    fn lookup(&self, ty: &TypeKey) -> Option<&ModelDescriptor> {
        self.by_type(ty)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ModelDescriptor;
    type IntoIter = std::slice::Iter<'a, ModelDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}

///
/// Registry
///
/// Mutable registration phase. Reads go through the [`Catalog`] it derefs
/// to.
///

#[derive(Debug, Default, Deref)]
pub struct Registry {
    #[deref]
    catalog: Catalog,
    config: RegistryConfig,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            catalog: Catalog::default(),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Build and publish the descriptor of host type `M`, followed by the
    /// join models of its many-to-many fields. On error nothing is
    /// published.
    pub fn register<M: Model>(&mut self, instance: M) -> Result<ModelId, RegistryError> {
        let ty = TypeKey::of::<M>();
        if let Some(existing) = self.catalog.by_type(&ty) {
            return Err(RegistryError::AlreadyRegistered {
                ty: ty.name(),
                model: existing.full_name.clone(),
            });
        }

        let id = self.catalog.next_id();
        let model = ModelBuilder::new(id, &self.catalog, &self.config).build(instance)?;
        self.catalog.check_table(&model.table, &model.full_name)?;

        let targets = self.join_targets(&model)?;

        let id = self.catalog.insert(model);
        for target in targets {
            self.catalog.ensure_join(id, target)?;
        }

        Ok(id)
    }

    /// Publish the join model between two registered host types without a
    /// many-to-many field declaring it. Idempotent.
    pub fn register_many_to_many<A: Model, B: Model>(&mut self) -> Result<ModelId, RegistryError> {
        let a = self.registered::<A>()?;
        let b = self.registered::<B>()?;

        self.catalog.ensure_join(a, b)
    }

    /// End the registration phase.
    #[must_use]
    pub fn freeze(self) -> Schema {
        info!(models = self.catalog.len(), "registry frozen");

        Schema {
            catalog: Arc::new(self.catalog),
            config: self.config,
        }
    }

    fn registered<M: Model>(&self) -> Result<ModelId, RegistryError> {
        self.catalog
            .lookup::<M>()
            .map(|m| m.id)
            .ok_or(RegistryError::NotRegistered {
                ty: std::any::type_name::<M>(),
            })
    }

    // distinct many-to-many targets of a freshly built model, with their
    // join tables checked up front so publication cannot fail halfway
    fn join_targets(&self, model: &ModelDescriptor) -> Result<Vec<ModelId>, RegistryError> {
        let mut targets = Vec::new();

        for field in model.fields.relations() {
            let Some(relation) = field.relation.as_ref() else {
                continue;
            };
            if relation.kind != RelationKind::ManyToMany || targets.contains(&relation.model) {
                continue;
            }

            let table = join_table_name(&model.table, &relation.table);
            self.catalog.check_table(&table, &model.full_name)?;

            targets.push(relation.model);
        }

        Ok(targets)
    }
}

///
/// Schema
///
/// Frozen registry. Cheap to clone and safe to share between threads.
///

#[derive(Clone, Debug, Deref)]
pub struct Schema {
    #[deref(forward)]
    catalog: Arc<Catalog>,
    config: RegistryConfig,
}

impl Schema {
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }
}
