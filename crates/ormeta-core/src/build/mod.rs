//! Model descriptor builder.
//!
//! Walks the declared attributes of one host type, extracts a field
//! descriptor per attribute, and enforces the schema invariants before the
//! descriptor is handed back for publication. Nothing partial escapes: any
//! failure aborts the whole build.

mod extract;


use crate::{
    annotation::AnnotationError,
    case::snake_case,
    config::{AutoFieldPolicy, RegistryConfig},
    model::{
        FieldKind, Fields, Instance, ModelDescriptor, ModelId, ModelOrigin, RelationKind,
        ScalarType, TypeKey,
    },
    traits::Model,
};
use thiserror::Error as ThisError;
use tracing::{debug, warn};

///
/// BuildError
///
/// Schema inconsistencies detected while building one model. Field labels
/// are `<model full name>.<attribute>`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum BuildError {
    #[error("field {field}: auto fields must be integers, found {kind}")]
    AutoNotInteger { field: String, kind: FieldKind },

    #[error(
        "model {model}: when an auto field exists no other field may be the primary key \
         (auto '{auto}', primary key '{primary_key}')"
    )]
    ConflictingAutoAndPrimaryKey {
        model: String,
        auto: String,
        primary_key: String,
    },

    #[error("model {model}: duplicate column name '{column}'")]
    DuplicateColumn { model: String, column: String },

    #[error("model {model}: duplicate attribute '{field}'")]
    DuplicateField { model: String, field: String },

    #[error("field {field}: {source}")]
    InvalidAnnotation {
        field: String,
        source: AnnotationError,
    },

    #[error("field {field}: relation {kind} requires a model type, found {ty}")]
    InvalidRelation {
        field: String,
        kind: RelationKind,
        ty: ScalarType,
    },

    #[error("field {field}: key and auto fields must be stored columns")]
    KeyNotColumn { field: String },

    #[error("model {model}: no primary key field")]
    MissingPrimaryKey { model: String },

    #[error("model {model}: more than one auto field ('{first}' and '{second}')")]
    MultipleAutoFields {
        model: String,
        first: String,
        second: String,
    },

    #[error("model {model}: one model must have one primary key field only ('{first}' and '{second}')")]
    MultiplePrimaryKeys {
        model: String,
        first: String,
        second: String,
    },

    #[error("field {field}: related type {target} is not registered")]
    UnresolvedRelation { field: String, target: &'static str },

    #[error("field {field}: unsupported type {ty}")]
    UnsupportedType { field: String, ty: &'static str },
}

///
/// ModelLookup
///
/// Read access to already published models, keyed by host type identity.
///

pub trait ModelLookup {
    fn lookup(&self, ty: &TypeKey) -> Option<&ModelDescriptor>;
}

impl ModelLookup for [ModelDescriptor] {
    fn lookup(&self, ty: &TypeKey) -> Option<&ModelDescriptor> {
        self.iter().find(|m| m.type_key().as_ref() == Some(ty))
    }
}

///
/// ModelContext
/// Identity of the model under construction, shared with field extraction.
///

pub(crate) struct ModelContext<'a> {
    pub(crate) id: ModelId,
    pub(crate) ty: TypeKey,
    pub(crate) full_name: &'a str,
    pub(crate) table: &'a str,
}

///
/// ModelBuilder
///

pub struct ModelBuilder<'a, L: ModelLookup + ?Sized> {
    id: ModelId,
    lookup: &'a L,
    config: &'a RegistryConfig,
}

impl<'a, L: ModelLookup + ?Sized> ModelBuilder<'a, L> {
    /// `id` is the handle the descriptor will be published under.
    pub const fn new(id: ModelId, lookup: &'a L, config: &'a RegistryConfig) -> Self {
        Self { id, lookup, config }
    }

    /// Build the descriptor of host type `M` from one instance of it.
    pub fn build<M: Model>(&self, instance: M) -> Result<ModelDescriptor, BuildError> {
        let ty = TypeKey::of::<M>();
        let full_name = format!("{}::{}", M::MODULE, M::NAME);
        let table = M::TABLE.map_or_else(
            || self.config.derived_table(&snake_case(M::NAME)),
            str::to_string,
        );
        let ctx = ModelContext {
            id: self.id,
            ty,
            full_name: &full_name,
            table: &table,
        };

        let fields = self.collect_fields::<M>(&ctx)?;

        debug!(
            model = %full_name,
            table = %table,
            fields = fields.len(),
            "model built"
        );

        Ok(ModelDescriptor {
            id: self.id,
            module: M::MODULE.to_string(),
            name: M::NAME.to_string(),
            full_name,
            table,
            fields,
            origin: ModelOrigin::Host {
                ty,
                instance: Instance::new(instance),
            },
        })
    }

    // walk the declared attributes and enforce the key invariants
    fn collect_fields<M: Model>(&self, ctx: &ModelContext<'_>) -> Result<Fields, BuildError> {
        let mut fields = Fields::new();

        for (index, attr) in M::attributes().iter().enumerate() {
            if attr.is_manager() {
                debug!(model = %ctx.full_name, attribute = attr.name, "skipping manager");
                continue;
            }

            let field = extract::extract_field(ctx, attr, index, self.lookup)?;
            debug!(
                field = %field.full_name,
                column = %field.column,
                kind = %field.kind,
                "field extracted"
            );

            if fields.get(&field.name).is_some() {
                return Err(BuildError::DuplicateField {
                    model: ctx.full_name.to_string(),
                    field: field.name,
                });
            }

            let name = field.name.clone();
            let column = field.column.clone();
            let (primary_key, auto) = (field.primary_key, field.auto);

            if !fields.add(field) {
                return Err(BuildError::DuplicateColumn {
                    model: ctx.full_name.to_string(),
                    column,
                });
            }

            if primary_key {
                if let Some(existing) = fields.primary_key() {
                    return Err(BuildError::MultiplePrimaryKeys {
                        model: ctx.full_name.to_string(),
                        first: existing.name.clone(),
                        second: name,
                    });
                }
                fields.add_primary_key(&column);
            }

            if auto {
                if let Some(existing) = fields.auto() {
                    match self.config.auto_field_policy {
                        AutoFieldPolicy::Reject => {
                            return Err(BuildError::MultipleAutoFields {
                                model: ctx.full_name.to_string(),
                                first: existing.name.clone(),
                                second: name,
                            });
                        }
                        AutoFieldPolicy::LastWins => {
                            warn!(
                                model = %ctx.full_name,
                                replaced = %existing.name,
                                auto = %name,
                                "auto field declared twice, keeping the last one"
                            );
                        }
                    }
                }
                fields.set_auto(&column);
            }
        }

        Self::finish_keys(ctx, &mut fields)?;

        if self.config.require_primary_key && fields.primary_key().is_none() {
            return Err(BuildError::MissingPrimaryKey {
                model: ctx.full_name.to_string(),
            });
        }

        Ok(fields)
    }

    // an auto field must be the primary key; with no explicit key it becomes one
    fn finish_keys(ctx: &ModelContext<'_>, fields: &mut Fields) -> Result<(), BuildError> {
        let Some(auto) = fields.auto() else {
            return Ok(());
        };

        let group = fields.primary_key_group();
        let Some(primary_key) = group.first().and_then(|c| fields.by_column(c)) else {
            let column = auto.column.clone();
            fields.add_primary_key(&column);

            return Ok(());
        };

        if !group.exists(auto) {
            return Err(BuildError::ConflictingAutoAndPrimaryKey {
                model: ctx.full_name.to_string(),
                auto: auto.name.clone(),
                primary_key: primary_key.name.clone(),
            });
        }

        Ok(())
    }
}
