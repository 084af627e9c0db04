use crate::model::{FieldKind, ModelId, RelationKind};

///
/// FieldDescriptor
/// Mapped metadata for one host attribute or synthetic relation column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDescriptor {
    /// Attribute identifier in the host type.
    pub name: String,
    /// `<model full name>.<name>`, used in diagnostics.
    pub full_name: String,
    /// Database column name.
    pub column: String,
    pub kind: FieldKind,
    /// Declaration position in the host type (manager attributes included).
    pub index: usize,
    /// Declaring model (non-owning handle).
    pub owner: ModelId,

    pub primary_key: bool,
    pub auto: bool,
    /// False for transient attributes, reverse relations and many-to-many
    /// fields.
    pub db_column: bool,
    pub nullable: bool,
    pub unique: bool,
    pub indexed: bool,
    pub size: Option<u32>,
    pub default: Option<String>,

    pub relation: Option<Relation>,
}

impl FieldDescriptor {
    /// A plain descriptor with every flag cleared.
    #[must_use]
    pub fn new(
        owner: ModelId,
        model_full_name: &str,
        name: impl Into<String>,
        column: impl Into<String>,
        kind: FieldKind,
    ) -> Self {
        let name = name.into();

        Self {
            full_name: format!("{model_full_name}.{name}"),
            name,
            column: column.into(),
            kind,
            index: 0,
            owner,
            primary_key: false,
            auto: false,
            db_column: false,
            nullable: false,
            unique: false,
            indexed: false,
            size: None,
            default: None,
            relation: None,
        }
    }

    #[must_use]
    pub const fn is_relation(&self) -> bool {
        self.relation.is_some()
    }

    #[must_use]
    pub fn relation_kind(&self) -> Option<RelationKind> {
        self.relation.as_ref().map(|r| r.kind)
    }

    /// Target model handle for relation fields.
    #[must_use]
    pub fn related_model(&self) -> Option<ModelId> {
        self.relation.as_ref().map(|r| r.model)
    }
}

///
/// Relation
/// Relation wiring of a field; `model` is a lookup handle, not ownership.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Relation {
    pub kind: RelationKind,
    pub model: ModelId,
    /// Table of the related model.
    pub table: String,
    /// Join table for many-to-many fields.
    pub through: Option<String>,
}
