use crate::{
    DEFAULT_CHAR_SIZE, RELATION_COLUMN_SUFFIX,
    annotation::Annotation,
    build::{BuildError, ModelContext, ModelLookup},
    case::snake_case,
    model::{
        Attribute, DeclaredType, FieldDescriptor, FieldKind, Relation, RelationKind, TypeKey,
    },
    relation::join_table_name,
    traits::Manager,
};

/// Extract the descriptor of one attribute. Pure: neither the host type nor
/// the lookup is touched.
pub(crate) fn extract_field<L: ModelLookup + ?Sized>(
    ctx: &ModelContext<'_>,
    attr: &Attribute,
    index: usize,
    lookup: &L,
) -> Result<FieldDescriptor, BuildError> {
    let full_name = format!("{}.{}", ctx.full_name, attr.name);
    let annotation = decode_annotation(attr, &full_name)?;

    let (kind, relation) = match attr.ty {
        DeclaredType::Scalar(scalar) => {
            if let Some(kind) = annotation.relation {
                return Err(BuildError::InvalidRelation {
                    field: full_name,
                    kind,
                    ty: scalar,
                });
            }
            (FieldKind::from_scalar(scalar, annotation.text), None)
        }
        DeclaredType::Model(target) => {
            let kind = annotation.relation.unwrap_or(RelationKind::ForeignKey);
            let relation = resolve_relation(ctx, &full_name, target, kind, lookup)?;
            (FieldKind::from(kind), Some(relation))
        }
        DeclaredType::Unsupported(ty) => {
            return Err(BuildError::UnsupportedType {
                field: full_name,
                ty: ty.name(),
            });
        }
        DeclaredType::Manager => {
            return Err(BuildError::UnsupportedType {
                field: full_name,
                ty: std::any::type_name::<Manager>(),
            });
        }
    };

    if annotation.auto && !kind.is_integer() {
        return Err(BuildError::AutoNotInteger {
            field: full_name,
            kind,
        });
    }

    let column = annotation
        .column
        .clone()
        .unwrap_or_else(|| default_column(attr.name, kind));
    let db_column = !annotation.transient
        && relation
            .as_ref()
            .is_none_or(|r: &Relation| r.kind.stores_column());
    if (annotation.primary_key || annotation.auto) && !db_column {
        return Err(BuildError::KeyNotColumn { field: full_name });
    }
    let size = match kind {
        FieldKind::Char => Some(annotation.size.unwrap_or(DEFAULT_CHAR_SIZE)),
        _ => annotation.size,
    };

    Ok(FieldDescriptor {
        name: attr.name.to_string(),
        full_name,
        column,
        kind,
        index: attr.position.unwrap_or(index),
        owner: ctx.id,
        primary_key: annotation.primary_key,
        auto: annotation.auto,
        db_column,
        nullable: annotation.null,
        unique: annotation.unique,
        indexed: annotation.index,
        size,
        default: annotation.default,
        relation,
    })
}

// structured annotation with the raw tag (if any) merged on top
fn decode_annotation(attr: &Attribute, full_name: &str) -> Result<Annotation, BuildError> {
    let Some(tag) = attr.tag else {
        return Ok(attr.annotation.clone());
    };

    let parsed = Annotation::parse(tag).map_err(|source| BuildError::InvalidAnnotation {
        field: full_name.to_string(),
        source,
    })?;

    Ok(attr.annotation.clone().merge(parsed))
}

// resolve the relation target; a self reference points at the model being built
fn resolve_relation<L: ModelLookup + ?Sized>(
    ctx: &ModelContext<'_>,
    full_name: &str,
    target: TypeKey,
    kind: RelationKind,
    lookup: &L,
) -> Result<Relation, BuildError> {
    let (model, table) = if target == ctx.ty {
        (ctx.id, ctx.table.to_string())
    } else {
        let related = lookup
            .lookup(&target)
            .ok_or_else(|| BuildError::UnresolvedRelation {
                field: full_name.to_string(),
                target: target.name(),
            })?;
        (related.id, related.table.clone())
    };

    let through =
        (kind == RelationKind::ManyToMany).then(|| join_table_name(ctx.table, &table));

    Ok(Relation {
        kind,
        model,
        table,
        through,
    })
}

/// Column derived from the attribute name; stored relations get the `_id`
/// suffix.
pub(crate) fn default_column(name: &str, kind: FieldKind) -> String {
    let column = snake_case(name);

    match kind.relation_kind() {
        Some(rel) if rel.stores_column() => format!("{column}{RELATION_COLUMN_SUFFIX}"),
        _ => column,
    }
}
