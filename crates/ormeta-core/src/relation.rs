//! Many-to-many join synthesis.
//!
//! A join model has no host type behind it: it is fabricated from two
//! already published models and cannot fail.

use crate::{
    JOIN_TABLE_SUFFIX, RELATION_COLUMN_SUFFIX,
    case::camel_case,
    model::{
        FieldDescriptor, FieldKind, Fields, ModelDescriptor, ModelId, ModelOrigin, Relation,
        RelationKind,
    },
};

/// Name of the join table between two tables.
#[must_use]
pub fn join_table_name(a: &str, b: &str) -> String {
    format!("{a}_{b}_{JOIN_TABLE_SUFFIX}")
}

/// Fabricate the join model between `a` and `b`, published under `id`.
///
/// Fields, in order: the synthetic `id` (big integer, auto, primary key),
/// then one foreign key per side. A self join prefixes its two foreign-key
/// columns with `from_` / `to_` to keep them distinct.
#[must_use]
pub fn synthesize_join(id: ModelId, a: &ModelDescriptor, b: &ModelDescriptor) -> ModelDescriptor {
    let table = join_table_name(&a.table, &b.table);
    let name = camel_case(&table);
    let full_name = format!("{}::{name}", a.module);

    let mut key = FieldDescriptor::new(id, &full_name, "id", "id", FieldKind::BigInteger);
    key.primary_key = true;
    key.auto = true;
    key.db_column = true;

    let (prefix_a, prefix_b) = if a.table == b.table {
        ("from_", "to_")
    } else {
        ("", "")
    };
    let fk_a = foreign_key(id, &full_name, 1, &format!("{prefix_a}{}", a.table), a);
    let fk_b = foreign_key(id, &full_name, 2, &format!("{prefix_b}{}", b.table), b);

    let key_column = key.column.clone();
    let mut fields = Fields::new();
    fields.add(key);
    fields.add(fk_a);
    fields.add(fk_b);
    fields.set_auto(&key_column);
    fields.add_primary_key(&key_column);

    ModelDescriptor {
        id,
        module: a.module.clone(),
        name,
        full_name,
        table,
        fields,
        origin: ModelOrigin::Synthetic,
    }
}

fn foreign_key(
    owner: ModelId,
    full_name: &str,
    index: usize,
    base: &str,
    target: &ModelDescriptor,
) -> FieldDescriptor {
    let mut field = FieldDescriptor::new(
        owner,
        full_name,
        camel_case(base),
        format!("{base}{RELATION_COLUMN_SUFFIX}"),
        FieldKind::ForeignKey,
    );
    field.db_column = true;
    field.index = index;
    field.relation = Some(Relation {
        kind: RelationKind::ForeignKey,
        model: target.id,
        table: target.table.clone(),
        through: None,
    });

    field
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(id: usize, table: &str) -> ModelDescriptor {
        ModelDescriptor {
            id: ModelId::new(id),
            module: "app::models".to_string(),
            name: camel_case(table),
            full_name: format!("app::models::{}", camel_case(table)),
            table: table.to_string(),
            fields: Fields::new(),
            origin: ModelOrigin::Synthetic,
        }
    }

    #[test]
    fn join_of_user_and_group() {
        let user = host(0, "user");
        let group = host(1, "group");

        let join = synthesize_join(ModelId::new(2), &user, &group);

        assert!(join.is_synthetic());
        assert!(join.instance().is_none());
        assert_eq!(join.table, "user_group_rel");
        assert_eq!(join.name, "UserGroupRel");
        assert_eq!(join.full_name, "app::models::UserGroupRel");

        let columns: Vec<_> = join.fields.iter().map(|f| f.column.as_str()).collect();
        assert_eq!(columns, ["id", "user_id", "group_id"]);

        let key = join.primary_key().unwrap();
        assert_eq!(key.column, "id");
        assert_eq!(key.kind, FieldKind::BigInteger);
        assert!(key.auto && key.db_column);
        assert_eq!(join.auto_field().map(|f| f.column.as_str()), Some("id"));

        let user_fk = join.field("User").unwrap();
        assert_eq!(user_fk.kind, FieldKind::ForeignKey);
        assert_eq!(user_fk.related_model(), Some(user.id));
        assert_eq!(user_fk.full_name, "app::models::UserGroupRel.User");

        let group_fk = join.fields.by_column("group_id").unwrap();
        assert_eq!(group_fk.related_model(), Some(group.id));
        assert_eq!(
            group_fk.relation.as_ref().map(|r| r.table.as_str()),
            Some("group")
        );
        assert!(join.fields.iter().all(|f| f.owner == join.id));
    }

    #[test]
    fn self_join_keeps_columns_distinct() {
        let user = host(0, "user");

        let join = synthesize_join(ModelId::new(1), &user, &user);

        let columns: Vec<_> = join.fields.columns().collect();
        assert_eq!(columns, ["id", "from_user_id", "to_user_id"]);
        assert_eq!(join.table, "user_user_rel");
        assert!(join.field("FromUser").is_some());
        assert!(join.field("ToUser").is_some());
    }
}
