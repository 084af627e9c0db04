use super::*;

#[test]
fn parses_flags_and_values() {
    let a = Annotation::parse("pk; auto ;column(user_id);size(64);null;unique;index").unwrap();

    assert!(a.primary_key);
    assert!(a.auto);
    assert!(a.null);
    assert!(a.unique);
    assert!(a.index);
    assert_eq!(a.column.as_deref(), Some("user_id"));
    assert_eq!(a.size, Some(64));
    assert_eq!(a.relation, None);
}

#[test]
fn empty_tag_is_default() {
    assert_eq!(Annotation::parse("").unwrap(), Annotation::default());
    assert_eq!(Annotation::parse(" ; ;").unwrap(), Annotation::default());
}

#[test]
fn dash_marks_transient() {
    assert!(Annotation::parse("-").unwrap().transient);
}

#[test]
fn parses_relation_kinds() {
    let cases = [
        ("rel(fk)", RelationKind::ForeignKey),
        ("rel(one)", RelationKind::OneToOne),
        ("rel(m2m)", RelationKind::ManyToMany),
        ("reverse(one)", RelationKind::ReverseOne),
        ("reverse(many)", RelationKind::ReverseMany),
    ];

    for (tag, kind) in cases {
        assert_eq!(Annotation::parse(tag).unwrap().relation, Some(kind), "{tag}");
    }
}

#[test]
fn parses_type_and_default() {
    let a = Annotation::parse("type(text);default(draft)").unwrap();

    assert!(a.text);
    assert_eq!(a.default.as_deref(), Some("draft"));
}

#[test]
fn rejects_unknown_key() {
    let err = Annotation::parse("pk;primary").unwrap_err();
    assert_eq!(err, AnnotationError::UnknownKey("primary".to_string()));
}

#[test]
fn rejects_malformed_entries() {
    for tag in ["column(user", "column)user(", "(x)", "column(a(b))", "pk)"] {
        let err = Annotation::parse(tag).unwrap_err();
        assert!(matches!(err, AnnotationError::Malformed(_)), "{tag}: {err}");
    }
}

#[test]
fn rejects_missing_and_unexpected_values() {
    assert!(matches!(
        Annotation::parse("column()").unwrap_err(),
        AnnotationError::MissingValue { .. }
    ));
    assert!(matches!(
        Annotation::parse("column").unwrap_err(),
        AnnotationError::MissingValue { .. }
    ));
    assert!(matches!(
        Annotation::parse("pk(yes)").unwrap_err(),
        AnnotationError::UnexpectedValue { .. }
    ));
}

#[test]
fn rejects_invalid_values() {
    for tag in ["size(big)", "rel(many)", "reverse(fk)", "type(blob)"] {
        let err = Annotation::parse(tag).unwrap_err();
        assert!(matches!(err, AnnotationError::InvalidValue { .. }), "{tag}");
    }
}

#[test]
fn rejects_duplicate_keys() {
    let err = Annotation::parse("pk;pk").unwrap_err();
    assert_eq!(
        err,
        AnnotationError::Duplicate {
            key: "pk".to_string()
        }
    );
}

#[test]
fn rejects_conflicting_relations() {
    let err = Annotation::parse("rel(fk);reverse(many)").unwrap_err();
    assert_eq!(
        err,
        AnnotationError::ConflictingRelation {
            first: RelationKind::ForeignKey,
            second: RelationKind::ReverseMany,
        }
    );
}

#[test]
fn merge_accumulates_flags_and_prefers_later_values() {
    let base = Annotation {
        primary_key: true,
        column: Some("old".to_string()),
        ..Default::default()
    };
    let tag = Annotation::parse("auto;column(new)").unwrap();

    let merged = base.merge(tag);
    assert!(merged.primary_key);
    assert!(merged.auto);
    assert_eq!(merged.column.as_deref(), Some("new"));
}
