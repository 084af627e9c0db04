use ormeta::{
    core::{model::Attribute, registry::RegistryError},
    prelude::*,
};

///
/// Host types
///

#[derive(Clone, Debug, Default, Model)]
struct Group {
    #[orm(auto)]
    id: i64,
    #[orm(size = 64, unique)]
    name: String,
}

#[derive(Clone, Debug, Default, Model)]
struct User {
    objects: Manager,
    #[orm(pk, auto)]
    id: i64,
    display_name: Option<String>,
    #[orm(rel = "m2m")]
    groups: Vec<Group>,
}

#[derive(Clone, Debug, Default, Model)]
#[orm(table = "blog_posts")]
struct Post {
    #[orm(auto)]
    id: u64,
    #[orm(rel = "fk", index)]
    author: Option<Box<User>>,
    #[orm(tag = "size(120)")]
    title: String,
    #[orm(text)]
    body: String,
    #[orm(transient)]
    score: f64,
    #[orm(skip)]
    cache: Vec<u8>,
    published: Option<chrono::NaiveDate>,
}

#[derive(Clone, Debug, Default, Model)]
struct Category {
    #[orm(auto)]
    id: i32,
    #[orm(rel = "fk", column = "parent_category")]
    parent: Option<Box<Category>>,
    #[orm(reverse = "many")]
    children: Vec<Category>,
}

fn register_all(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(Group::default())?;
    registry.register(User::default())?;
    registry.register(Post::default())?;
    registry.register(Category::default())?;

    Ok(())
}

//
// derive output
//

#[test]
fn derive_matches_hand_written_declaration() {
    let expected = vec![
        Attribute::of::<u64>("id").position(0).auto(),
        Attribute::relation::<User>("author", RelationKind::ForeignKey)
            .position(1)
            .null()
            .index(),
        Attribute::of::<String>("title").position(2).tag("size(120)"),
        Attribute::of::<String>("body").position(3).text(),
        Attribute::of::<f64>("score").position(4).transient(),
        Attribute::of::<chrono::NaiveDate>("published")
            .position(6)
            .null(),
    ];

    assert_eq!(<Post as Model>::attributes(), expected);
    assert_eq!(<Post as Model>::NAME, "Post");
    assert_eq!(<Post as Model>::TABLE, Some("blog_posts"));
    assert_eq!(<Post as Model>::MODULE, module_path!());
}

#[test]
fn derive_keeps_manager_and_relation_targets() {
    let attributes = <User as Model>::attributes();

    assert!(attributes[0].is_manager());
    assert_eq!(
        attributes[3],
        Attribute::relation::<Group>("groups", RelationKind::ManyToMany).position(3)
    );
    assert_eq!(<User as Model>::TABLE, None);
}

//
// registration
//

#[test]
fn derived_models_register_and_freeze() {
    let mut registry = Registry::new();
    register_all(&mut registry).unwrap();
    let schema = registry.freeze();

    let user = schema.lookup::<User>().unwrap();
    assert_eq!(user.table, "user");
    assert_eq!(user.full_name, format!("{}::User", module_path!()));
    assert!(user.field("objects").is_none());
    assert!(user.field("display_name").is_some_and(|f| f.nullable));

    let group = schema.lookup::<Group>().unwrap();
    let join = schema.join_of(user.id, group.id).unwrap();
    assert_eq!(join.table, "user_group_rel");

    let post = schema.lookup::<Post>().unwrap();
    let columns: Vec<_> = post.fields.columns().collect();
    assert_eq!(columns, ["id", "author_id", "title", "body", "published"]);
    assert!(post.field("cache").is_none());

    let author = post.field("author").unwrap();
    assert!(author.nullable && author.indexed);
    assert_eq!(schema.related(author).map(|m| m.id), Some(user.id));
    assert_eq!(post.field("title").and_then(|f| f.size), Some(120));
    assert_eq!(
        post.field("published").map(|f| f.kind),
        Some(FieldKind::Date)
    );
}

#[test]
fn skipped_fields_keep_struct_positions() {
    let mut registry = Registry::new();
    register_all(&mut registry).unwrap();

    let post = registry.lookup::<Post>().unwrap();
    assert_eq!(post.field("score").map(|f| f.index), Some(4));
    assert_eq!(post.field("published").map(|f| f.index), Some(6));

    let user = registry.lookup::<User>().unwrap();
    assert_eq!(user.field("id").map(|f| f.index), Some(1));
}

#[test]
fn self_relations_and_reverse_fields() {
    let mut registry = Registry::new();
    register_all(&mut registry).unwrap();

    let category = registry.lookup::<Category>().unwrap();
    let parent = category.field("parent").unwrap();
    assert_eq!(parent.column, "parent_category");
    assert_eq!(parent.related_model(), Some(category.id));

    let children = category.field("children").unwrap();
    assert_eq!(children.kind, FieldKind::ReverseMany);
    assert!(!children.db_column);
}

#[test]
fn configuration_loads_from_toml() {
    let config = RegistryConfig::from_toml_str(
        r#"
        table_prefix = "app_"
        require_primary_key = true
        auto_field_policy = "last_wins"
        "#,
    )
    .unwrap();
    assert_eq!(config.auto_field_policy, AutoFieldPolicy::LastWins);

    let mut registry = Registry::with_config(config);
    register_all(&mut registry).unwrap();

    assert!(registry.by_table("app_group").is_some());
    assert!(registry.by_table("app_user_app_group_rel").is_some());
    assert!(registry.by_table("blog_posts").is_some());
}

#[test]
fn registration_errors_surface_through_the_crate_error() {
    let mut registry = Registry::new();

    let err: ormeta::Error = registry.register(Post::default()).unwrap_err().into();
    assert!(err.to_string().contains("is not registered"));
}
