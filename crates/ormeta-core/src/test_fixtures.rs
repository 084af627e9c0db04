//! Hand-written host types shared by unit tests.

use crate::{
    model::{Attribute, RelationKind},
    traits::{Manager, Model},
};

// host_model
// declares a unit host type with a fixed attribute list
macro_rules! host_model {
    ($ident:ident, $name:literal, [$($attr:expr),* $(,)?]) => {
        #[derive(Clone, Debug, Default)]
        pub(crate) struct $ident;

        impl $crate::traits::Model for $ident {
            const MODULE: &'static str = "app::fixtures";
            const NAME: &'static str = $name;

            fn attributes() -> Vec<$crate::model::Attribute> {
                vec![$($attr),*]
            }
        }
    };
}

pub(crate) use host_model;

///
/// Group
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Group {
    pub(crate) id: i64,
    pub(crate) name: String,
}

impl Model for Group {
    const MODULE: &'static str = "app::models";
    const NAME: &'static str = "Group";

    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::of::<i64>("id").auto(),
            Attribute::of::<String>("name").size(64).unique(),
        ]
    }
}

///
/// User
///

#[derive(Clone, Debug, Default)]
pub(crate) struct User {
    pub(crate) objects: Manager,
    pub(crate) id: i64,
    pub(crate) display_name: String,
    pub(crate) groups: Vec<Group>,
}

impl Model for User {
    const MODULE: &'static str = "app::models";
    const NAME: &'static str = "User";

    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::of::<Manager>("objects"),
            Attribute::of::<i64>("id").tag("pk;auto"),
            Attribute::of::<String>("displayName").null(),
            Attribute::relation::<Group>("groups", RelationKind::ManyToMany),
        ]
    }
}

///
/// Post
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Post {
    pub(crate) id: u64,
    pub(crate) author: User,
    pub(crate) title: String,
    pub(crate) body: String,
    pub(crate) score: f64,
}

impl Model for Post {
    const MODULE: &'static str = "app::models";
    const NAME: &'static str = "Post";
    const TABLE: Option<&'static str> = Some("blog_posts");

    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::of::<u64>("id").auto(),
            Attribute::relation::<User>("author", RelationKind::ForeignKey).index(),
            Attribute::of::<String>("title").tag("size(120)"),
            Attribute::of::<String>("body").text(),
            Attribute::of::<f64>("score").transient(),
        ]
    }
}

///
/// Category
/// Self-referencing tree.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Category {
    pub(crate) id: i32,
    pub(crate) parent: Option<Box<Self>>,
}

impl Model for Category {
    const MODULE: &'static str = "app::models";
    const NAME: &'static str = "Category";

    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::of::<i32>("id").auto(),
            Attribute::relation::<Self>("parent", RelationKind::ForeignKey).null(),
        ]
    }
}

///
/// Tag
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Tag {
    pub(crate) id: i64,
    pub(crate) label: String,
}

impl Model for Tag {
    const MODULE: &'static str = "app::models";
    const NAME: &'static str = "Tag";

    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::of::<i64>("id").pk(),
            Attribute::of::<String>("label"),
        ]
    }
}
