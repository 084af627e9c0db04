use crate::model::Attribute;

///
/// Model
///
/// Host-type contract: a record type that declares its attributes once so
/// the builder can derive a schema from it. Usually generated by
/// `#[derive(Model)]`.
///
/// ## Semantics
/// - `MODULE` is the package qualifier (normally `module_path!()`)
/// - `NAME` is the short type name
/// - `TABLE` overrides the derived table name when set
/// - `attributes()` lists attributes in declaration order
///

pub trait Model: Clone + Send + Sync + 'static {
    const MODULE: &'static str;
    const NAME: &'static str;
    const TABLE: Option<&'static str> = None;

    fn attributes() -> Vec<Attribute>;
}

///
/// Manager
///
/// Control handle a host type may embed. It carries no schema information
/// and is excluded from the field list by type identity.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Manager;
