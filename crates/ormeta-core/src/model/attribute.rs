use crate::{
    annotation::Annotation,
    model::{DeclaredType, RelationKind},
    traits::Model,
};

///
/// Attribute
///
/// One declared attribute of a host type: its name, declared type, and the
/// schema annotations attached to it. Either a structured [`Annotation`], a
/// raw `orm` tag string, or both (tag entries are merged on top).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    pub name: &'static str,
    pub ty: DeclaredType,
    pub annotation: Annotation,
    pub tag: Option<&'static str>,
    /// Field position in the host struct when it differs from the position
    /// in the attribute list (fields left out of the list shift the rest).
    pub position: Option<usize>,
}

impl Attribute {
    #[must_use]
    pub fn new(name: &'static str, ty: DeclaredType) -> Self {
        Self {
            name,
            ty,
            annotation: Annotation::default(),
            tag: None,
            position: None,
        }
    }

    /// Attribute of Rust type `T`, classified by type identity.
    #[must_use]
    pub fn of<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self::new(name, DeclaredType::of::<T>())
    }

    /// Relation attribute pointing at model `M`.
    #[must_use]
    pub fn relation<M: Model>(name: &'static str, kind: RelationKind) -> Self {
        Self::new(name, DeclaredType::model::<M>()).rel(kind)
    }

    //
    // annotation builders
    //

    #[must_use]
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    #[must_use]
    pub fn position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn pk(mut self) -> Self {
        self.annotation.primary_key = true;
        self
    }

    #[must_use]
    pub fn auto(mut self) -> Self {
        self.annotation.auto = true;
        self
    }

    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.annotation.column = Some(column.into());
        self
    }

    #[must_use]
    pub fn transient(mut self) -> Self {
        self.annotation.transient = true;
        self
    }

    #[must_use]
    pub fn null(mut self) -> Self {
        self.annotation.null = true;
        self
    }

    #[must_use]
    pub fn unique(mut self) -> Self {
        self.annotation.unique = true;
        self
    }

    #[must_use]
    pub fn index(mut self) -> Self {
        self.annotation.index = true;
        self
    }

    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.annotation.size = Some(size);
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.annotation.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn text(mut self) -> Self {
        self.annotation.text = true;
        self
    }

    #[must_use]
    pub fn rel(mut self, kind: RelationKind) -> Self {
        self.annotation.relation = Some(kind);
        self
    }

    #[must_use]
    pub const fn is_manager(&self) -> bool {
        self.ty.is_manager()
    }
}
