use crate::traits::{Manager, Model};
use derive_more::Display;
use std::{
    any::{TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
    time::SystemTime,
};

///
/// TypeKey
///
/// Identity of a Rust type. Equality and hashing only consider the `TypeId`;
/// the name is carried for diagnostics.
///

#[derive(Clone, Copy, Debug)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

///
/// ScalarType
///
/// Rust storage types an attribute may be declared with.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum ScalarType {
    Bool,
    Date,
    DateTime,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Nat8,
    Nat16,
    Nat32,
    Nat64,
    Text,
}

// scalar_types
// maps each supported Rust type onto its ScalarType by TypeId
macro_rules! scalar_types {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        impl ScalarType {
            /// Resolve the scalar type of `T`, if `T` is a supported storage type.
            #[must_use]
            pub fn of<T: ?Sized + 'static>() -> Option<Self> {
                let id = TypeId::of::<T>();
                $(
                    if id == TypeId::of::<$ty>() {
                        return Some(Self::$variant);
                    }
                )*

                None
            }
        }
    };
}

scalar_types! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    isize => Int64,
    u8 => Nat8,
    u16 => Nat16,
    u32 => Nat32,
    u64 => Nat64,
    usize => Nat64,
    f32 => Float32,
    f64 => Float64,
    String => Text,
    Box<str> => Text,
    chrono::NaiveDate => Date,
    chrono::NaiveDateTime => DateTime,
    chrono::DateTime<chrono::Utc> => DateTime,
    SystemTime => DateTime,
}

///
/// RelationKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum RelationKind {
    ForeignKey,
    OneToOne,
    ManyToMany,
    ReverseOne,
    ReverseMany,
}

impl RelationKind {
    /// Inverse-side relations are resolved from the other model's column.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::ReverseOne | Self::ReverseMany)
    }

    /// Whether the relation is stored as a column on the declaring table.
    #[must_use]
    pub const fn stores_column(self) -> bool {
        matches!(self, Self::ForeignKey | Self::OneToOne)
    }
}

///
/// FieldKind
///
/// Semantic storage type of a mapped field.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum FieldKind {
    // scalars
    Boolean,
    Char,
    Text,
    Date,
    DateTime,
    SmallInteger,
    Integer,
    BigInteger,
    PositiveSmallInteger,
    PositiveInteger,
    PositiveBigInteger,
    Float,

    // relations
    ForeignKey,
    OneToOne,
    ManyToMany,
    ReverseOne,
    ReverseMany,
}

impl FieldKind {
    /// Map a declared scalar onto its storage kind; `long_text` selects
    /// unbounded text over the bounded default.
    #[must_use]
    pub const fn from_scalar(scalar: ScalarType, long_text: bool) -> Self {
        match scalar {
            ScalarType::Bool => Self::Boolean,
            ScalarType::Date => Self::Date,
            ScalarType::DateTime => Self::DateTime,
            ScalarType::Float32 | ScalarType::Float64 => Self::Float,
            ScalarType::Int8 | ScalarType::Int16 => Self::SmallInteger,
            ScalarType::Int32 => Self::Integer,
            ScalarType::Int64 => Self::BigInteger,
            ScalarType::Nat8 | ScalarType::Nat16 => Self::PositiveSmallInteger,
            ScalarType::Nat32 => Self::PositiveInteger,
            ScalarType::Nat64 => Self::PositiveBigInteger,
            ScalarType::Text if long_text => Self::Text,
            ScalarType::Text => Self::Char,
        }
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::SmallInteger
                | Self::Integer
                | Self::BigInteger
                | Self::PositiveSmallInteger
                | Self::PositiveInteger
                | Self::PositiveBigInteger
        )
    }

    #[must_use]
    pub const fn is_relation(self) -> bool {
        self.relation_kind().is_some()
    }

    #[must_use]
    pub const fn relation_kind(self) -> Option<RelationKind> {
        match self {
            Self::ForeignKey => Some(RelationKind::ForeignKey),
            Self::OneToOne => Some(RelationKind::OneToOne),
            Self::ManyToMany => Some(RelationKind::ManyToMany),
            Self::ReverseOne => Some(RelationKind::ReverseOne),
            Self::ReverseMany => Some(RelationKind::ReverseMany),
            _ => None,
        }
    }
}

impl From<RelationKind> for FieldKind {
    fn from(kind: RelationKind) -> Self {
        match kind {
            RelationKind::ForeignKey => Self::ForeignKey,
            RelationKind::OneToOne => Self::OneToOne,
            RelationKind::ManyToMany => Self::ManyToMany,
            RelationKind::ReverseOne => Self::ReverseOne,
            RelationKind::ReverseMany => Self::ReverseMany,
        }
    }
}

///
/// DeclaredType
///
/// The declared type of one host attribute, as seen by the builder.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeclaredType {
    Scalar(ScalarType),

    /// Another mapped host type (relation target).
    Model(TypeKey),

    /// The embedded `Manager` control handle; carries no schema.
    Manager,

    Unsupported(TypeKey),
}

impl DeclaredType {
    /// Classify `T` by type identity.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        if TypeId::of::<T>() == TypeId::of::<Manager>() {
            return Self::Manager;
        }

        ScalarType::of::<T>().map_or_else(|| Self::Unsupported(TypeKey::of::<T>()), Self::Scalar)
    }

    /// Declare a relation target.
    #[must_use]
    pub fn model<M: Model>() -> Self {
        Self::Model(TypeKey::of::<M>())
    }

    #[must_use]
    pub const fn is_manager(&self) -> bool {
        matches!(self, Self::Manager)
    }
}
