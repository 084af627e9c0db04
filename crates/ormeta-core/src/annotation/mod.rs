//! Decoding of `orm` annotation tags.
//!
//! A tag is a `;`-separated list of entries, each either a bare key (`pk`)
//! or a key with one parenthesised value (`column(user_name)`):
//!
//! ```text
//! pk;auto;column(user_id)
//! size(100);null;unique
//! rel(fk)
//! reverse(many)
//! -
//! ```

#[cfg(test)]
mod tests;

use crate::model::RelationKind;
use thiserror::Error as ThisError;

///
/// AnnotationError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum AnnotationError {
    #[error("annotation '{key}' is declared more than once")]
    Duplicate { key: String },

    #[error("conflicting relation annotations {first} and {second}")]
    ConflictingRelation {
        first: RelationKind,
        second: RelationKind,
    },

    #[error("annotation '{key}' has invalid value '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("annotation entry '{0}' is malformed")]
    Malformed(String),

    #[error("annotation '{key}' requires a value")]
    MissingValue { key: String },

    #[error("annotation '{key}' takes no value")]
    UnexpectedValue { key: String },

    #[error("annotation '{0}' is not recognised")]
    UnknownKey(String),
}

///
/// Annotation
///
/// Decoded schema effects attached to one attribute.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Annotation {
    pub column: Option<String>,
    pub primary_key: bool,
    pub auto: bool,
    pub transient: bool,
    pub null: bool,
    pub unique: bool,
    pub index: bool,
    pub size: Option<u32>,
    pub default: Option<String>,
    pub text: bool,
    pub relation: Option<RelationKind>,
}

impl Annotation {
    /// Decode a raw tag string.
    pub fn parse(tag: &str) -> Result<Self, AnnotationError> {
        let mut out = Self::default();
        let mut seen: Vec<&str> = Vec::new();

        for entry in tag.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = split_entry(entry)?;

            if seen.contains(&key) {
                return Err(AnnotationError::Duplicate {
                    key: key.to_string(),
                });
            }
            seen.push(key);

            out.apply(key, value)?;
        }

        Ok(out)
    }

    /// Merge `other` on top of `self`; flags accumulate and `other` wins for
    /// valued entries.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            column: other.column.or(self.column),
            primary_key: self.primary_key || other.primary_key,
            auto: self.auto || other.auto,
            transient: self.transient || other.transient,
            null: self.null || other.null,
            unique: self.unique || other.unique,
            index: self.index || other.index,
            size: other.size.or(self.size),
            default: other.default.or(self.default),
            text: self.text || other.text,
            relation: other.relation.or(self.relation),
        }
    }

    // apply one decoded entry
    fn apply(&mut self, key: &str, value: Option<&str>) -> Result<(), AnnotationError> {
        match key {
            "pk" => self.primary_key = flag(key, value)?,
            "auto" => self.auto = flag(key, value)?,
            "-" => self.transient = flag(key, value)?,
            "null" => self.null = flag(key, value)?,
            "unique" => self.unique = flag(key, value)?,
            "index" => self.index = flag(key, value)?,
            "column" => self.column = Some(required(key, value)?.to_string()),
            "default" => self.default = Some(required(key, value)?.to_string()),
            "size" => {
                let raw = required(key, value)?;
                let size = raw.parse::<u32>().map_err(|_| invalid(key, raw))?;
                self.size = Some(size);
            }
            "type" => {
                self.text = match required(key, value)? {
                    "text" => true,
                    "char" => false,
                    other => return Err(invalid(key, other)),
                };
            }
            "rel" => {
                let kind = match required(key, value)? {
                    "fk" => RelationKind::ForeignKey,
                    "one" => RelationKind::OneToOne,
                    "m2m" => RelationKind::ManyToMany,
                    other => return Err(invalid(key, other)),
                };
                self.set_relation(kind)?;
            }
            "reverse" => {
                let kind = match required(key, value)? {
                    "one" => RelationKind::ReverseOne,
                    "many" => RelationKind::ReverseMany,
                    other => return Err(invalid(key, other)),
                };
                self.set_relation(kind)?;
            }
            _ => return Err(AnnotationError::UnknownKey(key.to_string())),
        }

        Ok(())
    }

    fn set_relation(&mut self, kind: RelationKind) -> Result<(), AnnotationError> {
        if let Some(first) = self.relation {
            return Err(AnnotationError::ConflictingRelation {
                first,
                second: kind,
            });
        }
        self.relation = Some(kind);

        Ok(())
    }
}

// split "key(value)" into its parts
fn split_entry(entry: &str) -> Result<(&str, Option<&str>), AnnotationError> {
    let Some(open) = entry.find('(') else {
        if entry.contains(')') {
            return Err(AnnotationError::Malformed(entry.to_string()));
        }
        return Ok((entry, None));
    };

    let Some(inner) = entry[open + 1..].strip_suffix(')') else {
        return Err(AnnotationError::Malformed(entry.to_string()));
    };
    let key = entry[..open].trim();
    if key.is_empty() || inner.contains(['(', ')']) {
        return Err(AnnotationError::Malformed(entry.to_string()));
    }

    Ok((key, Some(inner.trim())))
}

fn flag(key: &str, value: Option<&str>) -> Result<bool, AnnotationError> {
    match value {
        None => Ok(true),
        Some(_) => Err(AnnotationError::UnexpectedValue {
            key: key.to_string(),
        }),
    }
}

fn required<'a>(key: &str, value: Option<&'a str>) -> Result<&'a str, AnnotationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AnnotationError::MissingValue {
            key: key.to_string(),
        }),
    }
}

fn invalid(key: &str, value: &str) -> AnnotationError {
    AnnotationError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
