use crate::model::FieldDescriptor;
use std::{collections::HashMap, slice::Iter};

///
/// FieldGroup
///
/// Ordered set of field columns sharing a role (the primary key).
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldGroup {
    columns: Vec<String>,
}

impl FieldGroup {
    /// Insert a field; `false` if it is already a member.
    pub fn add(&mut self, field: &FieldDescriptor) -> bool {
        if self.exists(field) {
            return false;
        }
        self.columns.push(field.column.clone());

        true
    }

    #[must_use]
    pub fn exists(&self, field: &FieldDescriptor) -> bool {
        self.columns.iter().any(|c| *c == field.column)
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.columns.first().map(String::as_str)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

///
/// Fields
///
/// Ordered, column-unique field collection of one model, with the auto and
/// primary-key slots. Fields are never removed.
///

#[derive(Clone, Debug, Default)]
pub struct Fields {
    fields: Vec<FieldDescriptor>,
    columns: HashMap<String, usize>,
    names: HashMap<String, usize>,
    auto: Option<usize>,
    primary_key: FieldGroup,
}

impl Fields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; `false` if its column is already taken.
    pub fn add(&mut self, field: FieldDescriptor) -> bool {
        if self.columns.contains_key(&field.column) {
            return false;
        }

        let pos = self.fields.len();
        self.columns.insert(field.column.clone(), pos);
        self.names.entry(field.name.clone()).or_insert(pos);
        self.fields.push(field);

        true
    }

    /// Membership by column.
    #[must_use]
    pub fn exists(&self, field: &FieldDescriptor) -> bool {
        self.columns.contains_key(&field.column)
    }

    /// Point the auto slot at an already added column. A replaced auto field
    /// loses its auto flag.
    pub(crate) fn set_auto(&mut self, column: &str) -> bool {
        let Some(&pos) = self.columns.get(column) else {
            return false;
        };
        if let Some(prev) = self.auto.replace(pos) {
            self.fields[prev].auto = prev == pos;
        }
        self.fields[pos].auto = true;

        true
    }

    /// Designate an already added column as primary key.
    pub(crate) fn add_primary_key(&mut self, column: &str) -> bool {
        let Some(&pos) = self.columns.get(column) else {
            return false;
        };
        let field = &mut self.fields[pos];
        field.primary_key = true;

        self.primary_key.add(field)
    }

    //
    // read access
    //

    #[must_use]
    pub fn auto(&self) -> Option<&FieldDescriptor> {
        self.auto.map(|pos| &self.fields[pos])
    }

    #[must_use]
    pub fn primary_key(&self) -> Option<&FieldDescriptor> {
        self.primary_key.first().and_then(|c| self.by_column(c))
    }

    #[must_use]
    pub const fn primary_key_group(&self) -> &FieldGroup {
        &self.primary_key
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.names.get(name).map(|&pos| &self.fields[pos])
    }

    #[must_use]
    pub fn by_column(&self, column: &str) -> Option<&FieldDescriptor> {
        self.columns.get(column).map(|&pos| &self.fields[pos])
    }

    pub fn iter(&self) -> Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Fields stored as columns of the model's own table.
    pub fn db_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.db_column)
    }

    /// Stored column names in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.db_fields().map(|f| f.column.as_str())
    }

    pub fn relations(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_relation())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a FieldDescriptor;
    type IntoIter = Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
