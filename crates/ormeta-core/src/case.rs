//! Identifier casing used for derived table and column names.

use convert_case::{Case, Casing};

/// Convert an identifier (`UserName`, `userName`) into its snake form
/// (`user_name`). Input that is already lower snake is returned unchanged,
/// which keeps the conversion idempotent.
#[must_use]
pub fn snake_case(ident: &str) -> String {
    if is_snake_case(ident) {
        return ident.to_string();
    }

    ident.to_case(Case::Snake)
}

/// Convert a snake identifier (`user_group_rel`) into its camel type form
/// (`UserGroupRel`).
#[must_use]
pub fn camel_case(ident: &str) -> String {
    ident.to_case(Case::Pascal)
}

/// Whether the identifier only uses lowercase ASCII, digits and underscores.
#[must_use]
pub fn is_snake_case(ident: &str) -> bool {
    !ident.is_empty()
        && ident
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}
