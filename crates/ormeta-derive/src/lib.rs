//! `#[derive(Model)]` for ormeta host types.

use proc_macro::TokenStream;

mod helper;
mod model;

/// Implement `ormeta::core::traits::Model` for a struct with named fields.
///
/// Type level: `#[orm(table = "...")]`. Field level: `pk`, `auto`,
/// `column = ".."`, `transient`, `null`, `unique`, `index`, `size = n`,
/// `default = ".."`, `text`, `rel = "fk" | "one" | "m2m"`,
/// `reverse = "one" | "many"`, `tag = ".."` and `skip`.
#[proc_macro_derive(Model, attributes(orm))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model(input.into()).into()
}
