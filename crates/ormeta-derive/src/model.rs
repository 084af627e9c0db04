use crate::helper::{option_inner, quote_str_option, relation_target};
use darling::{
    Error as DarlingError, FromDeriveInput, FromField, FromMeta,
    ast::Data,
    util::Ignored,
};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Generics, Ident, Type, ext::IdentExt};

// derive_model
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    expand(&input).unwrap_or_else(DarlingError::write_errors)
}

fn expand(input: &DeriveInput) -> Result<TokenStream, DarlingError> {
    let ModelArgs {
        ident,
        generics,
        data,
        table,
    } = ModelArgs::from_derive_input(input)?;

    let fields = data
        .take_struct()
        .ok_or_else(|| DarlingError::unsupported_shape("enum").with_span(&ident))?;

    let mut errors = DarlingError::accumulator();
    let attributes: Vec<TokenStream> = fields
        .fields
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.skip)
        .filter_map(|(position, f)| errors.handle(f.attribute(position)))
        .collect();
    errors.finish()?;

    let name = ident.to_string();
    let table = quote_str_option(table.as_deref());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::ormeta::core::traits::Model for #ident #ty_generics #where_clause {
            const MODULE: &'static str = ::core::module_path!();
            const NAME: &'static str = #name;
            const TABLE: ::core::option::Option<&'static str> = #table;

            fn attributes() -> ::std::vec::Vec<::ormeta::core::model::Attribute> {
                ::std::vec![#(#attributes),*]
            }
        }
    })
}

///
/// ModelArgs
///

#[derive(FromDeriveInput)]
#[darling(attributes(orm), supports(struct_named))]
struct ModelArgs {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, FieldArgs>,

    #[darling(default)]
    table: Option<String>,
}

///
/// FieldArgs
/// One `#[orm(...)]` annotated struct field.
///

#[derive(FromField)]
#[darling(attributes(orm))]
struct FieldArgs {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    skip: bool,
    #[darling(default)]
    pk: bool,
    #[darling(default)]
    auto: bool,
    #[darling(default)]
    transient: bool,
    #[darling(default)]
    null: bool,
    #[darling(default)]
    unique: bool,
    #[darling(default)]
    index: bool,
    #[darling(default)]
    text: bool,

    #[darling(default)]
    column: Option<String>,
    #[darling(default)]
    size: Option<u32>,
    #[darling(default)]
    default: Option<String>,
    #[darling(default)]
    tag: Option<String>,

    #[darling(default)]
    rel: Option<Rel>,
    #[darling(default)]
    reverse: Option<Reverse>,
}

impl FieldArgs {
    // Attribute constructor expression followed by its annotation builders;
    // `position` is the field's index in the struct, skipped fields included
    fn attribute(&self, position: usize) -> Result<TokenStream, DarlingError> {
        let ident = self
            .ident
            .as_ref()
            .ok_or_else(|| DarlingError::custom("expected a named field"))?;
        let name = ident.unraw().to_string();
        let ty = &self.ty;

        let (base, optional) = match self.relation_kind(ident)? {
            Some(kind) => {
                let target = relation_target(ty);
                (
                    quote!(::ormeta::core::model::Attribute::relation::<#target>(#name, #kind)),
                    option_inner(ty).is_some(),
                )
            }
            None => match option_inner(ty) {
                Some(inner) => (
                    quote!(::ormeta::core::model::Attribute::of::<#inner>(#name)),
                    true,
                ),
                None => (
                    quote!(::ormeta::core::model::Attribute::of::<#ty>(#name)),
                    false,
                ),
            },
        };

        let mut chain = vec![quote!(.position(#position))];
        for (set, call) in [
            (self.pk, quote!(.pk())),
            (self.auto, quote!(.auto())),
            (self.transient, quote!(.transient())),
            (self.null || optional, quote!(.null())),
            (self.unique, quote!(.unique())),
            (self.index, quote!(.index())),
            (self.text, quote!(.text())),
        ] {
            if set {
                chain.push(call);
            }
        }
        if let Some(column) = &self.column {
            chain.push(quote!(.column(#column)));
        }
        if let Some(size) = self.size {
            chain.push(quote!(.size(#size)));
        }
        if let Some(default) = &self.default {
            chain.push(quote!(.default_value(#default)));
        }
        if let Some(tag) = &self.tag {
            chain.push(quote!(.tag(#tag)));
        }

        Ok(quote!(#base #(#chain)*))
    }

    fn relation_kind(&self, ident: &Ident) -> Result<Option<TokenStream>, DarlingError> {
        match (self.rel, self.reverse) {
            (Some(_), Some(_)) => Err(DarlingError::custom(
                "a field takes either `rel` or `reverse`, not both",
            )
            .with_span(ident)),
            (Some(rel), None) => Ok(Some(rel.kind())),
            (None, Some(reverse)) => Ok(Some(reverse.kind())),
            (None, None) => Ok(None),
        }
    }
}

///
/// Rel
///

#[derive(Clone, Copy, Debug, Eq, FromMeta, PartialEq)]
enum Rel {
    #[darling(rename = "fk")]
    ForeignKey,

    #[darling(rename = "one")]
    OneToOne,

    #[darling(rename = "m2m")]
    ManyToMany,
}

impl Rel {
    fn kind(self) -> TokenStream {
        match self {
            Self::ForeignKey => quote!(::ormeta::core::model::RelationKind::ForeignKey),
            Self::OneToOne => quote!(::ormeta::core::model::RelationKind::OneToOne),
            Self::ManyToMany => quote!(::ormeta::core::model::RelationKind::ManyToMany),
        }
    }
}

///
/// Reverse
///

#[derive(Clone, Copy, Debug, Eq, FromMeta, PartialEq)]
enum Reverse {
    #[darling(rename = "one")]
    One,

    #[darling(rename = "many")]
    Many,
}

impl Reverse {
    fn kind(self) -> TokenStream {
        match self {
            Self::One => quote!(::ormeta::core::model::RelationKind::ReverseOne),
            Self::Many => quote!(::ormeta::core::model::RelationKind::ReverseMany),
        }
    }
}
