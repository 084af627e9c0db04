use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, PathArguments, Type};

// Wrappers peeled off a relation field to reach the related model.
const RELATION_WRAPPERS: [&str; 5] = ["Option", "Box", "Vec", "Arc", "Rc"];

/// `T` when `ty` is `wrapper<T>` for one of `wrappers` (last path segment).
pub fn wrapped_inner<'a>(ty: &'a Type, wrappers: &[&str]) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;
    if !wrappers.iter().any(|w| segment.ident == *w) {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// `T` for `Option<T>`.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    wrapped_inner(ty, &["Option"])
}

/// Related model of a relation field, with every smart pointer, collection
/// and `Option` layer removed.
pub fn relation_target(ty: &Type) -> &Type {
    let mut ty = ty;
    while let Some(inner) = wrapped_inner(ty, &RELATION_WRAPPERS) {
        ty = inner;
    }

    ty
}

/// Quote an `Option<&str>` as a `&'static str` option.
pub fn quote_str_option(opt: Option<&str>) -> TokenStream {
    match opt {
        Some(s) => quote!(::core::option::Option::Some(#s)),
        None => quote!(::core::option::Option::None),
    }
}
