use proc_macro2::{Span, TokenStream};
use quote::{quote, ToTokens};

pub(crate) fn int(v: usize) -> TokenStream {
    syn::LitInt::new(&v.to_string(), Span::call_site()).into_token_stream()
}

pub(crate) fn lit(v: &str) -> syn::LitStr {
    syn::LitStr::new(v, Span::call_site())
}

pub(crate) fn option<T: ToTokens>(rowbind: &TokenStream, v: Option<T>) -> TokenStream {
    match v {
        Some(v) => quote!(#rowbind::Option::Some(#v)),
        None => quote!(#rowbind::Option::None),
    }
}

/// Renders a path without the spacing `ToTokens` inserts.
pub(crate) fn path_str(path: &syn::Path) -> String {
    path.to_token_stream()
        .to_string()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
