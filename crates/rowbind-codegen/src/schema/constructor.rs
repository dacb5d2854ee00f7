use syn::{parenthesized, punctuated::Punctuated};

/// `constructor = path(a, b)`: a function building the record from the
/// named fields, in argument order.
#[derive(Debug)]
pub(crate) struct ConstructorAttr {
    pub(crate) path: syn::Path,
    pub(crate) args: Vec<syn::Ident>,
}

impl syn::parse::Parse for ConstructorAttr {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let path = input.call(syn::Path::parse_mod_style)?;

        let content;
        parenthesized!(content in input);
        let args = Punctuated::<syn::Ident, syn::Token![,]>::parse_terminated(&content)?;

        Ok(ConstructorAttr {
            path,
            args: args.into_iter().collect(),
        })
    }
}
