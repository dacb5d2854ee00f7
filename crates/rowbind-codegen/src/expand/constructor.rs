use super::{util, Expand};
use crate::schema::Field;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_constructors(&self) -> Vec<TokenStream> {
        let record = self.record;
        let mut constructors = vec![];

        for constructor in &record.attr.constructors {
            let fields: Vec<_> = constructor
                .args
                .iter()
                .filter_map(|arg| record.field(arg))
                .collect();

            let path = &constructor.path;
            let name = util::path_str(path);
            let (args, takes) = self.expand_args(&fields);

            constructors.push(self.expand_constructor(
                &name,
                &fields,
                args,
                quote!(#path(#( #takes ),*)),
            ));
        }

        if record.attr.default.is_some() {
            let rowbind = &self.rowbind;
            let ident = &record.ident;

            constructors.push(quote! {
                #rowbind::Constructor {
                    name: "default",
                    params: vec![],
                    invoke: |_| Ok(<#ident as #rowbind::Default>::default()),
                }
            });
        } else if record.attr.constructors.is_empty() {
            constructors.push(self.expand_struct_literal());
        }

        constructors
    }

    /// The constructor that initializes every field in place.
    fn expand_struct_literal(&self) -> TokenStream {
        let record = self.record;
        let ident = &record.ident;
        let fields: Vec<_> = record.fields.iter().collect();
        let (args, takes) = self.expand_args(&fields);
        let field_idents = fields.iter().map(|field| &field.ident);

        self.expand_constructor(
            &ident.to_string(),
            &fields,
            args,
            quote!(#ident { #( #field_idents: #takes ),* }),
        )
    }

    fn expand_constructor(
        &self,
        name: &str,
        fields: &[&Field],
        args: TokenStream,
        body: TokenStream,
    ) -> TokenStream {
        let rowbind = &self.rowbind;
        let name = util::lit(name);
        let params = fields.iter().map(|field| self.expand_param(field));

        quote! {
            #rowbind::Constructor {
                name: #name,
                params: vec![#( #params ),*],
                invoke: |#args| Ok(#body),
            }
        }
    }

    /// The closure argument pattern and one value expression per field.
    ///
    /// Ignored fields are always populated with their default.
    fn expand_args(&self, fields: &[&Field]) -> (TokenStream, Vec<TokenStream>) {
        let rowbind = &self.rowbind;
        let mut used = false;

        let takes = fields
            .iter()
            .enumerate()
            .map(|(slot, field)| {
                if field.attrs.ignore {
                    quote!(#rowbind::Default::default())
                } else {
                    used = true;
                    let slot = util::int(slot);
                    quote!(args.take(#slot)?)
                }
            })
            .collect();

        let args = if used {
            quote!(mut args: #rowbind::Args)
        } else {
            quote!(_: #rowbind::Args)
        };

        (args, takes)
    }
}
