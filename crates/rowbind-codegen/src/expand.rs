mod constructor;
mod member;
mod util;

use crate::schema::Record;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The record being expanded
    record: &'a Record,

    /// Path prefix for rowbind types
    rowbind: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let rowbind = &self.rowbind;
        let ident = &self.record.ident;
        let name = util::lit(&ident.to_string());
        let constructors = self.expand_constructors();
        let members = self.expand_members();

        wrap_in_const(quote! {
            impl #rowbind::Record for #ident {
                fn shape() -> #rowbind::Shape<Self> {
                    #rowbind::Shape {
                        name: #name,
                        constructors: vec![#( #constructors ),*],
                        members: vec![#( #members ),*],
                    }
                }
            }
        })
    }
}

pub(super) fn record(record: &Record) -> TokenStream {
    Expand {
        record,
        rowbind: quote!(_rowbind::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use rowbind as _rowbind;
            #code
        };
    }
}
