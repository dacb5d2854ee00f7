use super::{util, Expand};
use crate::schema::Field;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_members(&self) -> Vec<TokenStream> {
        self.record
            .fields
            .iter()
            .map(|field| self.expand_member(field))
            .collect()
    }

    fn expand_member(&self, field: &Field) -> TokenStream {
        let rowbind = &self.rowbind;
        let record_ident = &self.record.ident;
        let field_ident = &field.ident;
        let ty = &field.ty;
        let name = util::lit(&field.name());
        let attrs = self.expand_attrs(field);

        if field.attrs.ignore {
            return quote! {
                #rowbind::Member {
                    name: #name,
                    ty: #rowbind::Type::Unknown,
                    nullable: true,
                    kind: #rowbind::MemberKind::Field,
                    set: #rowbind::Option::None,
                    get: #rowbind::Option::None,
                    attrs: #attrs,
                }
            };
        }

        quote! {
            #rowbind::Member {
                name: #name,
                ty: <#ty as #rowbind::Primitive>::ty(),
                nullable: <#ty as #rowbind::Primitive>::NULLABLE,
                kind: #rowbind::MemberKind::Field,
                set: #rowbind::Option::Some(
                    (|record: &mut #record_ident, value: #rowbind::Value| -> #rowbind::Result<()> {
                        record.#field_ident = <#ty as #rowbind::Primitive>::load(value)?;
                        Ok(())
                    }) as fn(&mut #record_ident, #rowbind::Value) -> #rowbind::Result<()>
                ),
                get: #rowbind::Option::Some(
                    (|record: &#record_ident| -> #rowbind::Value {
                        <#ty as #rowbind::Primitive>::to_value(&record.#field_ident)
                    }) as fn(&#record_ident) -> #rowbind::Value
                ),
                attrs: #attrs,
            }
        }
    }

    pub(super) fn expand_param(&self, field: &Field) -> TokenStream {
        let rowbind = &self.rowbind;
        let ty = &field.ty;
        let name = util::lit(&field.name());
        let attrs = self.expand_attrs(field);

        if field.attrs.ignore {
            quote! {
                #rowbind::Param {
                    name: #name,
                    ty: #rowbind::Type::Unknown,
                    nullable: true,
                    attrs: #attrs,
                }
            }
        } else {
            quote! {
                #rowbind::Param {
                    name: #name,
                    ty: <#ty as #rowbind::Primitive>::ty(),
                    nullable: <#ty as #rowbind::Primitive>::NULLABLE,
                    attrs: #attrs,
                }
            }
        }
    }

    fn expand_attrs(&self, field: &Field) -> TokenStream {
        let rowbind = &self.rowbind;
        let attrs = &field.attrs;
        let column = util::option(rowbind, attrs.column.as_ref().map(|column| &column.name));
        let position = util::option(rowbind, attrs.position.map(util::int));
        let ignore = attrs.ignore;
        let ignore_if_null = attrs.ignore_if_null;
        let reduce = attrs.reduce;

        quote! {
            #rowbind::Attrs {
                column: #column,
                ignore: #ignore,
                ignore_if_null: #ignore_if_null,
                position: #position,
                reduce: #reduce,
            }
        }
    }
}
