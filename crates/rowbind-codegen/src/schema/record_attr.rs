use super::{ConstructorAttr, ErrorSet};

mod kw {
    syn::custom_keyword!(default);
    syn::custom_keyword!(constructor);
}

#[derive(Debug, Default)]
pub(crate) struct RecordAttr {
    /// `#[record(default)]`: instances are created through `Default` and
    /// populated member by member.
    pub(crate) default: Option<proc_macro2::Span>,

    /// `#[record(constructor = path(a, b))]`, in declaration order
    pub(crate) constructors: Vec<ConstructorAttr>,
}

impl RecordAttr {
    pub(super) fn populate_from_ast(
        &mut self,
        attrs: &[syn::Attribute],
        names: &[syn::Ident],
    ) -> syn::Result<()> {
        let mut errs = ErrorSet::new();

        for attr in attrs {
            if !attr.path().is_ident("record") {
                continue;
            }

            let res = attr.parse_args_with(|input: syn::parse::ParseStream| {
                loop {
                    let lookahead = input.lookahead1();

                    if lookahead.peek(kw::default) {
                        let token: kw::default = input.parse()?;
                        if self.default.is_some() {
                            errs.push(syn::Error::new(token.span, "duplicate `default`"));
                        }
                        self.default = Some(token.span);
                    } else if lookahead.peek(kw::constructor) {
                        let _kw: kw::constructor = input.parse()?;
                        let _eq_token: syn::Token![=] = input.parse()?;
                        let constructor: ConstructorAttr = input.parse()?;

                        for arg in &constructor.args {
                            if !names.contains(arg) {
                                errs.push(syn::Error::new_spanned(
                                    arg,
                                    format!("constructor argument `{arg}` is not a field"),
                                ));
                            }
                        }

                        self.constructors.push(constructor);
                    } else {
                        return Err(lookahead.error());
                    }

                    if input.is_empty() {
                        break;
                    }
                    let _comma_token: syn::Token![,] = input.parse()?;
                }

                Ok(())
            });

            errs.check(res);
        }

        match errs.collect() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
