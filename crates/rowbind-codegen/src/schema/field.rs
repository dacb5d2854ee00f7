use super::{Column, ErrorSet};

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Field type
    pub(crate) ty: syn::Type,

    /// Field attributes
    pub(crate) attrs: FieldAttr,
}

#[derive(Debug, Default)]
pub(crate) struct FieldAttr {
    /// Source column or parameter name: `#[column("name")]`
    pub(crate) column: Option<Column>,

    /// `#[skip]`: never read or bound; populated with `Default`
    pub(crate) ignore: bool,

    /// `#[ignore_if_null]`: skipped when binding a null value
    pub(crate) ignore_if_null: bool,

    /// `#[position(n)]`: fixed parameter position
    pub(crate) position: Option<usize>,

    /// `#[reduce]`: a collection bound as one parameter per element
    pub(crate) reduce: bool,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut attrs = FieldAttr::default();

        for attr in &field.attrs {
            if attr.path().is_ident("column") {
                if attrs.column.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[column] attribute",
                    ));
                } else {
                    attrs.column = errs.check(Column::from_ast(attr));
                }
            } else if attr.path().is_ident("skip") {
                if attrs.ignore {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[skip] attribute"));
                }
                attrs.ignore = true;
            } else if attr.path().is_ident("ignore_if_null") {
                if attrs.ignore_if_null {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[ignore_if_null] attribute",
                    ));
                }
                attrs.ignore_if_null = true;
            } else if attr.path().is_ident("position") {
                if attrs.position.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[position] attribute",
                    ));
                } else if let Some(lit) = errs.check(attr.parse_args::<syn::LitInt>()) {
                    attrs.position = errs.check(lit.base10_parse::<usize>());
                }
            } else if attr.path().is_ident("reduce") {
                if attrs.reduce {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[reduce] attribute"));
                }
                attrs.reduce = true;
            }
        }

        let configured = attrs.column.is_some()
            || attrs.ignore_if_null
            || attrs.position.is_some()
            || attrs.reduce;

        if attrs.ignore && configured {
            errs.push(syn::Error::new_spanned(
                ident,
                "a #[skip] field cannot carry other field attributes",
            ));
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Field {
            ident: ident.clone(),
            ty: field.ty.clone(),
            attrs,
        })
    }

    /// Name the runtime sees for this field.
    pub(crate) fn name(&self) -> String {
        let name = self.ident.to_string();
        name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
    }
}
