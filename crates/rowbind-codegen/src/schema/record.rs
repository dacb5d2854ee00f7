use super::{ErrorSet, Field, RecordAttr};

#[derive(Debug)]
pub(crate) struct Record {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Record fields
    pub(crate) fields: Vec<Field>,

    /// Struct-level attributes
    pub(crate) attr: RecordAttr,
}

impl Record {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "record fields must be named",
            ));
        };

        // Generics are not supported yet
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "record generics are not supported",
            ));
        }

        let names: Vec<_> = node
            .named
            .iter()
            .filter_map(|field| field.ident.clone())
            .collect();

        let mut attr = RecordAttr::default();
        let mut fields = vec![];
        let mut errs = ErrorSet::new();

        errs.check(attr.populate_from_ast(&ast.attrs, &names));

        for node in &node.named {
            if let Some(field) = errs.check(Field::from_ast(node)) {
                fields.push(field);
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Record {
            ident: ast.ident.clone(),
            fields,
            attr,
        })
    }

    pub(crate) fn field(&self, ident: &syn::Ident) -> Option<&Field> {
        self.fields.iter().find(|field| field.ident == *ident)
    }
}
