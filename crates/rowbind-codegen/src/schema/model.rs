use super::{ErrorSet, Field, ModelAttr};

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModelKind {
    /// Struct with named fields
    Named,

    /// Tuple struct, every field carries `#[column]`
    Tuple,
}

#[derive(Debug)]
pub(crate) struct Model {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    pub(crate) kind: ModelKind,

    /// Fields in declaration order
    pub(crate) fields: Vec<Field>,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::DeriveInput) -> syn::Result<Self> {
        let data = match &ast.data {
            syn::Data::Struct(data) => data,
            syn::Data::Enum(data) => {
                return Err(syn::Error::new_spanned(
                    data.enum_token,
                    "FromRow can only be derived for structs",
                ));
            }
            syn::Data::Union(data) => {
                return Err(syn::Error::new_spanned(
                    data.union_token,
                    "FromRow can only be derived for structs",
                ));
            }
        };

        // Generics are not supported
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "FromRow cannot be derived for generic types",
            ));
        }

        let (kind, fields) = match &data.fields {
            syn::Fields::Named(fields) => (ModelKind::Named, &fields.named),
            syn::Fields::Unnamed(fields) => (ModelKind::Tuple, &fields.unnamed),
            syn::Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "FromRow cannot be derived for unit structs",
                ));
            }
        };

        let mut errs = ErrorSet::new();

        let model_attr = errs
            .record(ModelAttr::from_ast(&ast.attrs))
            .unwrap_or_default();

        let mut parsed = vec![];

        for (index, node) in fields.iter().enumerate() {
            parsed.extend(errs.record(Field::from_ast(node, index, model_attr.rename_all)));
        }

        let mut seen = HashSet::new();

        for field in &parsed {
            let column = field.column.value();
            if !seen.insert(column.clone()) {
                errs.push(syn::Error::new_spanned(
                    &field.column,
                    format!("duplicate column name `{column}`"),
                ));
            }
        }

        errs.finish()?;

        Ok(Model {
            ident: ast.ident.clone(),
            kind,
            fields: parsed,
        })
    }
}
