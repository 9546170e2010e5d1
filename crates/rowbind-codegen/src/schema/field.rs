use super::{Column, ErrorSet, RenameRule};

use quote::ToTokens;
use rowbind_core::{Accessor, AccessorMap, SemanticType};
use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Field {
    /// Field ident, or index for tuple structs
    pub(crate) member: syn::Member,

    /// Column the field is read from
    pub(crate) column: syn::LitStr,

    /// Declared field type
    pub(crate) ty: syn::Type,

    /// Row accessor reading the column
    pub(crate) accessor: Accessor,
}

impl Field {
    pub(super) fn from_ast(
        field: &syn::Field,
        index: usize,
        rename_all: Option<RenameRule>,
    ) -> syn::Result<Self> {
        let mut errs = ErrorSet::new();
        let mut column = None;

        for attr in &field.attrs {
            if attr.path().is_ident("column") {
                if column.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[column] attribute",
                    ));
                    continue;
                }

                if let Some(attr) = errs.record(Column::from_ast(attr)) {
                    column = Some(attr.name);
                }
            }
        }

        let member = match &field.ident {
            Some(ident) => syn::Member::Named(ident.clone()),
            None => syn::Member::Unnamed(syn::Index::from(index)),
        };

        let column = match (column, &field.ident) {
            (Some(column), _) => Some(column),
            (None, Some(ident)) => {
                let name = ident.unraw().to_string();
                let name = match rename_all {
                    Some(rule) => rule.apply(&name),
                    None => name,
                };
                Some(syn::LitStr::new(&name, ident.span()))
            }
            (None, None) => {
                errs.push(syn::Error::new_spanned(
                    field,
                    "tuple struct fields require a `#[column(\"...\")]` attribute",
                ));
                None
            }
        };

        let accessor = errs.record(resolve_accessor(&field.ty));

        errs.finish()?;

        match (column, accessor) {
            (Some(column), Some(accessor)) => Ok(Field {
                member,
                column,
                ty: field.ty.clone(),
                accessor,
            }),
            _ => Err(syn::Error::new_spanned(field, "invalid field")),
        }
    }
}

fn resolve_accessor(ty: &syn::Type) -> syn::Result<Accessor> {
    let spelling: String = ty
        .to_token_stream()
        .to_string()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    AccessorMap::global()
        .lookup_type_name(&spelling)
        .ok_or_else(|| {
            let supported = SemanticType::ALL
                .iter()
                .map(|ty| ty.rust_names()[0])
                .collect::<Vec<_>>()
                .join(", ");

            syn::Error::new_spanned(
                ty,
                format!(
                    "unsupported field type `{spelling}`; supported types are {supported}, \
                     and `Option` of each"
                ),
            )
        })
}
