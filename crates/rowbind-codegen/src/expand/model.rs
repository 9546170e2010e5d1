use super::util;
use crate::schema::{Model, ModelKind};

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;

pub(super) fn expand(model: &Model) -> TokenStream {
    let rowbind = quote!(_rowbind::codegen_support);
    let model_ident = &model.ident;
    let row_ty = util::ident("R");

    // Each read carries the span of the declared field type, so a type error
    // in the generated code points at the field.
    let reads = model.fields.iter().map(|field| {
        let span = field.ty.span();
        let method = syn::Ident::new(field.accessor.method_name(), span);
        let column = &field.column;
        quote_spanned!(span=> row.#method(#column)?)
    });

    let body = match model.kind {
        ModelKind::Named => {
            let members = model.fields.iter().map(|field| &field.member);
            quote!(Self { #( #members: #reads, )* })
        }
        ModelKind::Tuple => quote!(Self( #( #reads, )* )),
    };

    quote! {
        impl #rowbind::FromRow for #model_ident {
            fn from_row<#row_ty: #rowbind::Row + ?Sized>(row: &#row_ty) -> #rowbind::Result<Self> {
                Ok(#body)
            }
        }
    }
}
