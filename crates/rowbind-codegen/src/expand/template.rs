use super::util;
use crate::template::{Segment, Template};

use proc_macro2::TokenStream;
use quote::quote;

pub(super) fn expand(template: &Template) -> TokenStream {
    let rowbind = quote!(_rowbind::codegen_support);
    let builder = util::ident("builder");

    let arg_idents: Vec<_> = (0..template.args.len())
        .map(|index| util::ident(&format!("arg{index}")))
        .collect();

    let bindings = template
        .args
        .iter()
        .zip(&arg_idents)
        .map(|(expr, ident)| quote!(let #ident = &(#expr);));

    let appends = template.segments.iter().map(|segment| match segment {
        Segment::Literal(text) => quote!(#builder.append_literal(#text);),
        Segment::Value(index) => {
            let ident = &arg_idents[*index];
            quote!(#builder.append_value(#ident);)
        }
    });

    let literal_len = template.literal_len;
    let value_count = template
        .segments
        .iter()
        .filter(|segment| matches!(segment, Segment::Value(_)))
        .count();

    quote! {
        {
            use rowbind as _rowbind;
            #( #bindings )*
            let mut #builder = #rowbind::CommandBuilder::with_capacity(#literal_len, #value_count);
            #( #appends )*
            #builder.build()
        }
    }
}
