mod model;
mod template;
mod util;

use crate::{schema::Model, template::Template};

use proc_macro2::TokenStream;
use quote::quote;

pub(super) fn model(model: &Model) -> TokenStream {
    wrap_in_const(model::expand(model))
}

pub(super) fn template(template: &Template) -> TokenStream {
    template::expand(template)
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use rowbind as _rowbind;
            #code
        };
    }
}
