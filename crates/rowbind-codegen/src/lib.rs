mod expand;
mod schema;
mod template;

use proc_macro2::TokenStream;

/// Expands `#[derive(FromRow)]` for the given item.
pub fn generate(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::DeriveInput = syn::parse2(input)?;
    let model = schema::Model::from_ast(&item)?;

    Ok(expand::model(&model))
}

/// Expands `sql!("...", args...)` into a `Command` built from the template.
pub fn template(input: TokenStream) -> syn::Result<TokenStream> {
    let template: template::Template = syn::parse2(input)?;

    Ok(expand::template(&template))
}
