/// Creates a new identifier prefixed with `__rowbind_` to avoid name collisions
/// with user-defined items in generated code.
pub(crate) fn ident(name: &str) -> syn::Ident {
    quote::format_ident!("__rowbind_{name}")
}
