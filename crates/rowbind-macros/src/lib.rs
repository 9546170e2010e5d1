extern crate proc_macro;

use proc_macro::TokenStream;

/// Derives `FromRow`, reading each field from the column of the same name.
///
/// Use `#[column("Name")]` on a field to read a different column, and
/// `#[rowbind(rename_all = "PascalCase")]` on the struct to derive column
/// names from field names.
#[proc_macro_derive(FromRow, attributes(column, rowbind))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    match rowbind_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Builds a parameterized `Command` from a template.
///
/// `{name}` captures a local, `{}` and `{N}` take positional arguments and
/// `{name}` may also refer to a `name = expr` argument. Each hole becomes a
/// placeholder bound to its value.
#[proc_macro]
pub fn sql(input: TokenStream) -> TokenStream {
    match rowbind_codegen::template(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
