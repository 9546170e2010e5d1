use super::{ErrorSet, RenameRule};

/// Container attributes: `#[rowbind(rename_all = "...")]`.
#[derive(Debug, Default)]
pub(crate) struct ModelAttr {
    pub(crate) rename_all: Option<RenameRule>,
}

impl ModelAttr {
    pub(super) fn from_ast(attrs: &[syn::Attribute]) -> syn::Result<ModelAttr> {
        let mut result = ModelAttr::default();
        let mut errs = ErrorSet::new();

        for attr in attrs {
            if !attr.path().is_ident("rowbind") {
                continue;
            }

            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    if result.rename_all.is_some() {
                        return Err(meta.error("duplicate `rename_all` option"));
                    }

                    let lit: syn::LitStr = meta.value()?.parse()?;
                    result.rename_all = Some(RenameRule::from_lit(&lit)?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported rowbind option, expected `rename_all`"))
                }
            });

            errs.record(parsed);
        }

        errs.finish()?;
        Ok(result)
    }
}
