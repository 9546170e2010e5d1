/// Accumulates `syn` errors so every problem in a derive input or template is
/// reported by a single expansion.
#[derive(Debug, Default)]
pub(crate) struct ErrorSet {
    errors: Vec<syn::Error>,
}

impl ErrorSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, err: syn::Error) {
        self.errors.push(err);
    }

    /// Returns the value of `res`, recording its error instead if it failed.
    pub(crate) fn record<T>(&mut self, res: syn::Result<T>) -> Option<T> {
        match res {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err);
                None
            }
        }
    }

    /// Fails with every recorded error combined into one.
    pub(crate) fn finish(self) -> syn::Result<()> {
        let mut errors = self.errors.into_iter();

        let Some(mut combined) = errors.next() else {
            return Ok(());
        };

        for err in errors {
            combined.combine(err);
        }

        Err(combined)
    }
}
