use crate::{Error, FromValue, Result, Value};

macro_rules! row_accessors {
    ( $( ($sem:ident, $nullable:ident, $ty:ty, $variant:ident, $get:ident, $get_nullable:ident) ),* $(,)? ) => {
        $(
            #[doc = concat!("Reads `column` as `", stringify!($ty), "`, failing on NULL.")]
            fn $get(&self, column: &str) -> Result<$ty> {
                read_required(self.value(column)?, column)
            }

            #[doc = concat!("Reads `column` as `Option<", stringify!($ty), ">`.")]
            fn $get_nullable(&self, column: &str) -> Result<Option<$ty>> {
                read_optional(self.value(column)?, column)
            }
        )*
    };
}

/// A result-set row with column lookup by name.
///
/// Drivers implement [`value`](Row::value) and [`value_at`](Row::value_at);
/// the typed accessors are provided. The trait is object safe, so mappers can
/// take `&dyn Row`.
pub trait Row {
    /// Returns the value stored in `column`.
    ///
    /// Fails with a column-not-found error if the row has no such column.
    fn value(&self, column: &str) -> Result<&Value>;

    /// Returns the value at a zero-based column position.
    fn value_at(&self, index: usize) -> Result<&Value>;

    for_each_accessor!(row_accessors);
}

fn read_required<T: FromValue>(value: &Value, column: &str) -> Result<T> {
    if value.is_null() {
        return Err(Error::unexpected_null(column));
    }

    T::from_value(value).map_err(|e| e.context(err!("column `{column}`")))
}

fn read_optional<T: FromValue>(value: &Value, column: &str) -> Result<Option<T>> {
    if value.is_null() {
        return Ok(None);
    }

    read_required(value, column).map(Some)
}
