use rowbind_core::{Result, Row};

/// Builds a value from one result-set row.
///
/// Usually derived with `#[derive(FromRow)]`, which reads each field from its
/// column with the row accessor matching the field's type.
pub trait FromRow: Sized {
    fn from_row<R: Row + ?Sized>(row: &R) -> Result<Self>;
}
