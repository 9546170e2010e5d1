use rowbind_core::{Accessor, AccessorMap, Error, Result, Row, Value};

/// Maps rows to `(column, value)` records without a generated mapper.
///
/// Each column is paired with the Rust type it should be read as. Types are
/// resolved through the [`AccessorMap`] when the mapper is built, so an
/// unsupported type fails early instead of on the first row.
///
/// ```
/// use rowbind::DynamicMapper;
///
/// let mapper = DynamicMapper::new([("Id", "i64"), ("Note", "Option<String>")]).unwrap();
/// assert_eq!(mapper.columns().count(), 2);
///
/// assert!(DynamicMapper::new([("Data", "Vec<u8>")]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DynamicMapper {
    columns: Vec<(String, Accessor)>,
}

impl DynamicMapper {
    pub fn new<I, C, T>(columns: I) -> Result<DynamicMapper>
    where
        I: IntoIterator<Item = (C, T)>,
        C: Into<String>,
        T: AsRef<str>,
    {
        let map = AccessorMap::global();

        let columns = columns
            .into_iter()
            .map(|(column, ty)| {
                let ty = ty.as_ref();
                let column: String = column.into();

                match map.lookup_type_name(ty) {
                    Some(accessor) => Ok((column, accessor)),
                    None => Err(Error::unsupported_type(ty)
                        .context(rowbind_core::err!("column `{column}`"))),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DynamicMapper { columns })
    }

    /// Column names with the accessor used to read each.
    pub fn columns(&self) -> impl Iterator<Item = (&str, Accessor)> + '_ {
        self.columns
            .iter()
            .map(|(column, accessor)| (column.as_str(), *accessor))
    }

    pub fn map<R: Row + ?Sized>(&self, row: &R) -> Result<Vec<(String, Value)>> {
        self.columns
            .iter()
            .map(|(column, accessor)| Ok((column.clone(), accessor.read(row, column)?)))
            .collect()
    }
}
