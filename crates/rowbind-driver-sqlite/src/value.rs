use rowbind_core::value::{Value as CoreValue, DATETIME_FORMAT};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

/// Adapts a rowbind [`CoreValue`] to rusqlite's binding and reading APIs.
#[derive(Debug)]
pub(crate) struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Reads column `index` of a SQLite row in its storage class.
    pub(crate) fn from_sql(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<CoreValue> {
        Ok(match row.get_ref(index)? {
            ValueRef::Null => CoreValue::Null,
            ValueRef::Integer(value) => CoreValue::I64(value),
            ValueRef::Real(value) => CoreValue::F64(value),
            ValueRef::Text(value) => CoreValue::String(
                std::str::from_utf8(value)
                    .map_err(rusqlite::Error::Utf8Error)?
                    .to_string(),
            ),
            ValueRef::Blob(value) => CoreValue::Bytes(value.to_vec()),
        })
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use CoreValue::*;

        Ok(match &self.0 {
            Null => ToSqlOutput::Owned(SqlValue::Null),
            Bool(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            U8(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            I16(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            I32(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            I64(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            F32(v) => ToSqlOutput::Owned(SqlValue::Real(*v as f64)),
            F64(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            Decimal(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_string())),
            String(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Uuid(v) => ToSqlOutput::Owned(SqlValue::Text(v.hyphenated().to_string())),
            Char(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_string())),
            DateTime(v) => ToSqlOutput::Owned(SqlValue::Text(v.format(DATETIME_FORMAT).to_string())),
            Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
        })
    }
}
