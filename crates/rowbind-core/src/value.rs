use crate::{Error, Result};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

/// Text layout used when a [`Value::DateTime`] is stored as text.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A single column value, as produced by a driver or bound as a parameter.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Unsigned 8-bit integer
    U8(u8),

    /// Signed 16-bit integer
    I16(i16),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// Single precision float
    F32(f32),

    /// Double precision float
    F64(f64),

    /// Fixed-point decimal
    Decimal(Decimal),

    /// UTF-8 text
    String(String),

    /// 128-bit identifier
    Uuid(Uuid),

    /// Single Unicode scalar value
    Char(char),

    /// Date and time without a zone
    DateTime(NaiveDateTime),

    /// Raw bytes
    Bytes(Vec<u8>),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the variant, used in conversion error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::U8(_) => "U8",
            Self::I16(_) => "I16",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::F32(_) => "F32",
            Self::F64(_) => "F64",
            Self::Decimal(_) => "Decimal",
            Self::String(_) => "String",
            Self::Uuid(_) => "Uuid",
            Self::Char(_) => "Char",
            Self::DateTime(_) => "DateTime",
            Self::Bytes(_) => "Bytes",
        }
    }

    /// Converts this value into `T`.
    pub fn to<T: FromValue>(&self) -> Result<T> {
        T::from_value(self)
    }

    /// Widens any integer variant to `i64`.
    fn as_integer(&self) -> Option<i64> {
        match *self {
            Self::Bool(v) => Some(v as i64),
            Self::U8(v) => Some(v as i64),
            Self::I16(v) => Some(v as i64),
            Self::I32(v) => Some(v as i64),
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    fn conversion_error(&self, to_type: &'static str) -> Error {
        Error::type_conversion(self.clone(), to_type)
    }
}

/// Conversion from a stored [`Value`] into a Rust type.
///
/// Drivers report values in their storage class, so conversions accept the
/// lossless representations a database would hand back (an `INTEGER` for a
/// `bool`, `TEXT` for a [`Uuid`], and so on).
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(*v),
            value => value
                .as_integer()
                .map(|v| v != 0)
                .ok_or_else(|| value.conversion_error("bool")),
        }
    }
}

macro_rules! impl_from_value_int {
    ( $( $ty:ident ),* ) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self> {
                    value
                        .as_integer()
                        .and_then(|v| $ty::try_from(v).ok())
                        .ok_or_else(|| value.conversion_error(stringify!($ty)))
                }
            }
        )*
    };
}

impl_from_value_int!(u8, i16, i32, i64);

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::F32(v) => Ok(*v),
            Value::F64(v) => Ok(*v as f32),
            value => value
                .as_integer()
                .map(|v| v as f32)
                .ok_or_else(|| value.conversion_error("f32")),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::F32(v) => Ok(*v as f64),
            Value::F64(v) => Ok(*v),
            value => value
                .as_integer()
                .map(|v| v as f64)
                .ok_or_else(|| value.conversion_error("f64")),
        }
    }
}

impl FromValue for Decimal {
    fn from_value(value: &Value) -> Result<Self> {
        let decimal = match value {
            Value::Decimal(v) => Some(*v),
            Value::String(v) => Decimal::from_str(v).ok(),
            Value::F32(v) => Decimal::try_from(*v).ok(),
            Value::F64(v) => Decimal::try_from(*v).ok(),
            value => value.as_integer().map(Decimal::from),
        };

        decimal.ok_or_else(|| value.conversion_error("Decimal"))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v.clone()),
            Value::Char(v) => Ok(v.to_string()),
            value => Err(value.conversion_error("String")),
        }
    }
}

impl FromValue for Uuid {
    fn from_value(value: &Value) -> Result<Self> {
        let uuid = match value {
            Value::Uuid(v) => Some(*v),
            Value::String(v) => Uuid::parse_str(v).ok(),
            Value::Bytes(v) => Uuid::from_slice(v).ok(),
            _ => None,
        };

        uuid.ok_or_else(|| value.conversion_error("Uuid"))
    }
}

impl FromValue for char {
    fn from_value(value: &Value) -> Result<Self> {
        let ch = match value {
            Value::Char(v) => Some(*v),
            Value::String(v) => {
                let mut chars = v.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(ch),
                    _ => None,
                }
            }
            value => value
                .as_integer()
                .and_then(|v| u32::try_from(v).ok())
                .and_then(char::from_u32),
        };

        ch.ok_or_else(|| value.conversion_error("char"))
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: &Value) -> Result<Self> {
        let datetime = match value {
            Value::DateTime(v) => Some(*v),
            Value::String(v) => parse_datetime(v),
            Value::I64(secs) => chrono::DateTime::from_timestamp(*secs, 0).map(|v| v.naive_utc()),
            _ => None,
        };

        datetime.ok_or_else(|| value.conversion_error("NaiveDateTime"))
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
