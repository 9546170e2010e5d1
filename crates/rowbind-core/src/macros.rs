/// Returns early with an adhoc [`Error`](crate::Error) built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an adhoc [`Error`](crate::Error) from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// Invokes `$callback!` with one tuple per semantic type:
/// `(SemanticType, NullableAccessor, rust type, Value variant, getter, nullable getter)`.
/// The non-nullable `Accessor` variant shares the semantic type's name.
macro_rules! for_each_accessor {
    ($callback:ident) => {
        $callback! {
            (Byte, NullableByte, u8, U8, get_byte, get_nullable_byte),
            (Int16, NullableInt16, i16, I16, get_int16, get_nullable_int16),
            (Int32, NullableInt32, i32, I32, get_int32, get_nullable_int32),
            (Int64, NullableInt64, i64, I64, get_int64, get_nullable_int64),
            (Float, NullableFloat, f32, F32, get_float, get_nullable_float),
            (Double, NullableDouble, f64, F64, get_double, get_nullable_double),
            (Decimal, NullableDecimal, ::rust_decimal::Decimal, Decimal, get_decimal, get_nullable_decimal),
            (String, NullableString, ::std::string::String, String, get_string, get_nullable_string),
            (Bool, NullableBool, bool, Bool, get_bool, get_nullable_bool),
            (Guid, NullableGuid, ::uuid::Uuid, Uuid, get_guid, get_nullable_guid),
            (Char, NullableChar, char, Char, get_char, get_nullable_char),
            (DateTime, NullableDateTime, ::chrono::NaiveDateTime, DateTime, get_datetime, get_nullable_datetime),
        }
    };
}
