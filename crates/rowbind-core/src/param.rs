use crate::{SemanticType, TypeTag, Value};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A bound parameter: the value plus the type it was bound as.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub value: Value,
    pub ty: TypeTag,
}

impl Param {
    pub fn new(value: Value, ty: TypeTag) -> Param {
        Param { value, ty }
    }
}

/// Types that can be bound as a command parameter.
pub trait ToParam {
    /// Static type of the bound value.
    const TAG: TypeTag;

    fn to_value(&self) -> Value;

    fn to_param(&self) -> Param {
        Param::new(self.to_value(), Self::TAG)
    }
}

/// Marker for the non-optional parameter types, so `Option<T>` can be bound
/// as a nullable parameter of the same semantic type.
pub trait Scalar: ToParam {}

impl<T: Scalar> ToParam for Option<T> {
    const TAG: TypeTag = TypeTag::nullable(T::TAG.ty);

    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToParam + ?Sized> ToParam for &T {
    const TAG: TypeTag = T::TAG;

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Scalar + ?Sized> Scalar for &T {}

impl ToParam for str {
    const TAG: TypeTag = TypeTag::required(SemanticType::String);

    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Scalar for str {}

macro_rules! impl_scalar {
    ( $( $ty:ty => $sem:ident, $variant:ident; )* ) => {
        $(
            impl ToParam for $ty {
                const TAG: TypeTag = TypeTag::required(SemanticType::$sem);

                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }
            }

            impl Scalar for $ty {}
        )*
    };
}

impl_scalar! {
    u8 => Byte, U8;
    i16 => Int16, I16;
    i32 => Int32, I32;
    i64 => Int64, I64;
    f32 => Float, F32;
    f64 => Double, F64;
    Decimal => Decimal, Decimal;
    String => String, String;
    bool => Bool, Bool;
    Uuid => Guid, Uuid;
    char => Char, Char;
    NaiveDateTime => DateTime, DateTime;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_param() {
        let param = 5i32.to_param();
        assert_eq!(param.value, Value::I32(5));
        assert_eq!(param.ty, TypeTag::required(SemanticType::Int32));
    }

    #[test]
    fn none_is_typed_null() {
        let param = None::<Uuid>.to_param();
        assert_eq!(param.value, Value::Null);
        assert_eq!(param.ty, TypeTag::nullable(SemanticType::Guid));

        let param = Some('x').to_param();
        assert_eq!(param.value, Value::Char('x'));
        assert_eq!(param.ty, TypeTag::nullable(SemanticType::Char));
    }

    #[test]
    fn references_and_str() {
        let name = String::from("O'Brien");
        assert_eq!((&name).to_value(), Value::String("O'Brien".into()));
        assert_eq!("O'Brien".to_param().ty, TypeTag::required(SemanticType::String));
        assert_eq!((&&7u8).to_value(), Value::U8(7));
    }

    #[test]
    fn optional_str() {
        let note: Option<&str> = Some("milk");
        assert_eq!(note.to_value(), Value::String("milk".into()));
        assert_eq!(
            None::<&str>.to_param().ty,
            TypeTag::nullable(SemanticType::String)
        );
    }
}
