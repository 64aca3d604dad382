use crate::info::{ScalarKind, TypeTag};
use crate::property::{ConvertError, Element, KeyProperty, Property, expect_scalar, key_via_value};
use crate::value::{MapKey, Scalar, Value};

macro_rules! impl_integer {
    ($variant:ident, $wide:ty, $kind:ident: $($ty:ty),* $(,)?) => {$(
        impl Property for $ty {
            #[inline]
            fn type_tag() -> TypeTag {
                TypeTag::Scalar(ScalarKind::$kind)
            }

            #[inline]
            fn to_value(&self) -> Value {
                Value::Scalar(Scalar::$variant(*self as $wide))
            }

            fn from_value(value: Value) -> Result<Self, ConvertError> {
                let wide = match expect_scalar::<Self>(value)? {
                    Scalar::Int(v) => i128::from(v),
                    Scalar::UInt(v) => i128::from(v),
                    other => return Err(ConvertError::mismatch::<Self>(other.kind().name())),
                };
                <$ty>::try_from(wide).map_err(|_| ConvertError::OutOfRange {
                    target: stringify!($ty),
                    value: wide.to_string(),
                })
            }
        }

        impl Element for $ty {}

        impl KeyProperty for $ty {
            #[inline]
            fn to_key(&self) -> MapKey {
                MapKey::$variant(*self as $wide)
            }

            #[inline]
            fn from_key(key: MapKey) -> Result<Self, ConvertError> {
                key_via_value(key, ScalarKind::$kind)
            }
        }
    )*};
}

impl_integer!(Int, i64, Int: i8, i16, i32, i64, isize);
impl_integer!(UInt, u64, UInt: u8, u16, u32, u64, usize);

// -----------------------------------------------------------------------------
// Floats

impl Property for f64 {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::Scalar(ScalarKind::Float)
    }

    #[inline]
    fn to_value(&self) -> Value {
        Value::Scalar(Scalar::Float(*self))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        let scalar = expect_scalar::<Self>(value)?;
        if let Some(v) = scalar.to_f64() {
            return Ok(v);
        }
        match scalar {
            Scalar::Int(_) | Scalar::UInt(_) => Err(ConvertError::OutOfRange {
                target: "f64",
                value: scalar.to_string(),
            }),
            other => Err(ConvertError::mismatch::<Self>(other.kind().name())),
        }
    }
}

impl Element for f64 {}

impl Property for f32 {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::Scalar(ScalarKind::Float)
    }

    #[inline]
    fn to_value(&self) -> Value {
        Value::Scalar(Scalar::Float(f64::from(*self)))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        let wide = f64::from_value(value).map_err(|err| match err {
            ConvertError::Mismatch { found, .. } => ConvertError::mismatch::<Self>(found),
            err => err,
        })?;
        let narrow = wide as f32;
        if wide.is_nan() || f64::from(narrow) == wide {
            Ok(narrow)
        } else {
            Err(ConvertError::OutOfRange {
                target: "f32",
                value: wide.to_string(),
            })
        }
    }
}

impl Element for f32 {}

// -----------------------------------------------------------------------------
// bool & String

impl Property for bool {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::Scalar(ScalarKind::Bool)
    }

    #[inline]
    fn to_value(&self) -> Value {
        Value::Scalar(Scalar::Bool(*self))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match expect_scalar::<Self>(value)? {
            Scalar::Bool(v) => Ok(v),
            other => Err(ConvertError::mismatch::<Self>(other.kind().name())),
        }
    }
}

impl Element for bool {}

impl KeyProperty for bool {
    #[inline]
    fn to_key(&self) -> MapKey {
        MapKey::Bool(*self)
    }

    #[inline]
    fn from_key(key: MapKey) -> Result<Self, ConvertError> {
        key_via_value(key, ScalarKind::Bool)
    }
}

impl Property for String {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::Scalar(ScalarKind::Str)
    }

    #[inline]
    fn to_value(&self) -> Value {
        Value::Scalar(Scalar::Str(self.clone()))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match expect_scalar::<Self>(value)? {
            Scalar::Str(v) => Ok(v),
            other => Err(ConvertError::mismatch::<Self>(other.kind().name())),
        }
    }
}

impl Element for String {}

impl KeyProperty for String {
    #[inline]
    fn to_key(&self) -> MapKey {
        MapKey::Str(self.clone())
    }

    fn from_key(key: MapKey) -> Result<Self, ConvertError> {
        match key {
            MapKey::Str(v) => Ok(v),
            other => Err(ConvertError::mismatch::<Self>(other.kind().name())),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::property::{ConvertError, KeyProperty, Property};
    use crate::{MapKey, Scalar, Value};

    #[test]
    fn integers_normalize_losslessly() {
        assert_eq!(u8::from_value(Value::from(200_i64)), Ok(200));
        assert_eq!(i32::from_value(Value::from(7_u64)), Ok(7));
        assert_eq!(u64::from_value(Value::from(u64::MAX)), Ok(u64::MAX));
        assert!(matches!(
            u8::from_value(Value::from(256_i64)),
            Err(ConvertError::OutOfRange { target: "u8", .. })
        ));
        assert!(matches!(
            u32::from_value(Value::from(-1_i64)),
            Err(ConvertError::OutOfRange { .. })
        ));
        assert!(matches!(
            i64::from_value(Value::from(1.0)),
            Err(ConvertError::Mismatch { found: "float", .. })
        ));
    }

    #[test]
    fn floats() {
        assert_eq!(f64::from_value(Value::from(3_i64)), Ok(3.0));
        assert_eq!(f32::from_value(Value::from(0.5)), Ok(0.5));
        assert!(f32::from_value(Value::from(0.1)).is_err());
        assert_eq!(f32::from_value(0.1_f32.to_value()), Ok(0.1_f32));
        assert!(matches!(
            f64::from_value(Value::from(u64::MAX)),
            Err(ConvertError::OutOfRange { .. })
        ));
    }

    #[test]
    fn option_maps_null() {
        assert_eq!(Option::<String>::from_value(Value::Null), Ok(None));
        assert_eq!(Some(4_u16).to_value(), Value::Scalar(Scalar::UInt(4)));
        assert!(matches!(
            String::from_value(Value::Null),
            Err(ConvertError::Mismatch { found: "null", .. })
        ));
        assert!(bool::from_value(Value::from("true")).is_err());
    }

    #[test]
    fn keys_parse_strings() {
        assert_eq!(u16::from_key(MapKey::from("65535")), Ok(u16::MAX));
        assert_eq!(bool::from_key(MapKey::from("false")), Ok(false));
        assert_eq!(i8::from_key(MapKey::UInt(5)), Ok(5));
        assert!(i8::from_key(MapKey::from("five")).is_err());
        assert_eq!(String::from_key(MapKey::from("x")), Ok("x".to_owned()));
        assert_eq!((-3_i16).to_key(), MapKey::Int(-3));
    }
}
