use core::fmt;
use core::str::FromStr;

use chrono::NaiveDate;

use crate::access::{AccessError, PropertyAccess, Typed};
use crate::info::{PropertyDescriptor, ScalarKind, ShapeCell, TypeIdent, TypeShape, TypeTag};
use crate::property::{ConvertError, Element, KeyProperty, Property};
use crate::value::{MapKey, ObjectRef, Scalar, Value};

/// A calendar date exchanged as a `YYYY-MM-DD` string.
///
/// The type satisfies the access contract by hand, exposing one property,
/// `value`, and it declares a single-scalar form. Scalar form takes
/// precedence, so a `CalendarDate` field classifies as
/// [`Scalar`](crate::ContainerKind::Scalar) and exports as a string leaf.
///
/// # Examples
///
/// ```
/// use vc_access::{ContainerKind, Property, PropertyAccess, Value, impls::CalendarDate, kind::classify};
///
/// let date: CalendarDate = "2024-02-29".parse().unwrap();
/// assert_eq!(date.get_property("value").unwrap(), Value::from("2024-02-29"));
/// assert_eq!(classify(&CalendarDate::type_tag()), Ok(ContainerKind::Scalar));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// The `chrono` format of the string form.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns `None` for dates that do not exist.
    #[inline]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    #[inline]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    fn parse_value(text: &str) -> Result<Self, ConvertError> {
        text.parse().map_err(|err| ConvertError::Invalid {
            target: "CalendarDate",
            reason: format!("`{text}`: {err}"),
        })
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ConvertError> {
        match scalar {
            Scalar::Str(text) => Self::parse_value(&text),
            other => Err(ConvertError::mismatch::<Self>(other.kind().name())),
        }
    }
}

impl From<NaiveDate> for CalendarDate {
    #[inline]
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for CalendarDate {
    type Err = chrono::ParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, Self::FORMAT).map(Self)
    }
}

impl fmt::Display for CalendarDate {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

// -----------------------------------------------------------------------------
// Contract

const VALUE: &str = "value";

fn date_factory() -> ObjectRef {
    ObjectRef::new(CalendarDate::default())
}

static IDENT: TypeIdent = TypeIdent::new("vc_access::impls::CalendarDate", "CalendarDate")
    .with_factory(date_factory)
    .with_scalar_form(ScalarKind::Str);

impl Typed for CalendarDate {
    #[inline]
    fn type_ident() -> &'static TypeIdent {
        &IDENT
    }

    fn type_shape() -> &'static TypeShape {
        static CELL: ShapeCell = ShapeCell::new();
        CELL.get_or_init(|| TypeShape::new(&IDENT, [PropertyDescriptor::of::<String>(VALUE)]))
    }
}

impl PropertyAccess for CalendarDate {
    #[inline]
    fn shape(&self) -> &'static TypeShape {
        <Self as Typed>::type_shape()
    }

    fn get_property(&self, name: &str) -> Result<Value, AccessError> {
        match name {
            VALUE => Ok(Value::Scalar(Scalar::Str(self.to_string()))),
            _ => Err(AccessError::unknown(&IDENT, name)),
        }
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), AccessError> {
        match name {
            VALUE => {
                let mismatch = |e| AccessError::mismatch(&IDENT, VALUE, e);
                let text = String::from_value(value).map_err(mismatch)?;
                *self = Self::parse_value(&text).map_err(mismatch)?;
                Ok(())
            }
            _ => Err(AccessError::unknown(&IDENT, name)),
        }
    }

    #[inline]
    fn scalar_form(&self) -> Option<Scalar> {
        Some(Scalar::Str(self.to_string()))
    }

    fn set_scalar_form(&mut self, scalar: Scalar) -> Result<(), AccessError> {
        *self = Self::from_scalar(scalar).map_err(|e| AccessError::mismatch(&IDENT, "self", e))?;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Property

impl Property for CalendarDate {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::Opaque(&IDENT)
    }

    #[inline]
    fn to_value(&self) -> Value {
        Value::Scalar(Scalar::Str(self.to_string()))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Scalar(scalar) => Self::from_scalar(scalar),
            Value::Object(object) => match object.downcast::<Self>() {
                Some(shared) => shared.try_borrow().map(|date| *date).map_err(|_| ConvertError::Busy),
                None => Err(ConvertError::mismatch::<Self>("object")),
            },
            other => Err(ConvertError::mismatch::<Self>(other.shape_name())),
        }
    }
}

impl Element for CalendarDate {}

impl KeyProperty for CalendarDate {
    #[inline]
    fn to_key(&self) -> MapKey {
        MapKey::Str(self.to_string())
    }

    fn from_key(key: MapKey) -> Result<Self, ConvertError> {
        Self::from_scalar(key.into())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::CalendarDate;
    use crate::access::{AccessError, PropertyAccess};
    use crate::property::{ConvertError, Property};
    use crate::{ContainerKind, Scalar, Value};

    #[test]
    fn string_form_round_trips() {
        let date = CalendarDate::from_ymd(2023, 7, 4).unwrap();
        assert_eq!(date.to_string(), "2023-07-04");
        assert_eq!("2023-07-04".parse::<CalendarDate>().unwrap(), date);
        assert_eq!(CalendarDate::default().to_string(), "1970-01-01");
    }

    #[test]
    fn contract_by_hand() {
        let mut date = CalendarDate::default();
        assert_eq!(date.property_names().collect::<Vec<_>>(), ["value"]);
        assert_eq!(date.container_kind("value").unwrap(), ContainerKind::Scalar);

        date.set_property("value", Value::from("1999-12-31")).unwrap();
        assert_eq!(date, CalendarDate::from_ymd(1999, 12, 31).unwrap());
        assert_eq!(date.scalar_form(), Some(Scalar::from("1999-12-31")));

        let err = date.set_property("value", Value::from("1999-02-30")).unwrap_err();
        assert!(matches!(
            err,
            AccessError::TypeMismatch { source: ConvertError::Invalid { .. }, .. }
        ));
        assert_eq!(date.to_string(), "1999-12-31");
        assert!(date.get_property("year").is_err());
    }

    #[test]
    fn scalar_form_setter() {
        let mut date = CalendarDate::default();
        date.set_scalar_form(Scalar::from("2000-01-01")).unwrap();
        assert_eq!(date.date().to_string(), "2000-01-01");
        assert!(date.set_scalar_form(Scalar::Int(20000101)).is_err());
    }

    #[test]
    fn property_conversion() {
        let date = CalendarDate::from_ymd(2020, 2, 29).unwrap();
        assert_eq!(date.to_value(), Value::from("2020-02-29"));
        assert_eq!(CalendarDate::from_value(Value::from("2020-02-29")), Ok(date));
        assert!(CalendarDate::from_value(Value::from("29/02/2020")).is_err());
    }
}
