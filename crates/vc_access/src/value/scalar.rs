use core::fmt;

use crate::info::ScalarKind;

/// Largest integer magnitude an `f64` represents exactly.
const F64_EXACT: u64 = 1 << 53;

/// A primitive leaf value.
///
/// Integers are widened to 64 bits. The `to_*` accessors normalize between
/// numeric kinds when, and only when, the conversion is lossless.
///
/// # Examples
///
/// ```
/// use vc_access::Scalar;
///
/// assert_eq!(Scalar::UInt(7).to_i64(), Some(7));
/// assert_eq!(Scalar::Int(-1).to_u64(), None);
/// assert_eq!(Scalar::Int(3).to_f64(), Some(3.0));
/// assert_eq!(Scalar::Float(0.5).to_i64(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl Scalar {
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::Int(_) => ScalarKind::Int,
            Self::UInt(_) => ScalarKind::UInt,
            Self::Float(_) => ScalarKind::Float,
            Self::Str(_) => ScalarKind::Str,
        }
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a signed integer, if it is an integer in range.
    pub fn to_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            Self::UInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Returns the value as an unsigned integer, if it is an integer in range.
    pub fn to_u64(&self) -> Option<u64> {
        match *self {
            Self::Int(v) => u64::try_from(v).ok(),
            Self::UInt(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a float. Integers beyond 2^53 are rejected.
    pub fn to_f64(&self) -> Option<f64> {
        match *self {
            Self::Float(v) => Some(v),
            Self::Int(v) if v.unsigned_abs() <= F64_EXACT => Some(v as f64),
            Self::UInt(v) if v <= F64_EXACT => Some(v as f64),
            _ => None,
        }
    }

    /// Compares numbers by value across integer kinds.
    ///
    /// `Int(1)` and `UInt(1)` are equal here but not under `==`. Unlike `==`,
    /// `NaN` equals `NaN`, so a copied float compares equal to its source.
    pub fn numeric_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Int(_) | Self::UInt(_), Self::Int(_) | Self::UInt(_)) => {
                self.to_i64().zip(other.to_i64()).is_some_and(|(a, b)| a == b)
                    || self.to_u64().zip(other.to_u64()).is_some_and(|(a, b)| a == b)
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Scalar {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($variant:ident: $wide:ty => $($ty:ty),*) => {$(
        impl From<$ty> for Scalar {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::$variant(<$wide>::from(value))
            }
        }
    )*};
}

impl_from_int!(Int: i64 => i8, i16, i32, i64);
impl_from_int!(UInt: u64 => u8, u16, u32, u64);

impl From<f64> for Scalar {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for Scalar {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for Scalar {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}
