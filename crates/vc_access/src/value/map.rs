use core::fmt;

use foldhash::fast::FixedState;
use indexmap::IndexMap;

use crate::info::{MapShell, ScalarKind};
use crate::value::{Scalar, Value};

// -----------------------------------------------------------------------------
// MapKey

/// A map key: any scalar except floats.
///
/// Keys order as booleans, then signed, then unsigned integers, then
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Str(String),
}

impl MapKey {
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::Int(_) => ScalarKind::Int,
            Self::UInt(_) => ScalarKind::UInt,
            Self::Str(_) => ScalarKind::Str,
        }
    }

    /// Converts the key to `kind`, parsing strings when needed.
    ///
    /// Used to restore typed keys from formats that only allow string keys.
    ///
    /// ```
    /// use vc_access::{MapKey, info::ScalarKind};
    ///
    /// let key = MapKey::from("42");
    /// assert_eq!(key.coerce_to(ScalarKind::UInt), Some(MapKey::UInt(42)));
    /// assert_eq!(MapKey::Int(-1).coerce_to(ScalarKind::UInt), None);
    /// ```
    pub fn coerce_to(self, kind: ScalarKind) -> Option<Self> {
        match (self, kind) {
            (key, kind) if key.kind() == kind => Some(key),
            (Self::Int(v), ScalarKind::UInt) => u64::try_from(v).ok().map(Self::UInt),
            (Self::UInt(v), ScalarKind::Int) => i64::try_from(v).ok().map(Self::Int),
            (Self::Str(s), ScalarKind::Bool) => s.parse().ok().map(Self::Bool),
            (Self::Str(s), ScalarKind::Int) => s.parse().ok().map(Self::Int),
            (Self::Str(s), ScalarKind::UInt) => s.parse().ok().map(Self::UInt),
            (key, ScalarKind::Str) => Some(Self::Str(key.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl From<MapKey> for Scalar {
    #[inline]
    fn from(key: MapKey) -> Self {
        match key {
            MapKey::Bool(v) => Self::Bool(v),
            MapKey::Int(v) => Self::Int(v),
            MapKey::UInt(v) => Self::UInt(v),
            MapKey::Str(v) => Self::Str(v),
        }
    }
}

impl TryFrom<Scalar> for MapKey {
    type Error = Scalar;

    /// Fails for floats, returning the scalar unchanged.
    #[inline]
    fn try_from(scalar: Scalar) -> Result<Self, Self::Error> {
        match scalar {
            Scalar::Bool(v) => Ok(Self::Bool(v)),
            Scalar::Int(v) => Ok(Self::Int(v)),
            Scalar::UInt(v) => Ok(Self::UInt(v)),
            Scalar::Str(v) => Ok(Self::Str(v)),
            Scalar::Float(_) => Err(scalar),
        }
    }
}

impl From<&str> for MapKey {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for MapKey {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for MapKey {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for MapKey {
    #[inline]
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

// -----------------------------------------------------------------------------
// MapValue

/// Map entries plus the [`MapShell`] the target container uses.
///
/// Entries keep insertion order. Converting into a sorted or hashed
/// container is left to the receiving property.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapValue {
    shell: MapShell,
    entries: IndexMap<MapKey, Value, FixedState>,
}

impl MapValue {
    #[inline]
    pub fn new(shell: MapShell) -> Self {
        Self {
            shell,
            entries: IndexMap::default(),
        }
    }

    #[inline]
    pub fn with_capacity(shell: MapShell, capacity: usize) -> Self {
        Self {
            shell,
            entries: IndexMap::with_capacity_and_hasher(capacity, FixedState::default()),
        }
    }

    #[inline]
    pub const fn shell(&self) -> MapShell {
        self.shell
    }

    /// Inserts an entry, returning the previous value of `key`.
    ///
    /// A replaced key keeps its original position.
    #[inline]
    pub fn insert(&mut self, key: impl Into<MapKey>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    #[inline]
    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, MapKey, Value> {
        self.entries.iter()
    }

    #[inline]
    pub fn keys(&self) -> indexmap::map::Keys<'_, MapKey, Value> {
        self.entries.keys()
    }
}

impl IntoIterator for MapValue {
    type Item = (MapKey, Value);
    type IntoIter = indexmap::map::IntoIter<MapKey, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a MapValue {
    type Item = (&'a MapKey, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, MapKey, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{MapKey, MapValue};
    use crate::info::{MapShell, ScalarKind};

    #[test]
    fn insertion_order_is_kept() {
        let mut map = MapValue::new(MapShell::Sorted);
        map.insert("b", 1_i64);
        map.insert("a", 2_i64);
        map.insert("b", 3_i64);
        let keys: Vec<String> = map.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(map.shell(), MapShell::Sorted);
    }

    #[test]
    fn coercion() {
        assert_eq!(MapKey::from("true").coerce_to(ScalarKind::Bool), Some(MapKey::Bool(true)));
        assert_eq!(MapKey::from("-3").coerce_to(ScalarKind::Int), Some(MapKey::Int(-3)));
        assert_eq!(MapKey::UInt(9).coerce_to(ScalarKind::Str), Some(MapKey::from("9")));
        assert_eq!(MapKey::from("x").coerce_to(ScalarKind::Int), None);
        assert_eq!(MapKey::Int(1).coerce_to(ScalarKind::Float), None);
    }
}
