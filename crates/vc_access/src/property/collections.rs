use alloc::collections::{BTreeMap, VecDeque};
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap as StdHashMap;

use indexmap::IndexMap;

use crate::info::{MapShell, TypeTag};
use crate::property::{ConvertError, Element, KeyProperty, Property};
use crate::value::{MapValue, Value};

// -----------------------------------------------------------------------------
// Lists

fn list_from_value<C, T>(value: Value) -> Result<C, ConvertError>
where
    C: Property + FromIterator<T>,
    T: Element,
{
    match value {
        Value::List(items) => items.into_iter().map(T::from_value).collect(),
        other => Err(ConvertError::mismatch::<C>(other.shape_name())),
    }
}

macro_rules! impl_list {
    ($($list:ident),*) => {$(
        impl<T: Element> Property for $list<T> {
            #[inline]
            fn type_tag() -> TypeTag {
                TypeTag::list(T::type_tag())
            }

            fn to_value(&self) -> Value {
                Value::List(self.iter().map(Property::to_value).collect())
            }

            #[inline]
            fn from_value(value: Value) -> Result<Self, ConvertError> {
                list_from_value(value)
            }
        }
    )*};
}

impl_list!(Vec, VecDeque);

// -----------------------------------------------------------------------------
// Maps

fn map_to_value<'a, K, V>(
    shell: MapShell,
    len: usize,
    entries: impl Iterator<Item = (&'a K, &'a V)>,
) -> Value
where
    K: KeyProperty,
    V: Element,
{
    let mut map = MapValue::with_capacity(shell, len);
    for (key, value) in entries {
        map.insert(key.to_key(), value.to_value());
    }
    Value::Map(map)
}

fn map_from_value<M, K, V>(value: Value) -> Result<M, ConvertError>
where
    M: Property + FromIterator<(K, V)>,
    K: KeyProperty,
    V: Element,
{
    match value {
        Value::Map(map) => map
            .into_iter()
            .map(|(key, value)| Ok((K::from_key(key)?, V::from_value(value)?)))
            .collect(),
        other => Err(ConvertError::mismatch::<M>(other.shape_name())),
    }
}

macro_rules! impl_hash_map {
    ($($map:ty: $shell:ident),*) => {$(
        impl<K, V, S> Property for $map
        where
            K: KeyProperty + Hash,
            V: Element,
            S: BuildHasher + Default + 'static,
        {
            #[inline]
            fn type_tag() -> TypeTag {
                TypeTag::map(MapShell::$shell, K::type_tag(), V::type_tag())
            }

            #[inline]
            fn to_value(&self) -> Value {
                map_to_value(MapShell::$shell, self.len(), self.iter())
            }

            #[inline]
            fn from_value(value: Value) -> Result<Self, ConvertError> {
                map_from_value(value)
            }
        }
    )*};
}

impl_hash_map!(
    IndexMap<K, V, S>: Ordered,
    StdHashMap<K, V, S>: Hashed,
    hashbrown::HashMap<K, V, S>: Hashed
);

impl<K, V> Property for BTreeMap<K, V>
where
    K: KeyProperty + Ord,
    V: Element,
{
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::map(MapShell::Sorted, K::type_tag(), V::type_tag())
    }

    #[inline]
    fn to_value(&self) -> Value {
        map_to_value(MapShell::Sorted, self.len(), self.iter())
    }

    #[inline]
    fn from_value(value: Value) -> Result<Self, ConvertError> {
        map_from_value(value)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use std::collections::HashMap;

    use indexmap::IndexMap;

    use crate::info::MapShell;
    use crate::kind::classify;
    use crate::property::{ConvertError, Property};
    use crate::{ContainerKind, MapValue, Value};

    #[test]
    fn list_round_trip_keeps_order() {
        let list = vec![3_u8, 1, 2];
        let value = list.to_value();
        assert_eq!(
            value,
            Value::List(vec![Value::from(3_u64), Value::from(1_u64), Value::from(2_u64)])
        );
        assert_eq!(Vec::<u8>::from_value(value), Ok(list));
    }

    #[test]
    fn list_element_errors_propagate() {
        let value = Value::List(vec![Value::from(1_i64), Value::from("two")]);
        assert!(matches!(
            Vec::<i32>::from_value(value),
            Err(ConvertError::Mismatch { found: "string", .. })
        ));
        assert!(Vec::<i32>::from_value(Value::Null).is_err());
    }

    #[test]
    fn maps_report_their_shell() {
        assert_eq!(<IndexMap<String, u8>>::type_tag().map_shell(), Some(MapShell::Ordered));
        assert_eq!(<BTreeMap<i32, u8>>::type_tag().map_shell(), Some(MapShell::Sorted));
        assert_eq!(<HashMap<bool, u8>>::type_tag().map_shell(), Some(MapShell::Hashed));
        assert_eq!(
            classify(&<hashbrown::HashMap<u64, String>>::type_tag()),
            Ok(ContainerKind::MapScalarValue)
        );
        assert_eq!(
            classify(&<BTreeMap<u64, Option<f32>>>::type_tag()),
            Ok(ContainerKind::MapScalarValue)
        );
    }

    #[test]
    fn sorted_map_rebuilds_from_any_order() {
        let mut value = MapValue::new(MapShell::Sorted);
        value.insert(3_i64, "c");
        value.insert(1_i64, "a");
        let map = BTreeMap::<i32, String>::from_value(Value::Map(value)).unwrap();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3]);

        let Value::Map(exported) = map.to_value() else {
            panic!("expected a map");
        };
        assert_eq!(exported.shell(), MapShell::Sorted);
        assert_eq!(exported.keys().map(ToString::to_string).collect::<Vec<_>>(), ["1", "3"]);
    }

    #[test]
    fn ordered_map_keeps_insertion_order() {
        let mut map = IndexMap::<String, i64>::new();
        map.insert("z".into(), 1);
        map.insert("a".into(), 2);
        let back = IndexMap::<String, i64>::from_value(map.to_value()).unwrap();
        assert_eq!(back.keys().collect::<Vec<_>>(), ["z", "a"]);
    }
}
