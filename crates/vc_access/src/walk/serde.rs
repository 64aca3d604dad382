use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{Error, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{SerializeMap, SerializeSeq};
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

use crate::info::MapShell;
use crate::value::{MapKey, Scalar};
use crate::walk::{MapNode, Node};

const MAX_PREALLOC: usize = 4096;

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::UInt(value) => serializer.serialize_u64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Str(value) => serializer.serialize_str(value),
        }
    }
}

impl Serialize for MapKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::UInt(value) => serializer.serialize_u64(*value),
            Self::Str(value) => serializer.serialize_str(value),
        }
    }
}

/// Objects and maps both serialize as maps, absent values as `none`.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, node) in fields {
                    map.serialize_entry(name, node)?;
                }
                map.end()
            }
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for node in items {
                    seq.serialize_element(node)?;
                }
                seq.end()
            }
            Self::Map(map_node) => {
                let mut map = serializer.serialize_map(Some(map_node.len()))?;
                for (key, node) in &map_node.entries {
                    map.serialize_entry(key, node)?;
                }
                map.end()
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Deserialize

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar, list, map or null")
    }

    fn visit_bool<E: Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Bool(v)))
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Int(v)))
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::UInt(v)))
    }

    fn visit_i128<E: Error>(self, v: i128) -> Result<Node, E> {
        match i64::try_from(v) {
            Ok(v) => self.visit_i64(v),
            Err(_) => self.visit_u128(u128::try_from(v).map_err(|_| E::custom("integer out of range"))?),
        }
    }

    fn visit_u128<E: Error>(self, v: u128) -> Result<Node, E> {
        u64::try_from(v)
            .map(|v| Node::Scalar(Scalar::UInt(v)))
            .map_err(|_| E::custom("integer out of range"))
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Float(v)))
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Str(v.into())))
    }

    fn visit_string<E: Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Str(v)))
    }

    fn visit_char<E: Error>(self, v: char) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Str(v.into())))
    }

    fn visit_unit<E: Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_none<E: Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(MAX_PREALLOC));
        while let Some(node) = seq.next_element::<Node>()? {
            items.push(node);
        }
        Ok(Node::List(items))
    }

    /// A map whose keys are all strings becomes an object node.
    ///
    /// The importer accepts object nodes for map properties, so nothing is
    /// lost for string-keyed formats.
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Node, A::Error> {
        let capacity = access.size_hint().unwrap_or(0).min(MAX_PREALLOC);
        let mut map = MapNode::with_capacity(MapShell::Ordered, capacity);
        while let Some((key, node)) = access.next_entry::<MapKey, Node>()? {
            map.insert(key, node);
        }

        if map.entries.keys().all(|key| matches!(key, MapKey::Str(_))) {
            let fields = map
                .entries
                .into_iter()
                .filter_map(|(key, node)| match key {
                    MapKey::Str(name) => Some((name, node)),
                    _ => None,
                });
            return Ok(Node::object(fields));
        }
        Ok(Node::Map(map))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct MapKeyVisitor;

impl<'de> Visitor<'de> for MapKeyVisitor {
    type Value = MapKey;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a bool, integer or string map key")
    }

    fn visit_bool<E: Error>(self, v: bool) -> Result<MapKey, E> {
        Ok(MapKey::Bool(v))
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<MapKey, E> {
        Ok(MapKey::Int(v))
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<MapKey, E> {
        Ok(MapKey::UInt(v))
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<MapKey, E> {
        Ok(MapKey::Str(v.into()))
    }

    fn visit_string<E: Error>(self, v: String) -> Result<MapKey, E> {
        Ok(MapKey::Str(v))
    }

    fn visit_char<E: Error>(self, v: char) -> Result<MapKey, E> {
        Ok(MapKey::Str(v.into()))
    }
}

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MapKeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::info::MapShell;
    use crate::walk::{MapNode, Node};

    #[test]
    fn json_round_trip() {
        let node = Node::object([
            ("name", Node::scalar("Ada")),
            ("age", Node::Null),
            ("scores", Node::List(vec![Node::scalar(1_u64), Node::scalar(-2_i64)])),
            ("ratio", Node::scalar(0.5)),
        ]);
        let text = serde_json::to_string(&node).unwrap();
        assert_eq!(
            text,
            r#"{"name":"Ada","age":null,"scores":[1,-2],"ratio":0.5}"#
        );
        let back: Node = serde_json::from_str(&text).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn integer_keys_stay_a_map_in_ron() {
        let mut map = MapNode::new(MapShell::Ordered);
        map.insert(3_u64, Node::scalar("c"));
        map.insert(1_u64, Node::scalar("a"));
        let node = Node::Map(map);

        let text = ron::to_string(&node).unwrap();
        let back: Node = ron::from_str(&text).unwrap();
        let keys: Vec<String> = back
            .as_map()
            .unwrap()
            .entries
            .keys()
            .map(ToString::to_string)
            .collect();
        assert_eq!(keys, ["3", "1"]);
    }
}
