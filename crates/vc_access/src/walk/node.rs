use core::fmt;

use foldhash::fast::FixedState;
use indexmap::IndexMap;

use crate::info::MapShell;
use crate::value::{MapKey, Scalar};

/// The fields of an exported object, in property order.
pub type ObjectNode = IndexMap<String, Node, FixedState>;

/// A format-agnostic tree produced by export and consumed by import.
///
/// Note that `==` on objects and maps ignores entry order. Compare
/// the key sequences when order matters.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    /// An absent value.
    #[default]
    Null,
    Scalar(Scalar),
    Object(ObjectNode),
    List(Vec<Node>),
    Map(MapNode),
}

impl Node {
    /// Builds an object node from `(name, node)` pairs.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Node)>) -> Self {
        Self::Object(
            fields
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        )
    }

    #[inline]
    pub fn scalar(value: impl Into<Scalar>) -> Self {
        Self::Scalar(value.into())
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns a short name of the node's structure, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(_) => "scalar",
            Self::Object(_) => "object",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    #[inline]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&MapNode> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the field `name` of an object node.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.as_object().and_then(|fields| fields.get(name))
    }
}

impl From<Scalar> for Node {
    #[inline]
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<MapNode> for Node {
    #[inline]
    fn from(value: MapNode) -> Self {
        Self::Map(value)
    }
}

/// Entries of an exported map, plus the shell of the source container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapNode {
    pub shell: MapShell,
    pub entries: IndexMap<MapKey, Node, FixedState>,
}

impl MapNode {
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
    pub fn insert(&mut self, key: impl Into<MapKey>, node: Node) -> Option<Node> {
        self.entries.insert(key.into(), node)
    }

    #[inline]
    pub fn get(&self, key: &MapKey) -> Option<&Node> {
        self.entries.get(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Node {
    /// A compact, JSON-like rendering for logs and diffs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Scalar(Scalar::Str(text)) => write!(f, "{text:?}"),
            Self::Scalar(scalar) => write!(f, "{scalar}"),
            Self::Object(fields) => {
                f.write_str("{")?;
                for (index, (name, node)) in fields.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {node}")?;
                }
                f.write_str("}")
            }
            Self::List(items) => {
                f.write_str("[")?;
                for (index, node) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{node}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (index, (key, node)) in map.entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    match key {
                        MapKey::Str(text) => write!(f, "{text:?}: {node}")?,
                        key => write!(f, "{key}: {node}")?,
                    }
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MapNode, Node};
    use crate::info::MapShell;

    #[test]
    fn display() {
        let mut map = MapNode::new(MapShell::Ordered);
        map.insert(2_u64, Node::scalar(true));
        let node = Node::object([
            ("name", Node::scalar("ada")),
            ("tags", Node::List(vec![Node::scalar(1_i64), Node::Null])),
            ("ids", Node::Map(map)),
        ]);
        assert_eq!(node.to_string(), r#"{name: "ada", tags: [1, null], ids: {2: true}}"#);
        assert_eq!(node.get("name").and_then(Node::as_scalar).and_then(|s| s.as_str()), Some("ada"));
    }
}
