use core::fmt;

use crate::access::path::{PathSegment, PropertyPath};
use crate::walk::Node;

/// One structural difference between two exported trees.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub path: PropertyPath,
    pub kind: DifferenceKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DifferenceKind {
    /// Both sides hold a leaf, and the leaves differ. Null counts as a leaf.
    Changed { left: Node, right: Node },
    /// The entry exists on the left side only.
    OnlyLeft(Node),
    /// The entry exists on the right side only.
    OnlyRight(Node),
    /// The sides have different structures, e.g. a list and a map.
    TypeChanged {
        left: &'static str,
        right: &'static str,
    },
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DifferenceKind::Changed { left, right } => {
                write!(f, "`{}`: {left} -> {right}", self.path)
            }
            DifferenceKind::OnlyLeft(node) => write!(f, "`{}`: removed {node}", self.path),
            DifferenceKind::OnlyRight(node) => write!(f, "`{}`: added {node}", self.path),
            DifferenceKind::TypeChanged { left, right } => {
                write!(f, "`{}`: {left} became {right}", self.path)
            }
        }
    }
}

/// Compares two exported trees.
///
/// Object fields and map entries are matched by name or key, list items by
/// index. Integers compare by value across signed and unsigned kinds.
/// Differences are reported in left-side order, followed by entries only
/// present on the right.
pub fn diff_nodes(left: &Node, right: &Node) -> Vec<Difference> {
    let mut differ = Differ {
        path: PropertyPath::root(),
        out: Vec::new(),
    };
    differ.node(left, right);
    differ.out
}

struct Differ {
    path: PropertyPath,
    out: Vec<Difference>,
}

impl Differ {
    fn report(&mut self, kind: DifferenceKind) {
        self.out.push(Difference {
            path: self.path.clone(),
            kind,
        });
    }

    fn at(&mut self, segment: PathSegment, left: Option<&Node>, right: Option<&Node>) {
        self.path.push(segment);
        match (left, right) {
            (Some(left), Some(right)) => self.node(left, right),
            (Some(left), None) => self.report(DifferenceKind::OnlyLeft(left.clone())),
            (None, Some(right)) => self.report(DifferenceKind::OnlyRight(right.clone())),
            (None, None) => {}
        }
        self.path.pop();
    }

    fn node(&mut self, left: &Node, right: &Node) {
        match (left, right) {
            (Node::Null, Node::Null) => {}
            (Node::Scalar(a), Node::Scalar(b)) if a.numeric_eq(b) => {}
            (Node::Null | Node::Scalar(_), Node::Null | Node::Scalar(_)) => {
                self.report(DifferenceKind::Changed {
                    left: left.clone(),
                    right: right.clone(),
                });
            }
            (Node::Object(a), Node::Object(b)) => {
                for (name, node) in a {
                    self.at(PathSegment::Field(name.clone()), Some(node), b.get(name));
                }
                for (name, node) in b.iter().filter(|(name, _)| !a.contains_key(*name)) {
                    self.at(PathSegment::Field(name.clone()), None, Some(node));
                }
            }
            (Node::List(a), Node::List(b)) => {
                for index in 0..a.len().max(b.len()) {
                    self.at(PathSegment::Index(index), a.get(index), b.get(index));
                }
            }
            (Node::Map(a), Node::Map(b)) => {
                for (key, node) in &a.entries {
                    self.at(PathSegment::Key(key.clone()), Some(node), b.get(key));
                }
                for (key, node) in b.entries.iter().filter(|(key, _)| !a.entries.contains_key(*key)) {
                    self.at(PathSegment::Key(key.clone()), None, Some(node));
                }
            }
            _ => self.report(DifferenceKind::TypeChanged {
                left: left.kind_name(),
                right: right.kind_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DifferenceKind, diff_nodes};
    use crate::walk::Node;

    #[test]
    fn reports_paths_in_order() {
        let left = Node::object([
            ("name", Node::scalar("a")),
            ("tags", Node::List(vec![Node::scalar("x"), Node::scalar("y")])),
            ("gone", Node::Null),
        ]);
        let right = Node::object([
            ("name", Node::scalar("b")),
            ("tags", Node::List(vec![Node::scalar("x")])),
            ("new", Node::scalar(1_u64)),
        ]);
        let diffs = diff_nodes(&left, &right);
        let rendered: Vec<String> = diffs.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                r#"`name`: "a" -> "b""#,
                r#"`tags[1]`: removed "y""#,
                "`gone`: removed null",
                "`new`: added 1",
            ]
        );
    }

    #[test]
    fn integer_kinds_compare_by_value() {
        assert!(diff_nodes(&Node::scalar(3_i64), &Node::scalar(3_u64)).is_empty());
        let diffs = diff_nodes(&Node::List(vec![]), &Node::object([("a", Node::Null)]));
        assert_eq!(
            diffs[0].kind,
            DifferenceKind::TypeChanged {
                left: "list",
                right: "object"
            }
        );
    }

    #[test]
    fn nan_matches_nan() {
        let node = Node::object([("x", Node::scalar(f64::NAN))]);
        assert!(diff_nodes(&node, &node).is_empty());
        assert_eq!(diff_nodes(&node, &Node::object([("x", Node::scalar(0.0))])).len(), 1);
    }
}
