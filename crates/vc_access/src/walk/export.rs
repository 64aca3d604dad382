use foldhash::fast::FixedState;
use hashbrown::HashSet;

use crate::access::path::{PathSegment, PropertyPath};
use crate::access::{AccessError, PropertyAccess};
use crate::value::{ObjectRef, Value, identity_of};
use crate::walk::{MapNode, Node, ObjectNode, WalkConfig, WalkError};

/// One export pass.
///
/// `visited` holds the identities of the objects on the current path from
/// the root, so shared subtrees are exported once per reference while
/// cycles are rejected.
pub(super) struct Exporter<'a> {
    config: &'a WalkConfig,
    path: PropertyPath,
    depth: usize,
    visited: HashSet<usize, FixedState>,
}

impl<'a> Exporter<'a> {
    pub(super) fn new(config: &'a WalkConfig) -> Self {
        Self {
            config,
            path: PropertyPath::root(),
            depth: 0,
            visited: HashSet::default(),
        }
    }

    pub(super) fn export_root(mut self, root: &dyn PropertyAccess) -> Result<Node, WalkError> {
        log::debug!("export `{}`", root.identity_type());
        self.object(root, Some(identity_of(root)))
    }

    fn access_error(&self, source: AccessError) -> WalkError {
        WalkError::Access {
            path: self.path.clone(),
            source,
        }
    }

    /// Exports one object. `identity` is set for shared handles only, since
    /// objects held by value cannot close a cycle.
    fn object(
        &mut self,
        object: &dyn PropertyAccess,
        identity: Option<usize>,
    ) -> Result<Node, WalkError> {
        if let Some(scalar) = object.scalar_form() {
            return Ok(Node::Scalar(scalar));
        }
        log::trace!("export `{}` at `{}`", object.identity_type(), self.path);

        if let Some(identity) = identity {
            self.visited.insert(identity);
        }
        let mut fields = ObjectNode::with_capacity_and_hasher(object.shape().len(), FixedState::default());
        for name in object.property_names() {
            self.path.push(PathSegment::Field(name.to_owned()));
            let lent = object
                .property_ref(name)
                .map_err(|source| self.access_error(source))?;
            let node = match lent {
                Some(inner) => self.lent(inner)?,
                None => {
                    let value = object
                        .get_property(name)
                        .map_err(|source| self.access_error(source))?;
                    self.value(value)?
                }
            };
            self.path.pop();

            if node.is_null() && !self.config.emit_absent() {
                continue;
            }
            fields.insert(name.to_owned(), node);
        }
        if let Some(identity) = identity {
            self.visited.remove(&identity);
        }

        Ok(Node::Object(fields))
    }

    fn enter(&self) -> Result<(), WalkError> {
        if self.depth >= self.config.max_depth() {
            return Err(WalkError::DepthExceeded {
                path: self.path.clone(),
                limit: self.config.max_depth(),
            });
        }
        Ok(())
    }

    /// Exports a nested object borrowed from its owner.
    fn lent(&mut self, object: &dyn PropertyAccess) -> Result<Node, WalkError> {
        self.enter()?;
        self.depth += 1;
        let node = self.object(object, None);
        self.depth -= 1;
        node
    }

    fn nested(&mut self, object: &ObjectRef) -> Result<Node, WalkError> {
        let identity = object.identity();
        if self.visited.contains(&identity) {
            let type_path = object
                .try_borrow()
                .map(|inner| inner.identity_type().type_path())
                .unwrap_or("<borrowed>");
            log::warn!("cycle back to `{type_path}` at `{}`", self.path);
            return Err(WalkError::CyclicGraph {
                path: self.path.clone(),
                type_path,
            });
        }
        self.enter()?;
        let Ok(guard) = object.try_borrow() else {
            return Err(WalkError::ObjectBusy {
                path: self.path.clone(),
            });
        };

        self.depth += 1;
        let node = self.object(&*guard, Some(identity));
        self.depth -= 1;
        node
    }

    fn value(&mut self, value: Value) -> Result<Node, WalkError> {
        let node = match value {
            Value::Null => Node::Null,
            Value::Scalar(scalar) => Node::Scalar(scalar),
            Value::Object(object) => self.nested(&object)?,
            Value::List(items) => {
                let mut nodes = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    self.path.push(PathSegment::Index(index));
                    nodes.push(self.value(item)?);
                    self.path.pop();
                }
                Node::List(nodes)
            }
            Value::Map(map) => {
                let mut node = MapNode::with_capacity(map.shell(), map.len());
                for (key, item) in map {
                    self.path.push(PathSegment::Key(key.clone()));
                    let child = self.value(item)?;
                    self.path.pop();
                    node.insert(key, child);
                }
                Node::Map(node)
            }
        };
        Ok(node)
    }
}
