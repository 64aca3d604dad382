use crate::access::path::{PathSegment, PropertyPath};
use crate::access::{AccessError, PropertyAccess};
use crate::info::ScalarKind;
use crate::kind::ContainerKind;
use crate::value::{MapKey, MapValue, ObjectRef, Value};
use crate::walk::{Node, WalkConfig, WalkError};

/// One import pass.
pub(super) struct Importer<'a> {
    config: &'a WalkConfig,
    path: PropertyPath,
    depth: usize,
}

impl<'a> Importer<'a> {
    pub(super) fn new(config: &'a WalkConfig) -> Self {
        Self {
            config,
            path: PropertyPath::root(),
            depth: 0,
        }
    }

    pub(super) fn import_root(
        mut self,
        node: &Node,
        target: &mut dyn PropertyAccess,
    ) -> Result<(), WalkError> {
        log::debug!("import into `{}`", target.identity_type());
        self.object(node, target)
    }

    // -------------------------------------------------------------------------
    // Errors

    fn access_error(&self, source: AccessError) -> WalkError {
        WalkError::Access {
            path: self.path.clone(),
            source,
        }
    }

    fn shape_mismatch(&self, expected: &'static str, found: &Node) -> WalkError {
        WalkError::ShapeMismatch {
            path: self.path.clone(),
            expected,
            found: found.kind_name(),
        }
    }

    // -------------------------------------------------------------------------
    // Objects

    fn object(&mut self, node: &Node, target: &mut dyn PropertyAccess) -> Result<(), WalkError> {
        match node {
            Node::Object(fields) => {
                log::trace!("import `{}` at `{}`", target.identity_type(), self.path);
                for (name, child) in fields {
                    self.path.push(PathSegment::Field(name.clone()));
                    self.property(target, name, child)?;
                    self.path.pop();
                }
                Ok(())
            }
            Node::Scalar(scalar) if target.scalar_form().is_some() => target
                .set_scalar_form(scalar.clone())
                .map_err(|source| self.access_error(source)),
            other => Err(self.shape_mismatch("object", other)),
        }
    }

    /// Imports `node` into a freshly created or existing object.
    fn into_object(&mut self, node: &Node, object: &ObjectRef) -> Result<(), WalkError> {
        if self.depth >= self.config.max_depth() {
            return Err(WalkError::DepthExceeded {
                path: self.path.clone(),
                limit: self.config.max_depth(),
            });
        }
        let Ok(mut guard) = object.try_borrow_mut() else {
            return Err(WalkError::ObjectBusy {
                path: self.path.clone(),
            });
        };

        self.depth += 1;
        let result = self.object(node, &mut *guard);
        self.depth -= 1;
        result
    }

    fn property(
        &mut self,
        target: &mut dyn PropertyAccess,
        name: &str,
        node: &Node,
    ) -> Result<(), WalkError> {
        let kind = match target.container_kind(name) {
            Ok(kind) => kind,
            Err(AccessError::UnknownProperty { .. }) if !self.config.deny_unknown() => {
                log::warn!(
                    "skipping unknown property `{name}` of `{}`",
                    target.identity_type()
                );
                return Ok(());
            }
            Err(source) => return Err(self.access_error(source)),
        };

        let value = match kind {
            ContainerKind::Scalar => self.scalar(node)?,
            ContainerKind::NestedObject => self.nested_object(target, name, node)?,
            ContainerKind::ListOfScalar | ContainerKind::ListOfObject => {
                self.list(target, name, kind, node)?
            }
            ContainerKind::MapScalarValue | ContainerKind::MapObjectValue => {
                self.map(target, name, kind, node)?
            }
        };

        target
            .set_property(name, value)
            .map_err(|source| self.access_error(source))
    }

    /// Merges into the current nested object, or fills an empty slot from
    /// the factory.
    fn nested_object(
        &mut self,
        target: &dyn PropertyAccess,
        name: &str,
        node: &Node,
    ) -> Result<Value, WalkError> {
        if node.is_null() {
            return Ok(Value::Null);
        }
        if !matches!(node, Node::Object(_)) {
            return Err(self.shape_mismatch("object", node));
        }
        let object = match target.get_property(name) {
            Ok(Value::Object(object)) => object,
            Ok(_) => target
                .create_nested_instance(name)
                .map_err(|source| self.access_error(source))?,
            Err(source) => return Err(self.access_error(source)),
        };
        self.into_object(node, &object)?;
        Ok(Value::Object(object))
    }

    // -------------------------------------------------------------------------
    // Containers

    fn scalar(&self, node: &Node) -> Result<Value, WalkError> {
        match node {
            Node::Null => Ok(Value::Null),
            Node::Scalar(scalar) => Ok(Value::Scalar(scalar.clone())),
            other => Err(self.shape_mismatch("scalar", other)),
        }
    }

    /// Converts one leaf, list element or map value.
    fn element(
        &mut self,
        node: &Node,
        kind: ContainerKind,
        create: impl FnOnce() -> Result<ObjectRef, AccessError>,
    ) -> Result<Value, WalkError> {
        match (kind.element_kind(), node) {
            (ContainerKind::Scalar, _) => self.scalar(node),
            (_, Node::Null) => Ok(Value::Null),
            (_, Node::Object(_)) => {
                let object = create().map_err(|source| self.access_error(source))?;
                self.into_object(node, &object)?;
                Ok(Value::Object(object))
            }
            (_, other) => Err(self.shape_mismatch("object", other)),
        }
    }

    fn list(
        &mut self,
        target: &dyn PropertyAccess,
        name: &str,
        kind: ContainerKind,
        node: &Node,
    ) -> Result<Value, WalkError> {
        let items = match node {
            Node::Null => return Ok(Value::Null),
            Node::List(items) => items,
            other => return Err(self.shape_mismatch("list", other)),
        };
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            self.path.push(PathSegment::Index(index));
            values.push(self.element(item, kind, || target.create_nested_instance(name))?);
            self.path.pop();
        }
        Ok(Value::List(values))
    }

    /// Builds the map in the container reported by the target.
    ///
    /// Object nodes are accepted too, their names parsed as the declared key
    /// type, so string-keyed formats round-trip. Object values merge into the
    /// instance already stored under the same key.
    fn map(
        &mut self,
        target: &dyn PropertyAccess,
        name: &str,
        kind: ContainerKind,
        node: &Node,
    ) -> Result<Value, WalkError> {
        let entries: Vec<(MapKey, &Node)> = match node {
            Node::Null => return Ok(Value::Null),
            Node::Map(map) => map.entries.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Node::Object(fields) => fields
                .iter()
                .map(|(k, v)| (MapKey::Str(k.clone()), v))
                .collect(),
            other => return Err(self.shape_mismatch("map", other)),
        };

        let current = match target.get_property(name) {
            Ok(Value::Map(map)) => map,
            Ok(_) => MapValue::default(),
            Err(source) => return Err(self.access_error(source)),
        };
        let mut container = target
            .create_map_container(name)
            .map_err(|source| self.access_error(source))?;
        let key_kind = target
            .map_key_type(name)
            .map_err(|source| self.access_error(source))?
            .scalar_kind()
            .unwrap_or(ScalarKind::Str);

        for (key, child) in entries {
            self.path.push(PathSegment::Key(key.clone()));
            let Some(typed_key) = key.clone().coerce_to(key_kind) else {
                return Err(WalkError::InvalidKey {
                    path: self.path.clone(),
                    key: key.to_string(),
                    expected: key_kind,
                });
            };
            if container.contains_key(&typed_key) {
                return Err(WalkError::DuplicateKey {
                    path: self.path.clone(),
                    key: key.to_string(),
                });
            }
            let value = match (current.get(&typed_key), child) {
                (Some(Value::Object(object)), Node::Object(_))
                    if kind == ContainerKind::MapObjectValue =>
                {
                    self.into_object(child, object)?;
                    Value::Object(object.clone())
                }
                _ => self.element(child, kind, || target.create_map_value_instance(name))?,
            };
            container.insert(typed_key, value);
            self.path.pop();
        }
        Ok(Value::Map(container))
    }
}
