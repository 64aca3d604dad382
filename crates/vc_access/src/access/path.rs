//! Property paths: `field.nested[3]{key}`.
//!
//! Paths name a location inside an object graph. The walker reports them in
//! errors and diffs, and [`get_path`] resolves them through the contract.
//!
//! # Syntax
//!
//! - Field: `name` at the start, `.name` afterwards.
//! - List index: `[3]`.
//! - Map key: `{key}`. The key text is matched against the display form of
//!   each map key, so `{42}` finds both the string `"42"` and the number `42`.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::access::{AccessError, PropertyAccess};
use crate::value::{MapKey, Value};

// -----------------------------------------------------------------------------
// PathSegment

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
    Key(MapKey),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, ".{name}"),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) => write!(f, "{{{key}}}"),
        }
    }
}

// -----------------------------------------------------------------------------
// PropertyPath

/// A sequence of [`PathSegment`]s. The empty path names the root.
///
/// # Examples
///
/// ```
/// use vc_access::access::path::{PathSegment, PropertyPath};
///
/// let path: PropertyPath = "owner.pets[1]{name}".parse().unwrap();
/// assert_eq!(path.segments()[1], PathSegment::Field("pets".into()));
/// assert_eq!(path.to_string(), "owner.pets[1]{name}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    #[inline]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Returns a copy extended by `segment`.
    pub fn join(&self, segment: PathSegment) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Parses a path.
    ///
    /// # Errors
    ///
    /// Returns [`PathParseError`] pointing at the offending byte.
    pub fn parse(path: &str) -> Result<Self, PathParseError> {
        Parser { path, offset: 0 }.parse()
    }
}

impl From<Vec<PathSegment>> for PropertyPath {
    #[inline]
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl FromStr for PropertyPath {
    type Err = PathParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if index == 0 => f.write_str(name)?,
                segment => write!(f, "{segment}")?,
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Parser

/// A malformed path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid path `{path}` at offset {offset}: {reason}")]
pub struct PathParseError {
    pub offset: usize,
    pub path: String,
    pub reason: &'static str,
}

struct Parser<'a> {
    path: &'a str,
    offset: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, reason: &'static str) -> PathParseError {
        PathParseError {
            offset: self.offset,
            path: self.path.to_owned(),
            reason,
        }
    }

    fn rest(&self) -> &'a str {
        let path: &'a str = self.path;
        &path[self.offset..]
    }

    fn take_until(&mut self, stop: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(stop).unwrap_or(rest.len());
        self.offset += len;
        &rest[..len]
    }

    fn field(&mut self) -> Result<PathSegment, PathParseError> {
        let start = self.offset;
        let name = self.take_until(|c| !(c.is_alphanumeric() || c == '_'));
        if name.is_empty() {
            self.offset = start;
            return Err(self.error("expected a field name"));
        }
        Ok(PathSegment::Field(name.to_owned()))
    }

    fn parse(mut self) -> Result<PropertyPath, PathParseError> {
        let mut segments = Vec::new();
        if self.path.is_empty() {
            return Ok(PropertyPath::root());
        }
        segments.push(self.field()?);

        while let Some(c) = self.rest().chars().next() {
            let start = self.offset;
            self.offset += c.len_utf8();
            match c {
                '.' => segments.push(self.field()?),
                '[' => {
                    let digits = self.take_until(|c| c == ']');
                    let index = digits.parse().map_err(|_| PathParseError {
                        offset: start + 1,
                        path: self.path.to_owned(),
                        reason: "expected a list index",
                    })?;
                    if !self.rest().starts_with(']') {
                        return Err(self.error("unclosed `[`"));
                    }
                    self.offset += 1;
                    segments.push(PathSegment::Index(index));
                }
                '{' => {
                    let key = self.take_until(|c| c == '}').to_owned();
                    if !self.rest().starts_with('}') {
                        return Err(self.error("unclosed `{`"));
                    }
                    self.offset += 1;
                    segments.push(PathSegment::Key(MapKey::Str(key)));
                }
                _ => {
                    self.offset = start;
                    return Err(self.error("expected `.`, `[` or `{`"));
                }
            }
        }
        Ok(PropertyPath { segments })
    }
}

// -----------------------------------------------------------------------------
// get_path

/// A failure while resolving a path.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum PathError {
    #[error(transparent)]
    Parse(#[from] PathParseError),

    #[error("at `{path}`: {source}")]
    Access {
        path: PropertyPath,
        #[source]
        source: AccessError,
    },

    #[error("nothing at `{path}`")]
    NotFound { path: PropertyPath },

    #[error("cannot step into a {found} at `{path}`")]
    NotTraversable {
        path: PropertyPath,
        found: &'static str,
    },

    #[error("object at `{path}` is mutably borrowed")]
    Busy { path: PropertyPath },
}

/// Resolves `path` against `root` and returns a copy of the value found.
///
/// Objects are returned as handles; [`Shared`](crate::Shared) properties
/// yield the shared instance itself.
///
/// # Examples
///
/// ```
/// use vc_access::{Value, access::path::get_path, derive::PropertyAccess};
///
/// #[derive(PropertyAccess, Default, Clone)]
/// struct Inner { tags: Vec<String> }
///
/// #[derive(PropertyAccess, Default, Clone)]
/// struct Outer { inner: Inner }
///
/// let mut outer = Outer::default();
/// outer.inner.tags.push("blue".into());
///
/// let path = "inner.tags[0]".parse().unwrap();
/// assert_eq!(get_path(&outer, &path).unwrap(), Value::from("blue"));
/// ```
pub fn get_path(root: &dyn PropertyAccess, path: &PropertyPath) -> Result<Value, PathError> {
    let mut segments = path.segments().iter();
    let mut walked = PropertyPath::root();

    let Some(first) = segments.next() else {
        return Err(PathError::NotTraversable {
            path: walked,
            found: "root",
        });
    };
    let mut current = step_object(root, first, &mut walked)?;

    for segment in segments {
        current = match (current, segment) {
            (Value::Object(object), PathSegment::Field(_)) => {
                let guard = object.try_borrow().map_err(|_| PathError::Busy {
                    path: walked.clone(),
                })?;
                step_object(&*guard, segment, &mut walked)?
            }
            (Value::List(mut items), PathSegment::Index(index)) => {
                walked.push(segment.clone());
                if *index >= items.len() {
                    return Err(PathError::NotFound { path: walked });
                }
                items.swap_remove(*index)
            }
            (Value::Map(map), PathSegment::Key(key)) => {
                walked.push(segment.clone());
                let text = key.to_string();
                match map.into_iter().find(|(k, _)| k == key || k.to_string() == text) {
                    Some((_, value)) => value,
                    None => return Err(PathError::NotFound { path: walked }),
                }
            }
            (value, _) => {
                return Err(PathError::NotTraversable {
                    path: walked,
                    found: value.shape_name(),
                });
            }
        };
    }
    Ok(current)
}

fn step_object(
    object: &dyn PropertyAccess,
    segment: &PathSegment,
    walked: &mut PropertyPath,
) -> Result<Value, PathError> {
    let PathSegment::Field(name) = segment else {
        return Err(PathError::NotTraversable {
            path: walked.clone(),
            found: "object",
        });
    };
    let value = object.get_property(name).map_err(|source| PathError::Access {
        path: walked.clone(),
        source,
    })?;
    walked.push(segment.clone());
    Ok(value)
}
