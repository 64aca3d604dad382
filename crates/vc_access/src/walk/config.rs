/// Options for a [`Walker`](crate::walk::Walker).
///
/// ```
/// use vc_access::walk::WalkConfig;
///
/// let config = WalkConfig::new().with_max_depth(8).with_emit_absent(false);
/// assert_eq!(config.max_depth(), 8);
/// assert!(config.deny_unknown());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkConfig {
    max_depth: usize,
    emit_absent: bool,
    deny_unknown: bool,
}

impl WalkConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    #[inline]
    pub const fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            emit_absent: true,
            deny_unknown: true,
        }
    }

    /// Maximum number of nested objects below the root.
    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether export writes unset properties as `Node::Null`.
    ///
    /// When off, they are left out of the object node.
    #[inline]
    pub const fn with_emit_absent(mut self, emit_absent: bool) -> Self {
        self.emit_absent = emit_absent;
        self
    }

    /// Whether import fails on names the target does not declare.
    ///
    /// When off, such names are skipped with a warning.
    #[inline]
    pub const fn with_deny_unknown(mut self, deny_unknown: bool) -> Self {
        self.deny_unknown = deny_unknown;
        self
    }

    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub const fn emit_absent(&self) -> bool {
        self.emit_absent
    }

    #[inline]
    pub const fn deny_unknown(&self) -> bool {
        self.deny_unknown
    }
}

impl Default for WalkConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
