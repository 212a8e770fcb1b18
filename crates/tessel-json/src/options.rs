//! Parser configuration.

/// Nesting depth accepted by [`parse`](crate::parse).
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Upper bound applied to any configured depth.
///
/// The parser recurses once per nesting level; this keeps the recursion well
/// inside the default thread stack whatever the caller configures.
pub const MAX_DEPTH_LIMIT: usize = 128;

/// Options controlling a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum array/object nesting. Clamped to [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
    /// Accept (and ignore) non-whitespace input after the root value.
    pub allow_trailing: bool,
}

impl ParseOptions {
    /// Standard JSON document parsing: one value, nothing after it.
    pub const fn strict() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing: false,
        }
    }

    /// Read the first value and ignore whatever follows.
    pub const fn lenient() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing: true,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The depth limit actually enforced.
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_LIMIT)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::strict()
    }
}
