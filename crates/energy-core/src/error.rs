use crate::geometry::TilingKind;

/// Errors raised when a core invariant would be violated.
///
/// These are programmer or data-integrity errors. Operations that merely
/// fail a precondition (no tile at a position, pinned origin, refused
/// resize) report `false` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A grid coordinate was negative.
    #[error("invalid position ({row}, {col}): coordinates must be non-negative")]
    InvalidPosition { row: i64, col: i64 },

    /// An edge array does not match the edge count of its tiling.
    #[error("invalid border for {shape:?} tile: expected {expected} edges, got {actual}")]
    InvalidBorder {
        shape: TilingKind,
        expected: usize,
        actual: usize,
    },

    /// A part marker is not one of `S`, `W`, `L`, `.`.
    #[error("unknown part marker '{0}'")]
    UnknownMarker(String),

    /// A shape code is not one of `S`, `H`.
    #[error("unknown shape code '{0}'")]
    UnknownShapeCode(String),

    /// A tile of one tiling was offered to a circuit of another.
    #[error("mixed shapes: circuit is {expected:?}, tile is {found:?}")]
    MixedShape {
        expected: TilingKind,
        found: TilingKind,
    },
}
