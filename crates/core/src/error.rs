//! Error type shared by buffers, plans and the convenience layer.

use thiserror::Error;

/// Every failure the plan layer can detect before or around a native call.
///
/// All variants are raised synchronously at the offending call; nothing is
/// deferred or retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("shape must have at least one dimension")]
    EmptyShape,

    #[error("dimension {axis} must be positive, got {value}")]
    InvalidDimension { axis: usize, value: usize },

    #[error("shape {dims:?} has more elements than can be addressed")]
    TooLarge { dims: Vec<usize> },

    #[error("data length {len} does not match shape {dims:?} ({expected} elements)")]
    LengthMismatch {
        dims: Vec<usize>,
        expected: usize,
        len: usize,
    },

    #[error("input shape {input:?} does not match output shape {output:?}")]
    ShapeMismatch {
        input: Vec<usize>,
        output: Vec<usize>,
    },

    #[error("cannot pin an empty buffer")]
    PinFailed,

    #[error("{engine} returned a null plan for shape {dims:?}")]
    NullPlan { engine: &'static str, dims: Vec<usize> },

    #[error("plan has already been destroyed")]
    Destroyed,
}
