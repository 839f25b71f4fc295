//! Dimension tuples and row-major index arithmetic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A validated, non-empty tuple of positive dimension sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn new(dims: impl Into<Vec<usize>>) -> Result<Self, Error> {
        let dims = dims.into();
        element_count(&dims)?;
        Ok(Self { dims })
    }

    /// Wraps dimensions that an existing buffer has already validated.
    pub(crate) fn from_validated(dims: Vec<usize>) -> Self {
        debug_assert!(element_count(&dims).is_ok());
        Self { dims }
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of samples, `∏ dims`.
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    /// Row-major linear index. Panics when any coordinate is out of range.
    pub fn index(&self, idx: &[usize]) -> usize {
        row_major_index(&self.dims, idx)
    }

    /// Row-major linear index, or `None` when a coordinate is out of range.
    pub fn checked_index(&self, idx: &[usize]) -> Option<usize> {
        checked_row_major_index(&self.dims, idx)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (axis, n) in self.dims.iter().enumerate() {
            if axis > 0 {
                write!(f, "x")?;
            }
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<usize>> for Shape {
    type Error = Error;

    fn try_from(dims: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(dims)
    }
}

impl From<Shape> for Vec<usize> {
    fn from(shape: Shape) -> Self {
        shape.dims
    }
}

/// Validates `dims` and returns the number of samples they describe.
pub fn element_count(dims: &[usize]) -> Result<usize, Error> {
    if dims.is_empty() {
        return Err(Error::EmptyShape);
    }
    let mut count: usize = 1;
    for (axis, &value) in dims.iter().enumerate() {
        if value == 0 {
            return Err(Error::InvalidDimension { axis, value });
        }
        count = count.checked_mul(value).ok_or_else(|| Error::TooLarge {
            dims: dims.to_vec(),
        })?;
    }
    // Vec<Complex<f64>> cannot hold more than isize::MAX bytes.
    if count > isize::MAX as usize / 16 {
        return Err(Error::TooLarge {
            dims: dims.to_vec(),
        });
    }
    Ok(count)
}

/// Horner accumulation of row-major strides: the last index varies fastest.
#[inline]
pub fn row_major_index(dims: &[usize], idx: &[usize]) -> usize {
    match checked_row_major_index(dims, idx) {
        Some(linear) => linear,
        None => panic!("index {idx:?} out of bounds for shape {dims:?}"),
    }
}

#[inline]
pub fn checked_row_major_index(dims: &[usize], idx: &[usize]) -> Option<usize> {
    if idx.len() != dims.len() {
        return None;
    }
    idx.iter().zip(dims).try_fold(0usize, |acc, (&i, &n)| {
        if i < n { Some(acc * n + i) } else { None }
    })
}
