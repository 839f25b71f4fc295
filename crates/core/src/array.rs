//! Contiguous complex sample buffers in row-major layout.
//!
//! Four shapes are provided: [`Array`] (1-D), [`Array2`], [`Array3`] and
//! [`ArrayN`]. Each owns one flat `Vec` whose length is exactly the product
//! of its dimensions; the last dimension varies fastest. The flat storage is
//! what a [`Plan`](crate::plan::Plan) hands to the engine, so none of these
//! types ever reallocates after construction.

use crate::error::Error;
use crate::scalar::{Real, Sample, zero};
use crate::shape::{Shape, checked_row_major_index, element_count, row_major_index};

/// Operations shared by every buffer shape.
///
/// Plans and the convenience layer are written against this trait, which is
/// what gives them their 1-D/2-D/3-D/N-D counterparts.
pub trait Buffer<T: Real> {
    /// Dimension sizes, outermost first.
    fn shape(&self) -> &[usize];

    fn as_slice(&self) -> &[Sample<T>];

    fn as_mut_slice(&mut self) -> &mut [Sample<T>];

    /// A zero-filled buffer with the same shape.
    fn zeros_like(&self) -> Self
    where
        Self: Sized;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    fn fill(&mut self, value: Sample<T>) {
        self.as_mut_slice().fill(value);
    }

    fn scale(&mut self, factor: T) {
        for value in self.as_mut_slice() {
            *value = value.scale(factor);
        }
    }

    /// Divides every sample by the element count.
    ///
    /// Transforms are unnormalized, so a backward transform of a forward
    /// transform needs this to recover the original signal.
    fn normalize(&mut self) {
        if let Some(count) = T::from_usize(self.len()) {
            self.scale(T::one() / count);
        }
    }
}

fn zeroed<T: Real>(dims: &[usize]) -> Result<Vec<Sample<T>>, Error> {
    let len = element_count(dims)?;
    Ok(vec![zero(); len])
}

fn check_len(dims: &[usize], len: usize) -> Result<(), Error> {
    let expected = element_count(dims)?;
    if expected != len {
        return Err(Error::LengthMismatch {
            dims: dims.to_vec(),
            expected,
            len,
        });
    }
    Ok(())
}

macro_rules! impl_buffer {
    ($ty:ident, $dims:ident) => {
        impl<T: Real> Buffer<T> for $ty<T> {
            fn shape(&self) -> &[usize] {
                &self.$dims[..]
            }

            fn as_slice(&self) -> &[Sample<T>] {
                &self.data
            }

            fn as_mut_slice(&mut self) -> &mut [Sample<T>] {
                &mut self.data
            }

            fn zeros_like(&self) -> Self {
                Self {
                    $dims: self.$dims.clone(),
                    data: vec![zero(); self.data.len()],
                }
            }
        }

        impl<T: Real> From<$ty<T>> for Vec<Sample<T>> {
            fn from(array: $ty<T>) -> Self {
                array.data
            }
        }
    };
}

// ============================================================================
// 1-D
// ============================================================================

/// A 1-D signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Array<T = f64> {
    dims: [usize; 1],
    data: Vec<Sample<T>>,
}

impl<T: Real> Array<T> {
    /// Zero-filled signal of length `n`.
    ///
    /// # Panics
    /// Panics if `n == 0`; use [`Array::try_new`] to get the error instead.
    pub fn new(n: usize) -> Self {
        Self::try_new(n).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_new(n: usize) -> Result<Self, Error> {
        Ok(Self {
            dims: [n],
            data: zeroed(&[n])?,
        })
    }

    pub fn from_vec(data: Vec<Sample<T>>) -> Result<Self, Error> {
        let n = data.len();
        check_len(&[n], n)?;
        Ok(Self { dims: [n], data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn dims(&self) -> usize {
        self.dims[0]
    }

    pub fn at(&self, i: usize) -> Sample<T> {
        self.data[i]
    }

    pub fn set(&mut self, i: usize, value: Sample<T>) {
        self.data[i] = value;
    }

    pub fn get(&self, i: usize) -> Option<Sample<T>> {
        self.data.get(i).copied()
    }

    pub fn view(&self) -> &[Sample<T>] {
        &self.data
    }

    pub fn view_mut(&mut self) -> &mut [Sample<T>] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<Sample<T>> {
        self.data
    }
}

impl_buffer!(Array, dims);

// ============================================================================
// 2-D
// ============================================================================

/// A 2-D grid of `n0` rows by `n1` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Array2<T = f64> {
    dims: [usize; 2],
    data: Vec<Sample<T>>,
}

impl<T: Real> Array2<T> {
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(n0: usize, n1: usize) -> Self {
        Self::try_new(n0, n1).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_new(n0: usize, n1: usize) -> Result<Self, Error> {
        Ok(Self {
            dims: [n0, n1],
            data: zeroed(&[n0, n1])?,
        })
    }

    pub fn from_vec(n0: usize, n1: usize, data: Vec<Sample<T>>) -> Result<Self, Error> {
        check_len(&[n0, n1], data.len())?;
        Ok(Self {
            dims: [n0, n1],
            data,
        })
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.dims[0], self.dims[1])
    }

    #[inline]
    fn index(&self, i0: usize, i1: usize) -> usize {
        let [n0, n1] = self.dims;
        assert!(
            i0 < n0 && i1 < n1,
            "index ({i0}, {i1}) out of bounds for shape {n0}x{n1}"
        );
        i1 + n1 * i0
    }

    pub fn at(&self, i0: usize, i1: usize) -> Sample<T> {
        self.data[self.index(i0, i1)]
    }

    pub fn set(&mut self, i0: usize, i1: usize, value: Sample<T>) {
        let idx = self.index(i0, i1);
        self.data[idx] = value;
    }

    pub fn get(&self, i0: usize, i1: usize) -> Option<Sample<T>> {
        checked_row_major_index(&self.dims, &[i0, i1]).map(|idx| self.data[idx])
    }

    /// Rows of the grid, aliasing the flat storage.
    pub fn view(&self) -> Vec<&[Sample<T>]> {
        self.data.chunks_exact(self.dims[1]).collect()
    }

    pub fn view_mut(&mut self) -> Vec<&mut [Sample<T>]> {
        self.data.chunks_exact_mut(self.dims[1]).collect()
    }

    pub fn into_vec(self) -> Vec<Sample<T>> {
        self.data
    }
}

impl_buffer!(Array2, dims);

// ============================================================================
// 3-D
// ============================================================================

/// A 3-D volume of shape `n0 x n1 x n2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Array3<T = f64> {
    dims: [usize; 3],
    data: Vec<Sample<T>>,
}

impl<T: Real> Array3<T> {
    /// # Panics
    /// Panics if any dimension is zero.
    pub fn new(n0: usize, n1: usize, n2: usize) -> Self {
        Self::try_new(n0, n1, n2).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_new(n0: usize, n1: usize, n2: usize) -> Result<Self, Error> {
        Ok(Self {
            dims: [n0, n1, n2],
            data: zeroed(&[n0, n1, n2])?,
        })
    }

    pub fn from_vec(n0: usize, n1: usize, n2: usize, data: Vec<Sample<T>>) -> Result<Self, Error> {
        check_len(&[n0, n1, n2], data.len())?;
        Ok(Self {
            dims: [n0, n1, n2],
            data,
        })
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        (self.dims[0], self.dims[1], self.dims[2])
    }

    #[inline]
    fn index(&self, i0: usize, i1: usize, i2: usize) -> usize {
        let [n0, n1, n2] = self.dims;
        assert!(
            i0 < n0 && i1 < n1 && i2 < n2,
            "index ({i0}, {i1}, {i2}) out of bounds for shape {n0}x{n1}x{n2}"
        );
        i2 + n2 * (i1 + n1 * i0)
    }

    pub fn at(&self, i0: usize, i1: usize, i2: usize) -> Sample<T> {
        self.data[self.index(i0, i1, i2)]
    }

    pub fn set(&mut self, i0: usize, i1: usize, i2: usize, value: Sample<T>) {
        let idx = self.index(i0, i1, i2);
        self.data[idx] = value;
    }

    pub fn get(&self, i0: usize, i1: usize, i2: usize) -> Option<Sample<T>> {
        checked_row_major_index(&self.dims, &[i0, i1, i2]).map(|idx| self.data[idx])
    }

    /// Slabs of rows, aliasing the flat storage: `view()[i][j][k] == at(i, j, k)`.
    pub fn view(&self) -> Vec<Vec<&[Sample<T>]>> {
        let [_, n1, n2] = self.dims;
        self.data
            .chunks_exact(n1 * n2)
            .map(|slab| slab.chunks_exact(n2).collect())
            .collect()
    }

    pub fn view_mut(&mut self) -> Vec<Vec<&mut [Sample<T>]>> {
        let [_, n1, n2] = self.dims;
        self.data
            .chunks_exact_mut(n1 * n2)
            .map(|slab| slab.chunks_exact_mut(n2).collect())
            .collect()
    }

    pub fn into_vec(self) -> Vec<Sample<T>> {
        self.data
    }
}

impl_buffer!(Array3, dims);

// ============================================================================
// N-D
// ============================================================================

/// A buffer of arbitrary rank.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayN<T = f64> {
    shape: Shape,
    data: Vec<Sample<T>>,
}

impl<T: Real> ArrayN<T> {
    /// # Panics
    /// Panics if `dims` is empty or contains a zero.
    pub fn new(dims: &[usize]) -> Self {
        Self::try_new(dims).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_new(dims: &[usize]) -> Result<Self, Error> {
        let shape = Shape::new(dims)?;
        let data = vec![zero(); shape.len()];
        Ok(Self { shape, data })
    }

    pub fn from_vec(dims: &[usize], data: Vec<Sample<T>>) -> Result<Self, Error> {
        check_len(dims, data.len())?;
        Ok(Self {
            shape: Shape::new(dims)?,
            data,
        })
    }

    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn at(&self, idx: &[usize]) -> Sample<T> {
        self.data[row_major_index(self.shape.dims(), idx)]
    }

    pub fn set(&mut self, idx: &[usize], value: Sample<T>) {
        let linear = row_major_index(self.shape.dims(), idx);
        self.data[linear] = value;
    }

    pub fn get(&self, idx: &[usize]) -> Option<Sample<T>> {
        self.shape.checked_index(idx).map(|linear| self.data[linear])
    }

    fn innermost(&self) -> usize {
        self.shape.dims().last().copied().unwrap_or(1)
    }

    /// Runs along the innermost dimension, in storage order.
    pub fn lanes(&self) -> std::slice::ChunksExact<'_, Sample<T>> {
        self.data.chunks_exact(self.innermost())
    }

    pub fn lanes_mut(&mut self) -> std::slice::ChunksExactMut<'_, Sample<T>> {
        let n = self.innermost();
        self.data.chunks_exact_mut(n)
    }

    pub fn into_vec(self) -> Vec<Sample<T>> {
        self.data
    }
}

impl<T: Real> Buffer<T> for ArrayN<T> {
    fn shape(&self) -> &[usize] {
        self.shape.dims()
    }

    fn as_slice(&self) -> &[Sample<T>] {
        &self.data
    }

    fn as_mut_slice(&mut self) -> &mut [Sample<T>] {
        &mut self.data
    }

    fn zeros_like(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            data: vec![zero(); self.data.len()],
        }
    }
}

impl<T: Real> From<ArrayN<T>> for Vec<Sample<T>> {
    fn from(array: ArrayN<T>) -> Self {
        array.data
    }
}

macro_rules! impl_into_array_n {
    ($ty:ident) => {
        impl<T: Real> From<$ty<T>> for ArrayN<T> {
            fn from(array: $ty<T>) -> Self {
                Self {
                    shape: Shape::from_validated(array.dims.to_vec()),
                    data: array.data,
                }
            }
        }
    };
}

impl_into_array_n!(Array);
impl_into_array_n!(Array2);
impl_into_array_n!(Array3);
