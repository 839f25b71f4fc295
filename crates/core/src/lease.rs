//! Pin leases on buffer storage.
//!
//! An engine keeps raw addresses into buffer storage for the whole life of a
//! plan. A [`Lease`] is the claim that keeps those addresses valid: it holds
//! the buffer's storage under an exclusive borrow for `'a`, so the owner can
//! neither reallocate, move out of, nor drop the buffer until the lease is
//! gone. Ownership of the buffer never changes hands.

use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;

use crate::error::Error;
use crate::scalar::{Real, Sample};

pub struct Lease<'a, T: Real> {
    ptr: NonNull<Sample<T>>,
    len: usize,
    _borrow: PhantomData<&'a mut [Sample<T>]>,
}

// A lease is an exclusive borrow of `[Sample<T>]` in all but type.
unsafe impl<T: Real> Send for Lease<'_, T> {}
unsafe impl<T: Real> Sync for Lease<'_, T> {}

impl<'a, T: Real> Lease<'a, T> {
    /// Pins `storage` for `'a`. Fails on empty storage, which has no stable
    /// address to hand out.
    pub fn acquire(storage: &'a mut [Sample<T>]) -> Result<Self, Error> {
        if storage.is_empty() {
            return Err(Error::PinFailed);
        }
        let len = storage.len();
        let ptr = NonNull::new(storage.as_mut_ptr()).ok_or(Error::PinFailed)?;
        Ok(Self {
            ptr,
            len,
            _borrow: PhantomData,
        })
    }

    pub fn as_ptr(&self) -> *mut Sample<T> {
        self.ptr.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[Sample<T>] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [Sample<T>] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}
