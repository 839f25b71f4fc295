//! Raw FFI bindings to the FFTW3 complex-DFT planner.
//!
//! Only the entry points the plan layer needs: `*_plan_dft_{1d,2d,3d}`,
//! `*_plan_dft`, `*_execute` and `*_destroy_plan`, for both the double
//! (`fftw_*`, libfftw3) and single (`fftwf_*`, libfftw3f) precision libraries.
//!
//! FFTW documentation: https://www.fftw.org/fftw3_doc/

#![allow(non_camel_case_types)]
#![allow(dead_code)]

use std::ffi::c_int;
#[cfg(feature = "fftw")]
use std::ffi::c_uint;

/// Opaque double-precision plan.
#[repr(C)]
pub struct fftw_plan_s {
    _private: [u8; 0],
}

/// Opaque single-precision plan.
#[repr(C)]
pub struct fftwf_plan_s {
    _private: [u8; 0],
}

pub type fftw_plan = *mut fftw_plan_s;
pub type fftwf_plan = *mut fftwf_plan_s;

/// `double[2]`: same layout as `num_complex::Complex64`.
pub type fftw_complex = [f64; 2];

/// `float[2]`: same layout as `num_complex::Complex32`.
pub type fftwf_complex = [f32; 2];

pub const FFTW_FORWARD: c_int = -1;
pub const FFTW_BACKWARD: c_int = 1;

#[cfg(feature = "fftw")]
#[link(name = "fftw3")]
unsafe extern "C" {
    pub fn fftw_plan_dft_1d(
        n: c_int,
        input: *mut fftw_complex,
        output: *mut fftw_complex,
        sign: c_int,
        flags: c_uint,
    ) -> fftw_plan;

    pub fn fftw_plan_dft_2d(
        n0: c_int,
        n1: c_int,
        input: *mut fftw_complex,
        output: *mut fftw_complex,
        sign: c_int,
        flags: c_uint,
    ) -> fftw_plan;

    pub fn fftw_plan_dft_3d(
        n0: c_int,
        n1: c_int,
        n2: c_int,
        input: *mut fftw_complex,
        output: *mut fftw_complex,
        sign: c_int,
        flags: c_uint,
    ) -> fftw_plan;

    /// Rank-`rank` plan; `n` points to `rank` dimension sizes, outermost first.
    pub fn fftw_plan_dft(
        rank: c_int,
        n: *const c_int,
        input: *mut fftw_complex,
        output: *mut fftw_complex,
        sign: c_int,
        flags: c_uint,
    ) -> fftw_plan;

    /// Thread-safe: may run concurrently on different plans.
    pub fn fftw_execute(plan: fftw_plan);

    /// Not thread-safe; callers must serialize with every other planner call.
    pub fn fftw_destroy_plan(plan: fftw_plan);
}

#[cfg(feature = "fftw")]
#[link(name = "fftw3f")]
unsafe extern "C" {
    pub fn fftwf_plan_dft_1d(
        n: c_int,
        input: *mut fftwf_complex,
        output: *mut fftwf_complex,
        sign: c_int,
        flags: c_uint,
    ) -> fftwf_plan;

    pub fn fftwf_plan_dft_2d(
        n0: c_int,
        n1: c_int,
        input: *mut fftwf_complex,
        output: *mut fftwf_complex,
        sign: c_int,
        flags: c_uint,
    ) -> fftwf_plan;

    pub fn fftwf_plan_dft_3d(
        n0: c_int,
        n1: c_int,
        n2: c_int,
        input: *mut fftwf_complex,
        output: *mut fftwf_complex,
        sign: c_int,
        flags: c_uint,
    ) -> fftwf_plan;

    pub fn fftwf_plan_dft(
        rank: c_int,
        n: *const c_int,
        input: *mut fftwf_complex,
        output: *mut fftwf_complex,
        sign: c_int,
        flags: c_uint,
    ) -> fftwf_plan;

    pub fn fftwf_execute(plan: fftwf_plan);

    pub fn fftwf_destroy_plan(plan: fftwf_plan);
}
