//! FFTW3 engine for the plan layer.
//!
//! With the `fftw` feature enabled this links against the system `libfftw3`
//! and `libfftw3f` and implements [`Engine`] for `f64` and `f32` by forwarding
//! straight to the FFTW planner. Without the feature the crate still builds;
//! [`engine`] returns `None` and [`is_available`] reports `false`.
//!
//! FFTW's planner is not thread-safe, which is exactly the contract
//! [`pinfft_core::guard`] enforces: every `*_plan_dft_*` and
//! `*_destroy_plan` call reaches this engine through a [`Plan`] and therefore
//! under the guard. `*_execute` runs unguarded.
//!
//! [`Plan`]: pinfft_core::Plan

use std::marker::PhantomData;
use std::sync::Arc;

use pinfft_core::Engine;

pub mod fftw_sys;

/// Engine backed by the FFTW3 library for precision `T`.
#[cfg_attr(not(feature = "fftw"), allow(dead_code))]
pub struct FftwEngine<T> {
    _precision: PhantomData<fn() -> T>,
}

/// Whether the FFTW libraries were linked into this build.
pub fn is_available() -> bool {
    cfg!(feature = "fftw")
}

#[cfg(feature = "fftw")]
pub use native::FftwPrecision;

/// A shared FFTW engine, or `None` when built without the `fftw` feature.
#[cfg(feature = "fftw")]
pub fn engine<T: FftwPrecision>() -> Option<Arc<dyn Engine<T>>> {
    log::debug!("using FFTW engine ({})", T::NAME);
    Some(Arc::new(FftwEngine::<T> {
        _precision: PhantomData,
    }))
}

#[cfg(not(feature = "fftw"))]
pub fn engine<T: pinfft_core::Real>() -> Option<Arc<dyn Engine<T>>> {
    log::debug!(
        "FFTW engine ({}) requested but pinfft-backend-fftw was built without the \"fftw\" feature",
        T::NAME
    );
    None
}

// ============================================================================
// Native engine (with FFTW feature)
// ============================================================================

#[cfg(feature = "fftw")]
mod native {
    use std::ffi::{c_int, c_uint, c_void};

    use pinfft_core::{Direction, Engine, Flags, RawPlan, Real, Sample};

    use super::FftwEngine;
    use crate::fftw_sys::*;

    /// Precisions FFTW provides a library for.
    pub trait FftwPrecision: Real + sealed::Sealed {
        #[doc(hidden)]
        unsafe fn plan_1d(
            n: c_int,
            input: *mut Sample<Self>,
            output: *mut Sample<Self>,
            sign: c_int,
            flags: c_uint,
        ) -> *mut c_void;

        #[doc(hidden)]
        unsafe fn plan_2d(
            n0: c_int,
            n1: c_int,
            input: *mut Sample<Self>,
            output: *mut Sample<Self>,
            sign: c_int,
            flags: c_uint,
        ) -> *mut c_void;

        #[doc(hidden)]
        unsafe fn plan_3d(
            n0: c_int,
            n1: c_int,
            n2: c_int,
            input: *mut Sample<Self>,
            output: *mut Sample<Self>,
            sign: c_int,
            flags: c_uint,
        ) -> *mut c_void;

        #[doc(hidden)]
        unsafe fn plan_nd(
            dims: &[c_int],
            input: *mut Sample<Self>,
            output: *mut Sample<Self>,
            sign: c_int,
            flags: c_uint,
        ) -> *mut c_void;

        #[doc(hidden)]
        unsafe fn execute(plan: *mut c_void);

        #[doc(hidden)]
        unsafe fn destroy(plan: *mut c_void);
    }

    mod sealed {
        pub trait Sealed {}
        impl Sealed for f64 {}
        impl Sealed for f32 {}
    }

    // `Complex<T>` is `#[repr(C)] { re, im }`, the same layout as `T[2]`.
    macro_rules! impl_precision {
        ($t:ty, $complex:ty, $plan:ty,
         $p1:ident, $p2:ident, $p3:ident, $pn:ident, $exec:ident, $destroy:ident) => {
            impl FftwPrecision for $t {
                unsafe fn plan_1d(
                    n: c_int,
                    input: *mut Sample<Self>,
                    output: *mut Sample<Self>,
                    sign: c_int,
                    flags: c_uint,
                ) -> *mut c_void {
                    unsafe {
                        $p1(n, input as *mut $complex, output as *mut $complex, sign, flags)
                            as *mut c_void
                    }
                }

                unsafe fn plan_2d(
                    n0: c_int,
                    n1: c_int,
                    input: *mut Sample<Self>,
                    output: *mut Sample<Self>,
                    sign: c_int,
                    flags: c_uint,
                ) -> *mut c_void {
                    unsafe {
                        $p2(
                            n0,
                            n1,
                            input as *mut $complex,
                            output as *mut $complex,
                            sign,
                            flags,
                        ) as *mut c_void
                    }
                }

                unsafe fn plan_3d(
                    n0: c_int,
                    n1: c_int,
                    n2: c_int,
                    input: *mut Sample<Self>,
                    output: *mut Sample<Self>,
                    sign: c_int,
                    flags: c_uint,
                ) -> *mut c_void {
                    unsafe {
                        $p3(
                            n0,
                            n1,
                            n2,
                            input as *mut $complex,
                            output as *mut $complex,
                            sign,
                            flags,
                        ) as *mut c_void
                    }
                }

                unsafe fn plan_nd(
                    dims: &[c_int],
                    input: *mut Sample<Self>,
                    output: *mut Sample<Self>,
                    sign: c_int,
                    flags: c_uint,
                ) -> *mut c_void {
                    unsafe {
                        $pn(
                            dims.len() as c_int,
                            dims.as_ptr(),
                            input as *mut $complex,
                            output as *mut $complex,
                            sign,
                            flags,
                        ) as *mut c_void
                    }
                }

                unsafe fn execute(plan: *mut c_void) {
                    unsafe { $exec(plan as $plan) }
                }

                unsafe fn destroy(plan: *mut c_void) {
                    unsafe { $destroy(plan as $plan) }
                }
            }
        };
    }

    impl_precision!(
        f64,
        fftw_complex,
        fftw_plan,
        fftw_plan_dft_1d,
        fftw_plan_dft_2d,
        fftw_plan_dft_3d,
        fftw_plan_dft,
        fftw_execute,
        fftw_destroy_plan
    );

    impl_precision!(
        f32,
        fftwf_complex,
        fftwf_plan,
        fftwf_plan_dft_1d,
        fftwf_plan_dft_2d,
        fftwf_plan_dft_3d,
        fftwf_plan_dft,
        fftwf_execute,
        fftwf_destroy_plan
    );

    fn to_c_dims(dims: &[usize]) -> Option<Vec<c_int>> {
        dims.iter().map(|&n| c_int::try_from(n).ok()).collect()
    }

    impl<T: FftwPrecision> Engine<T> for FftwEngine<T> {
        fn name(&self) -> &'static str {
            "fftw"
        }

        unsafe fn plan_dft(
            &self,
            dims: &[usize],
            input: *mut Sample<T>,
            output: *mut Sample<T>,
            direction: Direction,
            flags: Flags,
        ) -> Option<RawPlan> {
            let dims = to_c_dims(dims)?;
            let rank = c_int::try_from(dims.len()).ok()?;
            let sign: c_int = direction.sign();
            let plan = match *dims.as_slice() {
                [n] => unsafe { T::plan_1d(n, input, output, sign, flags.bits()) },
                [n0, n1] => unsafe {
                    T::plan_2d(n0, n1, input, output, sign, flags.bits())
                },
                [n0, n1, n2] => unsafe {
                    T::plan_3d(n0, n1, n2, input, output, sign, flags.bits())
                },
                _ if rank > 0 => unsafe {
                    T::plan_nd(&dims, input, output, sign, flags.bits())
                },
                _ => return None,
            };
            RawPlan::from_ptr(plan)
        }

        unsafe fn execute(&self, plan: &RawPlan) {
            unsafe { T::execute(plan.as_ptr()) }
        }

        unsafe fn destroy_plan(&self, plan: RawPlan) {
            unsafe { T::destroy(plan.as_ptr()) }
        }
    }
}

#[cfg(test)]
mod _tests_lib;
