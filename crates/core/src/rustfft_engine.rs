//! Engine built on rustfft.
//!
//! Exposes the same raw-pointer plan surface as an FFI engine, so plans
//! behave identically whichever engine backs them. A native plan records the
//! bound addresses and one precomputed 1-D FFT per axis; execution copies the
//! input into the output region (unless in place) and transforms the output
//! along every axis, innermost first.

use std::ffi::c_void;
use std::ptr;
use std::slice;
use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;
use rustfft::{Fft, FftDirection, FftPlanner};

use crate::engine::{Direction, Engine, Flags, RawPlan};
use crate::scalar::{Real, Sample, zero};
use crate::shape::element_count;

pub struct RustFftEngine<T: Real> {
    planner: Mutex<FftPlanner<T>>,
}

impl<T: Real> RustFftEngine<T> {
    pub fn new() -> Self {
        Self {
            planner: Mutex::new(FftPlanner::new()),
        }
    }
}

impl<T: Real> Default for RustFftEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

struct NativePlan<T: Real> {
    dims: Vec<usize>,
    len: usize,
    input: *mut Sample<T>,
    output: *mut Sample<T>,
    axes: Vec<Arc<dyn Fft<T>>>,
    scratch: Vec<Sample<T>>,
    lane: Vec<Sample<T>>,
}

impl<T: Real> NativePlan<T> {
    /// # Safety
    /// `input` and `output` must be valid for `len` samples and not aliased
    /// elsewhere for the duration of the call.
    unsafe fn run(&mut self) {
        if self.input != self.output {
            // `copy` rather than `copy_nonoverlapping`: the regions are
            // distinct buffers in practice, but nothing here can prove it.
            unsafe { ptr::copy(self.input, self.output, self.len) };
        }
        let data = unsafe { slice::from_raw_parts_mut(self.output, self.len) };

        let mut stride = 1;
        for (axis, &n) in self.dims.iter().enumerate().rev() {
            if n > 1 {
                let fft = &self.axes[axis];
                let scratch = &mut self.scratch[..fft.get_inplace_scratch_len()];
                if stride == 1 {
                    fft.process_with_scratch(data, scratch);
                } else {
                    let lane = &mut self.lane[..n];
                    for block in data.chunks_exact_mut(n * stride) {
                        for offset in 0..stride {
                            for (k, value) in lane.iter_mut().enumerate() {
                                *value = block[offset + k * stride];
                            }
                            fft.process_with_scratch(lane, scratch);
                            for (k, value) in lane.iter().enumerate() {
                                block[offset + k * stride] = *value;
                            }
                        }
                    }
                }
            }
            stride *= n;
        }
    }
}

impl<T: Real> Engine<T> for RustFftEngine<T> {
    fn name(&self) -> &'static str {
        "rustfft"
    }

    unsafe fn plan_dft(
        &self,
        dims: &[usize],
        input: *mut Sample<T>,
        output: *mut Sample<T>,
        direction: Direction,
        flags: Flags,
    ) -> Option<RawPlan> {
        let len = element_count(dims).ok()?;
        if input.is_null() || output.is_null() {
            return None;
        }
        let fft_direction = match direction {
            Direction::Forward => FftDirection::Forward,
            Direction::Backward => FftDirection::Inverse,
        };
        let axes: Vec<Arc<dyn Fft<T>>> = {
            let mut planner = self.planner.lock();
            dims.iter()
                .map(|&n| planner.plan_fft(n, fft_direction))
                .collect()
        };
        let scratch_len = axes
            .iter()
            .map(|fft| fft.get_inplace_scratch_len())
            .max()
            .unwrap_or(0);
        let lane_len = dims.iter().copied().max().unwrap_or(0);
        trace!(
            "rustfft plan {:?} {} flags={:#x} scratch={}",
            dims,
            direction,
            flags.bits(),
            scratch_len
        );

        let native = Box::new(NativePlan {
            dims: dims.to_vec(),
            len,
            input,
            output,
            axes,
            scratch: vec![zero(); scratch_len],
            lane: vec![zero(); lane_len],
        });
        RawPlan::from_ptr(Box::into_raw(native) as *mut c_void)
    }

    unsafe fn execute(&self, plan: &RawPlan) {
        let native = unsafe { &mut *(plan.as_ptr() as *mut NativePlan<T>) };
        unsafe { native.run() };
    }

    unsafe fn destroy_plan(&self, plan: RawPlan) {
        drop(unsafe { Box::from_raw(plan.as_ptr() as *mut NativePlan<T>) });
    }
}
