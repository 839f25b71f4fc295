#![cfg(test)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use num_complex::Complex64;
use parking_lot::Mutex;

use crate::engine::{Direction, Engine, Flags, RawPlan};
use crate::rustfft_engine::RustFftEngine;
use crate::scalar::Sample;

pub const TOL: f64 = 1e-9;

#[track_caller]
pub fn assert_close(actual: Complex64, expected: Complex64, tol: f64) {
    assert!(
        (actual - expected).norm() < tol,
        "{actual} != {expected} (delta {})",
        (actual - expected).norm()
    );
}

/// Wraps the rustfft engine and records every native call.
#[derive(Default)]
pub struct CountingEngine {
    inner: RustFftEngine<f64>,
    pub created: AtomicUsize,
    pub executed: AtomicUsize,
    pub destroyed: AtomicUsize,
    /// Plans whose input and output addresses coincide.
    pub in_place_plans: AtomicUsize,
    /// Create/destroy calls that found another one already in flight.
    pub overlaps: AtomicUsize,
    /// Destroy calls for a handle that was not live.
    pub unknown_destroys: AtomicUsize,
    in_native: AtomicUsize,
    live: Mutex<HashSet<usize>>,
}

impl CountingEngine {
    fn enter(&self) {
        if self.in_native.fetch_add(1, Ordering::SeqCst) > 0 {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        // Widen the window a racing create/destroy would have to hit.
        thread::yield_now();
    }

    fn leave(&self) {
        self.in_native.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn live_plans(&self) -> usize {
        self.live.lock().len()
    }
}

impl Engine<f64> for CountingEngine {
    fn name(&self) -> &'static str {
        "counting"
    }

    unsafe fn plan_dft(
        &self,
        dims: &[usize],
        input: *mut Sample<f64>,
        output: *mut Sample<f64>,
        direction: Direction,
        flags: Flags,
    ) -> Option<RawPlan> {
        self.enter();
        let plan = unsafe { self.inner.plan_dft(dims, input, output, direction, flags) };
        if let Some(plan) = &plan {
            self.live.lock().insert(plan.as_ptr() as usize);
            self.created.fetch_add(1, Ordering::SeqCst);
            if input == output {
                self.in_place_plans.fetch_add(1, Ordering::SeqCst);
            }
        }
        self.leave();
        plan
    }

    unsafe fn execute(&self, plan: &RawPlan) {
        self.executed.fetch_add(1, Ordering::SeqCst);
        unsafe { self.inner.execute(plan) };
    }

    unsafe fn destroy_plan(&self, plan: RawPlan) {
        self.enter();
        if !self.live.lock().remove(&(plan.as_ptr() as usize)) {
            self.unknown_destroys.fetch_add(1, Ordering::SeqCst);
        }
        unsafe { self.inner.destroy_plan(plan) };
        self.destroyed.fetch_add(1, Ordering::SeqCst);
        self.leave();
    }
}

/// An engine whose planner always fails.
pub struct NullEngine;

impl Engine<f64> for NullEngine {
    fn name(&self) -> &'static str {
        "null"
    }

    unsafe fn plan_dft(
        &self,
        _dims: &[usize],
        _input: *mut Sample<f64>,
        _output: *mut Sample<f64>,
        _direction: Direction,
        _flags: Flags,
    ) -> Option<RawPlan> {
        None
    }

    unsafe fn execute(&self, _plan: &RawPlan) {
        panic!("null engine never hands out plans");
    }

    unsafe fn destroy_plan(&self, _plan: RawPlan) {
        panic!("null engine never hands out plans");
    }
}
