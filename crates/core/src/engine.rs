//! The native engine boundary.
//!
//! An [`Engine`] is the closed-box computational layer: it builds a plan from
//! raw input/output addresses, executes it, and destroys it. Nothing in this
//! trait is memory-safe on its own; [`Plan`](crate::plan::Plan) is the safe
//! wrapper that upholds the contract documented on each method.
//!
//! The method set mirrors the FFTW3 complex-DFT surface
//! (`fftw_plan_dft_{1d,2d,3d}`, `fftw_plan_dft`, `fftw_execute`,
//! `fftw_destroy_plan`) and the enumerations below carry FFTW's integer codes,
//! so an FFI engine can forward them unchanged.

use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::scalar::{Real, Sample};

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Time to frequency, exponent sign `-1`.
    #[default]
    Forward,
    /// Frequency to time, exponent sign `+1`. Unnormalized.
    Backward,
}

impl Direction {
    /// Sign of the exponent, as the engine's `sign` argument.
    pub const fn sign(self) -> i32 {
        match self {
            Direction::Forward => -1,
            Direction::Backward => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

bitflags! {
    /// Planner flags, passed to the engine as an uninterpreted bitmask.
    ///
    /// The effort levels (`MEASURE`, `PATIENT`, `EXHAUSTIVE`, `ESTIMATE`)
    /// trade planning time for execution speed. Everything except `ESTIMATE`
    /// may overwrite the bound buffers while planning.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        const MEASURE         = 0;
        const DESTROY_INPUT   = 1 << 0;
        const UNALIGNED       = 1 << 1;
        const CONSERVE_MEMORY = 1 << 2;
        const EXHAUSTIVE      = 1 << 3;
        const PRESERVE_INPUT  = 1 << 4;
        const PATIENT         = 1 << 5;
        const ESTIMATE        = 1 << 6;
        const WISDOM_ONLY     = 1 << 21;
    }
}

impl Flags {
    /// True when planning is guaranteed not to touch the bound buffers.
    pub fn preserves_buffers_while_planning(self) -> bool {
        self.intersects(Flags::ESTIMATE | Flags::WISDOM_ONLY)
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::ESTIMATE
    }
}

/// Opaque handle to a native plan.
///
/// Only the engine that produced a handle may interpret it.
#[derive(Debug)]
pub struct RawPlan(NonNull<c_void>);

// The handle is an address owned by the engine; moving it between threads is
// fine as long as create/destroy stay serialized, which `Plan` guarantees.
unsafe impl Send for RawPlan {}
unsafe impl Sync for RawPlan {}

impl RawPlan {
    /// Wraps a native pointer, returning `None` for null.
    pub fn from_ptr(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(RawPlan)
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// A native complex-to-complex DFT engine.
///
/// # Safety contract
///
/// For every `plan_*` call, `input` and `output` must each point to at least
/// `∏ dims` initialised samples (they may be equal for an in-place plan), and
/// both regions must stay valid, unmoved, and not otherwise accessed while
/// `execute` runs, until `destroy_plan` returns for that handle. Plan creation
/// and destruction must not run concurrently with each other (see
/// [`guard`](crate::guard)). `execute` must not run concurrently on the same
/// handle.
pub trait Engine<T: Real>: Send + Sync {
    /// Short name for logs and errors.
    fn name(&self) -> &'static str;

    /// Builds a plan of arbitrary rank. Returns `None` when the engine
    /// produces a null plan.
    ///
    /// # Safety
    /// See the trait-level contract.
    unsafe fn plan_dft(
        &self,
        dims: &[usize],
        input: *mut Sample<T>,
        output: *mut Sample<T>,
        direction: Direction,
        flags: Flags,
    ) -> Option<RawPlan>;

    /// # Safety
    /// See the trait-level contract.
    unsafe fn plan_dft_1d(
        &self,
        n: usize,
        input: *mut Sample<T>,
        output: *mut Sample<T>,
        direction: Direction,
        flags: Flags,
    ) -> Option<RawPlan> {
        unsafe { self.plan_dft(&[n], input, output, direction, flags) }
    }

    /// # Safety
    /// See the trait-level contract.
    unsafe fn plan_dft_2d(
        &self,
        n0: usize,
        n1: usize,
        input: *mut Sample<T>,
        output: *mut Sample<T>,
        direction: Direction,
        flags: Flags,
    ) -> Option<RawPlan> {
        unsafe { self.plan_dft(&[n0, n1], input, output, direction, flags) }
    }

    /// # Safety
    /// See the trait-level contract.
    #[allow(clippy::too_many_arguments)]
    unsafe fn plan_dft_3d(
        &self,
        n0: usize,
        n1: usize,
        n2: usize,
        input: *mut Sample<T>,
        output: *mut Sample<T>,
        direction: Direction,
        flags: Flags,
    ) -> Option<RawPlan> {
        unsafe { self.plan_dft(&[n0, n1, n2], input, output, direction, flags) }
    }

    /// Runs the transform over the current contents of the bound buffers.
    ///
    /// # Safety
    /// `plan` must come from this engine and not yet be destroyed.
    unsafe fn execute(&self, plan: &RawPlan);

    /// Releases the native plan.
    ///
    /// # Safety
    /// `plan` must come from this engine. It is consumed, so it cannot be
    /// destroyed twice.
    unsafe fn destroy_plan(&self, plan: RawPlan);
}
