//! Sample precision.
//!
//! Buffers and plans are generic over the real component type. `f64` pairs
//! with the engine's double-precision entry points and `f32` with the
//! single-precision ones; `f64` is the default everywhere.

use std::sync::{Arc, OnceLock};

use num_complex::Complex;
use num_traits::Float;
use rustfft::FftNum;

use crate::engine::Engine;
use crate::rustfft_engine::RustFftEngine;

/// Complex sample type stored in every buffer.
pub type Sample<T> = Complex<T>;

/// Real component type of a sample.
pub trait Real: FftNum + Float + Default {
    /// Short label used in log lines and error messages.
    const NAME: &'static str;

    /// Process-wide engine used when a plan is built without an explicit one.
    fn default_engine() -> Arc<dyn Engine<Self>>;
}

static DEFAULT_F64: OnceLock<Arc<RustFftEngine<f64>>> = OnceLock::new();
static DEFAULT_F32: OnceLock<Arc<RustFftEngine<f32>>> = OnceLock::new();

impl Real for f64 {
    const NAME: &'static str = "f64";

    fn default_engine() -> Arc<dyn Engine<Self>> {
        DEFAULT_F64.get_or_init(|| Arc::new(RustFftEngine::new())).clone()
    }
}

impl Real for f32 {
    const NAME: &'static str = "f32";

    fn default_engine() -> Arc<dyn Engine<Self>> {
        DEFAULT_F32.get_or_init(|| Arc::new(RustFftEngine::new())).clone()
    }
}

/// The zero sample.
#[inline]
pub fn zero<T: Real>() -> Sample<T> {
    Complex::new(T::zero(), T::zero())
}
