//! Safe buffers and plans for a native complex DFT engine.
//!
//! The engine does the arithmetic; this crate owns the resources around it:
//! row-major sample buffers the engine reads and writes in place, plans that
//! pin those buffers for as long as the engine holds their addresses, and the
//! process-wide guard that keeps plan creation and destruction
//! single-threaded.

pub mod array;
pub mod config;
pub mod engine;
pub mod error;
pub mod guard;
pub mod lease;
pub mod plan;
pub mod rustfft_engine;
pub mod scalar;
pub mod shape;
pub mod transforms;

pub use array::{Array, Array2, Array3, ArrayN, Buffer};
pub use config::{ConfigError, Effort, PlanConfig};
pub use engine::{Direction, Engine, Flags, RawPlan};
pub use error::Error;
pub use plan::Plan;
pub use rustfft_engine::RustFftEngine;
pub use scalar::{Real, Sample};
pub use shape::Shape;
pub use transforms::{fft, fft2, fft3, fftn, ifft, ifft2, ifft3, ifftn, transform_with};

#[cfg(test)]
mod _tests_guard;
#[cfg(test)]
mod test_support;
