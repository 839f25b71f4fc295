//! Plans: a native execution strategy bound to specific buffers.
//!
//! A [`Plan`] moves through `Built -> (Executed)* -> Destroyed`. Building pins
//! the input and output storage with [`Lease`]s and asks the engine for a
//! handle under the [plan guard](crate::guard). Executing reruns the
//! transform over whatever the buffers hold at that moment. Destroying
//! releases the handle under the guard, then the leases; it is idempotent and
//! also runs on drop, so a forgotten plan is still cleaned up when it goes out
//! of scope.
//!
//! ```
//! use pinfft_core::{Array, Direction, Flags, Plan};
//! use num_complex::Complex64;
//!
//! let mut signal = Array::new(8);
//! signal.set(1, Complex64::new(1.0, 0.0));
//! let mut plan = Plan::in_place(&mut signal, Direction::Forward, Flags::ESTIMATE)?;
//! plan.execute()?.destroy();
//! drop(plan);
//! assert!((signal.at(0).re - 1.0).abs() < 1e-12);
//! # Ok::<(), pinfft_core::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::array::Buffer;
use crate::engine::{Direction, Engine, Flags, RawPlan};
use crate::error::Error;
use crate::guard;
use crate::lease::Lease;
use crate::scalar::{Real, Sample};
use crate::shape::Shape;

enum Pins<'a, T: Real> {
    InPlace(Lease<'a, T>),
    Separate {
        input: Lease<'a, T>,
        output: Lease<'a, T>,
    },
}

impl<'a, T: Real> Pins<'a, T> {
    fn input(&self) -> &Lease<'a, T> {
        match self {
            Pins::InPlace(lease) => lease,
            Pins::Separate { input, .. } => input,
        }
    }

    fn input_mut(&mut self) -> &mut Lease<'a, T> {
        match self {
            Pins::InPlace(lease) => lease,
            Pins::Separate { input, .. } => input,
        }
    }

    fn output(&self) -> &Lease<'a, T> {
        match self {
            Pins::InPlace(lease) => lease,
            Pins::Separate { output, .. } => output,
        }
    }

    fn output_mut(&mut self) -> &mut Lease<'a, T> {
        match self {
            Pins::InPlace(lease) => lease,
            Pins::Separate { output, .. } => output,
        }
    }
}

/// A complex DFT plan bound to an input and an output buffer.
///
/// The lifetime `'a` is the pin: both buffers stay exclusively borrowed until
/// the plan is dropped, so their storage cannot move or be freed while the
/// engine holds its addresses. Use [`Plan::input_mut`] to change the signal
/// between executions.
pub struct Plan<'a, T: Real = f64> {
    engine: Arc<dyn Engine<T>>,
    handle: Option<RawPlan>,
    pins: Option<Pins<'a, T>>,
    shape: Shape,
    direction: Direction,
    flags: Flags,
    in_place: bool,
}

impl<'a, T: Real> Plan<'a, T> {
    /// Out-of-place plan on the default engine.
    pub fn new<B: Buffer<T>>(
        input: &'a mut B,
        output: &'a mut B,
        direction: Direction,
        flags: Flags,
    ) -> Result<Self, Error> {
        Self::with_engine(T::default_engine(), input, output, direction, flags)
    }

    /// In-place plan on the default engine: input and output are `buffer`.
    pub fn in_place<B: Buffer<T>>(
        buffer: &'a mut B,
        direction: Direction,
        flags: Flags,
    ) -> Result<Self, Error> {
        Self::in_place_with_engine(T::default_engine(), buffer, direction, flags)
    }

    pub fn with_engine<B: Buffer<T>>(
        engine: Arc<dyn Engine<T>>,
        input: &'a mut B,
        output: &'a mut B,
        direction: Direction,
        flags: Flags,
    ) -> Result<Self, Error> {
        if input.shape() != output.shape() {
            return Err(Error::ShapeMismatch {
                input: input.shape().to_vec(),
                output: output.shape().to_vec(),
            });
        }
        let shape = Shape::new(input.shape())?;
        let input = pin(&shape, input.as_mut_slice())?;
        let output = pin(&shape, output.as_mut_slice())?;
        Self::build(
            engine,
            Pins::Separate { input, output },
            shape,
            direction,
            flags,
        )
    }

    pub fn in_place_with_engine<B: Buffer<T>>(
        engine: Arc<dyn Engine<T>>,
        buffer: &'a mut B,
        direction: Direction,
        flags: Flags,
    ) -> Result<Self, Error> {
        let shape = Shape::new(buffer.shape())?;
        let lease = pin(&shape, buffer.as_mut_slice())?;
        Self::build(engine, Pins::InPlace(lease), shape, direction, flags)
    }

    fn build(
        engine: Arc<dyn Engine<T>>,
        pins: Pins<'a, T>,
        shape: Shape,
        direction: Direction,
        flags: Flags,
    ) -> Result<Self, Error> {
        let input = pins.input().as_ptr();
        let output = pins.output().as_ptr();
        let in_place = matches!(pins, Pins::InPlace(_));

        // SAFETY: both regions hold `shape.len()` samples and are exclusively
        // borrowed by `pins` until the handle is destroyed.
        let handle = guard::serialized(|| unsafe {
            match shape.dims() {
                &[n] => engine.plan_dft_1d(n, input, output, direction, flags),
                &[n0, n1] => engine.plan_dft_2d(n0, n1, input, output, direction, flags),
                &[n0, n1, n2] => {
                    engine.plan_dft_3d(n0, n1, n2, input, output, direction, flags)
                }
                dims => engine.plan_dft(dims, input, output, direction, flags),
            }
        });

        let Some(handle) = handle else {
            warn!(
                "{} returned a null {} plan for shape {}",
                engine.name(),
                direction,
                shape
            );
            return Err(Error::NullPlan {
                engine: engine.name(),
                dims: shape.dims().to_vec(),
            });
        };

        debug!(
            "created {} {} plan {} ({}, {}, flags={:#x})",
            engine.name(),
            direction,
            shape,
            T::NAME,
            if in_place { "in-place" } else { "out-of-place" },
            flags.bits()
        );

        Ok(Self {
            engine,
            handle: Some(handle),
            pins: Some(pins),
            shape,
            direction,
            flags,
            in_place,
        })
    }

    /// Runs the transform over the buffers' current contents.
    ///
    /// Returns the plan itself so the call can be chained into
    /// [`Plan::destroy`]. Fails with [`Error::Destroyed`] after destruction.
    pub fn execute(&mut self) -> Result<&mut Self, Error> {
        let handle = self.handle.as_ref().ok_or(Error::Destroyed)?;
        trace!("executing {} plan {}", self.direction, self.shape);
        // SAFETY: the handle is live and `&mut self` rules out a concurrent
        // execute on it or any access to the pinned buffers.
        unsafe { self.engine.execute(handle) };
        Ok(self)
    }

    /// Releases the native plan and the buffer pins.
    ///
    /// Idempotent: later calls, including the one made on drop, do nothing.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            let engine = &self.engine;
            // SAFETY: the handle came from `engine` and `take` guarantees it
            // is destroyed at most once.
            guard::serialized(|| unsafe { engine.destroy_plan(handle) });
            debug!(
                "destroyed {} {} plan {}",
                self.engine.name(),
                self.direction,
                self.shape
            );
        }
        self.pins = None;
    }

    pub fn is_destroyed(&self) -> bool {
        self.handle.is_none()
    }

    pub fn is_in_place(&self) -> bool {
        self.in_place
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// The pinned input samples. For an in-place plan this is the output too.
    pub fn input(&self) -> Result<&[Sample<T>], Error> {
        let pins = self.pins.as_ref().ok_or(Error::Destroyed)?;
        Ok(pins.input().as_slice())
    }

    pub fn input_mut(&mut self) -> Result<&mut [Sample<T>], Error> {
        let pins = self.pins.as_mut().ok_or(Error::Destroyed)?;
        Ok(pins.input_mut().as_mut_slice())
    }

    pub fn output(&self) -> Result<&[Sample<T>], Error> {
        let pins = self.pins.as_ref().ok_or(Error::Destroyed)?;
        Ok(pins.output().as_slice())
    }

    pub fn output_mut(&mut self) -> Result<&mut [Sample<T>], Error> {
        let pins = self.pins.as_mut().ok_or(Error::Destroyed)?;
        Ok(pins.output_mut().as_mut_slice())
    }
}

/// Pins `storage`, then checks it holds exactly one sample per element of
/// `shape`. Storage with no address to pin fails with `PinFailed`.
fn pin<'a, T: Real>(shape: &Shape, storage: &'a mut [Sample<T>]) -> Result<Lease<'a, T>, Error> {
    let lease = Lease::acquire(storage)?;
    if lease.len() != shape.len() {
        return Err(Error::LengthMismatch {
            dims: shape.dims().to_vec(),
            expected: shape.len(),
            len: lease.len(),
        });
    }
    Ok(lease)
}

impl<T: Real> Drop for Plan<'_, T> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<T: Real> fmt::Debug for Plan<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("engine", &self.engine.name())
            .field("shape", &self.shape)
            .field("direction", &self.direction)
            .field("flags", &self.flags)
            .field("in_place", &self.in_place)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
