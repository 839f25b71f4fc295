//! One-shot transforms.
//!
//! Each helper allocates an output of the input's shape, builds a plan with
//! [`Flags::ESTIMATE`] on the default engine, executes it once, destroys it
//! and returns the output. Results are unnormalized:
//! `ifft(&fft(&x)?)? == x * x.len()`. Use [`Buffer::normalize`] to undo the
//! scaling.

use std::sync::Arc;

use crate::array::{Array, Array2, Array3, ArrayN, Buffer};
use crate::engine::{Direction, Engine, Flags};
use crate::error::Error;
use crate::plan::Plan;
use crate::scalar::Real;

/// Transforms `input` with an explicit engine and planner flags.
///
/// When the flags guarantee the planner leaves the bound buffers alone
/// (`ESTIMATE`, `WISDOM_ONLY`), the input is copied into the output and
/// transformed in place. Otherwise planning happens on zeroed staging buffers
/// and the input is copied in afterwards, so effort levels that scribble on
/// the bound buffers while planning (`MEASURE` and up) cannot lose data.
pub fn transform_with<T: Real, B: Buffer<T>>(
    engine: Arc<dyn Engine<T>>,
    input: &B,
    direction: Direction,
    flags: Flags,
) -> Result<B, Error> {
    let mut output = input.zeros_like();
    if flags.preserves_buffers_while_planning() {
        output.as_mut_slice().copy_from_slice(input.as_slice());
        Plan::in_place_with_engine(engine, &mut output, direction, flags)?
            .execute()?
            .destroy();
        return Ok(output);
    }

    let mut staging = input.zeros_like();
    {
        let mut plan = Plan::with_engine(engine, &mut staging, &mut output, direction, flags)?;
        plan.input_mut()?.copy_from_slice(input.as_slice());
        plan.execute()?.destroy();
    }
    Ok(output)
}

fn transform<T: Real, B: Buffer<T>>(input: &B, direction: Direction) -> Result<B, Error> {
    transform_with(T::default_engine(), input, direction, Flags::ESTIMATE)
}

pub fn fft<T: Real>(input: &Array<T>) -> Result<Array<T>, Error> {
    transform(input, Direction::Forward)
}

pub fn ifft<T: Real>(input: &Array<T>) -> Result<Array<T>, Error> {
    transform(input, Direction::Backward)
}

pub fn fft2<T: Real>(input: &Array2<T>) -> Result<Array2<T>, Error> {
    transform(input, Direction::Forward)
}

pub fn ifft2<T: Real>(input: &Array2<T>) -> Result<Array2<T>, Error> {
    transform(input, Direction::Backward)
}

pub fn fft3<T: Real>(input: &Array3<T>) -> Result<Array3<T>, Error> {
    transform(input, Direction::Forward)
}

pub fn ifft3<T: Real>(input: &Array3<T>) -> Result<Array3<T>, Error> {
    transform(input, Direction::Backward)
}

pub fn fftn<T: Real>(input: &ArrayN<T>) -> Result<ArrayN<T>, Error> {
    transform(input, Direction::Forward)
}

pub fn ifftn<T: Real>(input: &ArrayN<T>) -> Result<ArrayN<T>, Error> {
    transform(input, Direction::Backward)
}
