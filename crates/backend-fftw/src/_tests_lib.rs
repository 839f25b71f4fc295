//! Tests for the FFTW engine.
//!
//! Without the `fftw` feature only the stub behaviour is checked. With it,
//! every rank is compared bin-for-bin against the rustfft engine.

#![cfg(test)]

#[test]
fn direction_signs_match_fftw_constants() {
    use pinfft_core::Direction;

    assert_eq!(Direction::Forward.sign(), crate::fftw_sys::FFTW_FORWARD);
    assert_eq!(Direction::Backward.sign(), crate::fftw_sys::FFTW_BACKWARD);
}

#[cfg(not(feature = "fftw"))]
#[test]
fn stub_reports_unavailable() {
    assert!(!crate::is_available());
    assert!(crate::engine::<f64>().is_none());
    assert!(crate::engine::<f32>().is_none());
}

#[cfg(feature = "fftw")]
mod native {
    use std::ptr::NonNull;
    use std::sync::Arc;

    use num_complex::{Complex32, Complex64};
    use pinfft_core::{
        ArrayN, Buffer, Direction, Engine, Error, Flags, Plan, RustFftEngine, transform_with,
    };

    fn fftw64() -> Arc<dyn Engine<f64>> {
        crate::engine::<f64>().expect("built with the fftw feature")
    }

    fn signal(dims: &[usize]) -> ArrayN<f64> {
        let mut x = ArrayN::new(dims);
        for (idx, value) in x.as_mut_slice().iter_mut().enumerate() {
            *value = Complex64::new(((idx * 7) % 11) as f64 - 5.0, ((idx * 3) % 5) as f64);
        }
        x
    }

    // ========================================================================
    // Agreement with rustfft
    // ========================================================================

    #[test]
    fn matches_rustfft_for_every_rank() {
        let reference: Arc<dyn Engine<f64>> = Arc::new(RustFftEngine::new());
        for dims in [&[48][..], &[12, 10], &[6, 5, 4], &[4, 3, 5, 2]] {
            let x = signal(dims);
            for direction in [Direction::Forward, Direction::Backward] {
                let want =
                    transform_with(reference.clone(), &x, direction, Flags::ESTIMATE).unwrap();
                let got = transform_with(fftw64(), &x, direction, Flags::ESTIMATE).unwrap();
                for (g, w) in got.as_slice().iter().zip(want.as_slice()) {
                    let diff = (*g - *w).norm();
                    assert!(diff < 1e-9, "{dims:?} {direction}: diff={diff}");
                }
            }
        }
    }

    #[test]
    fn measure_planning_through_transform_with_keeps_data() {
        let x = signal(&[16, 16]);
        let reference = transform_with(
            Arc::new(RustFftEngine::new()),
            &x,
            Direction::Forward,
            Flags::ESTIMATE,
        )
        .unwrap();
        let got = transform_with(fftw64(), &x, Direction::Forward, Flags::MEASURE).unwrap();
        for (g, w) in got.as_slice().iter().zip(reference.as_slice()) {
            assert!((*g - *w).norm() < 1e-9);
        }
    }

    #[test]
    fn single_precision_round_trip() {
        let engine = crate::engine::<f32>().unwrap();
        let mut x = ArrayN::<f32>::new(&[8, 6]);
        for (idx, value) in x.as_mut_slice().iter_mut().enumerate() {
            *value = Complex32::new(idx as f32 * 0.5, 1.0);
        }
        let spectrum =
            transform_with(engine.clone(), &x, Direction::Forward, Flags::ESTIMATE).unwrap();
        let mut back =
            transform_with(engine, &spectrum, Direction::Backward, Flags::ESTIMATE).unwrap();
        back.normalize();
        for (g, w) in back.as_slice().iter().zip(x.as_slice()) {
            assert!((*g - *w).norm() < 1e-4);
        }
    }

    // ========================================================================
    // Plan lifecycle
    // ========================================================================

    #[test]
    fn in_place_plan_reuses_the_native_handle() {
        let mut x = ArrayN::<f64>::new(&[8]);
        let mut plan =
            Plan::in_place_with_engine(fftw64(), &mut x, Direction::Forward, Flags::ESTIMATE)
                .unwrap();
        assert_eq!(plan.engine_name(), "fftw");
        for shift in 0..8 {
            let input = plan.input_mut().unwrap();
            input.fill(Complex64::new(0.0, 0.0));
            input[shift] = Complex64::new(1.0, 0.0);
            plan.execute().unwrap();
            for value in plan.output().unwrap() {
                assert!((value.norm() - 1.0).abs() < 1e-12);
            }
        }
        plan.destroy();
        assert!(matches!(plan.execute(), Err(Error::Destroyed)));
    }

    #[test]
    fn oversized_dimension_is_rejected_before_reaching_fftw() {
        let engine = crate::engine::<f64>().unwrap();
        let dangling = NonNull::<Complex64>::dangling().as_ptr();
        // SAFETY: the dimension does not fit a C int, so nothing is planned
        // and the pointers are never dereferenced.
        let plan = unsafe {
            engine.plan_dft(
                &[usize::MAX],
                dangling,
                dangling,
                Direction::Forward,
                Flags::ESTIMATE,
            )
        };
        assert!(plan.is_none());
    }

    #[test]
    fn reports_available() {
        assert!(crate::is_available());
    }
}
