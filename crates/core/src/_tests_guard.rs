#![cfg(test)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use num_complex::Complex64;
use rayon::prelude::*;

use super::array::{Array, Array2, Buffer};
use super::engine::{Direction, Engine, Flags};
use super::guard;
use super::plan::Plan;
use super::test_support::{CountingEngine, TOL, assert_close};

#[test]
fn concurrent_create_destroy_never_overlaps() {
    let engine = Arc::new(CountingEngine::default());
    let dyn_engine: Arc<dyn Engine<f64>> = engine.clone();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(8)
        .build()
        .unwrap();

    pool.install(|| {
        (0..400usize).into_par_iter().for_each(|job| {
            let n = 4 + job % 13;
            let mut signal = Array::<f64>::new(n);
            signal.set(job % n, Complex64::new(1.0, 0.0));
            let mut spectrum = signal.zeros_like();
            let mut plan = Plan::with_engine(
                dyn_engine.clone(),
                &mut signal,
                &mut spectrum,
                Direction::Forward,
                Flags::ESTIMATE,
            )
            .unwrap();
            plan.execute().unwrap();
            // Every bin of a shifted delta has unit magnitude.
            for value in plan.output().unwrap() {
                assert!((value.norm() - 1.0).abs() < TOL);
            }
            if job % 2 == 0 {
                plan.destroy();
            }
            // Odd jobs release on drop; even jobs drop an already
            // destroyed plan.
        });
    });

    assert_eq!(engine.overlaps.load(Ordering::SeqCst), 0);
    assert_eq!(engine.created.load(Ordering::SeqCst), 400);
    assert_eq!(engine.executed.load(Ordering::SeqCst), 400);
    assert_eq!(engine.destroyed.load(Ordering::SeqCst), 400);
    assert_eq!(engine.unknown_destroys.load(Ordering::SeqCst), 0);
    assert_eq!(engine.live_plans(), 0);
}

#[test]
fn independent_plans_execute_concurrently_without_interference() {
    let mut signals: Vec<Array2<f64>> = (0..16)
        .map(|seed| {
            let mut signal = Array2::new(8, 8);
            signal.set(seed % 8, 0, Complex64::new(seed as f64 + 1.0, 0.0));
            signal
        })
        .collect();

    let mut plans: Vec<Plan<'_, f64>> = signals
        .iter_mut()
        .map(|signal| Plan::in_place(signal, Direction::Forward, Flags::ESTIMATE).unwrap())
        .collect();
    plans.par_iter_mut().for_each(|plan| {
        plan.execute().unwrap();
    });
    drop(plans);

    for (seed, signal) in signals.iter().enumerate() {
        // A delta of height h in row r transforms to h * exp(-2πi k0 r / 8)
        // along the outer axis, constant along the inner one.
        let h = seed as f64 + 1.0;
        let r = (seed % 8) as f64;
        for k0 in 0..8 {
            let phase = -2.0 * std::f64::consts::PI * k0 as f64 * r / 8.0;
            for k1 in 0..8 {
                assert_close(signal.at(k0, k1), Complex64::from_polar(h, phase), TOL);
            }
        }
    }
}

#[test]
fn holding_the_guard_blocks_plan_creation() {
    let created = Arc::new(AtomicBool::new(false));
    let held = guard::plan_guard();

    let worker = {
        let created = Arc::clone(&created);
        thread::spawn(move || {
            let mut signal = Array::<f64>::new(8);
            let plan = Plan::in_place(&mut signal, Direction::Forward, Flags::ESTIMATE).unwrap();
            created.store(true, Ordering::SeqCst);
            drop(plan);
        })
    };

    thread::sleep(Duration::from_millis(50));
    assert!(!created.load(Ordering::SeqCst));
    drop(held);
    worker.join().unwrap();
    assert!(created.load(Ordering::SeqCst));
}

#[test]
fn execute_does_not_take_the_guard() {
    let mut signal = Array::<f64>::new(8);
    signal.set(0, Complex64::new(1.0, 0.0));
    let mut plan = Plan::in_place(&mut signal, Direction::Forward, Flags::ESTIMATE).unwrap();

    let held = guard::plan_guard();
    // Would deadlock if execute locked the guard.
    plan.execute().unwrap();
    for value in plan.output().unwrap() {
        assert_close(*value, Complex64::new(1.0, 0.0), TOL);
    }
    drop(held);
    plan.destroy();
}

#[test]
fn serialized_returns_closure_value() {
    assert_eq!(guard::serialized(|| 41 + 1), 42);
}
