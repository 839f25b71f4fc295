//! Process-wide plan guard.
//!
//! Native DFT engines generally document that the planner is not thread-safe:
//! creating and destroying plans must be single-threaded, while executing
//! existing plans may happen from any thread. Every create/destroy call made
//! by [`Plan`](crate::plan::Plan) runs inside [`serialized`]; execution never
//! takes this lock.

use parking_lot::{Mutex, MutexGuard};

static PLAN_GUARD: Mutex<()> = Mutex::new(());

/// Runs `f` while holding the plan guard.
///
/// The lock is held for exactly the duration of `f`, which should be a
/// single native create or destroy call. The guard is not reentrant: `f`
/// must not build or destroy a [`Plan`](crate::plan::Plan) itself.
pub fn serialized<R>(f: impl FnOnce() -> R) -> R {
    let _held = PLAN_GUARD.lock();
    f()
}

/// Acquires the plan guard directly.
///
/// For callers touching other engine-global planner state (wisdom import or
/// export, planner cleanup) that must not overlap with plan creation.
pub fn plan_guard() -> MutexGuard<'static, ()> {
    PLAN_GUARD.lock()
}
