/*!
# OnceGate Integration Tests

A process-wide gate shared through a static and through `Arc`.
*/

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use satchel_core::{GateStatus, OnceGate};

static STARTUP: OnceGate = OnceGate::new();
static STARTUP_RUNS: AtomicUsize = AtomicUsize::new(0);

#[test]
fn test_static_gate_runs_once() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                STARTUP.ensure_infallible(|| {
                    STARTUP_RUNS.fetch_add(1, Ordering::SeqCst);
                })
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ran| *ran)
        .count();

    assert_eq!(winners, 1);
    assert_eq!(STARTUP_RUNS.load(Ordering::SeqCst), 1);
    assert_eq!(STARTUP.status(), GateStatus::Complete);
}

#[test]
fn test_shared_gate_retries_after_reset() -> anyhow::Result<()> {
    let gate = Arc::new(OnceGate::new());
    let attempts = Arc::new(AtomicUsize::new(0));

    let worker = {
        let gate = Arc::clone(&gate);
        let attempts = Arc::clone(&attempts);
        thread::spawn(move || {
            gate.ensure(
                || {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>("connection refused")
                },
                true,
            )
        })
    };
    assert_eq!(worker.join().unwrap(), Err("connection refused"));
    assert_eq!(gate.status(), GateStatus::NotRun);

    let ran = gate.ensure(
        || {
            attempts.fetch_add(1, Ordering::SeqCst);
            Ok::<(), anyhow::Error>(())
        },
        true,
    )?;
    assert!(ran);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(gate.status(), GateStatus::Complete);
    Ok(())
}
