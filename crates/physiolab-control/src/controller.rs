// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Lab Controller
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Serialises computations for one lab and owns its published result.
//!
//! The controller is an explicit `Idle → Computing → Idle` machine. A
//! request that arrives while a computation is in flight (from another
//! thread, or re-entrantly from inside the running computation) is parked
//! as the single pending request, replacing any older one. The caller that
//! started the computation drains the pending slot before going idle, so
//! results are always published in submission order and never race.

use physiolab_types::error::LabResult;
use physiolab_types::trace::{TraceSink, TracingSink};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::engine::LabEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Computing,
}

/// What happened to a submitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// This call ran the computation(s) and published generation `generation`.
    Published { generation: u64 },
    /// A computation was in flight; the request will run when it finishes.
    Queued,
}

struct State<P, O> {
    phase: Phase,
    pending: Option<P>,
    current: Option<Arc<O>>,
    generation: u64,
}

pub struct LabController<E: LabEngine> {
    engine: E,
    trace: Arc<dyn TraceSink + Send + Sync>,
    state: Mutex<State<E::Params, E::Output>>,
}

impl<E: LabEngine> LabController<E> {
    /// Controller that forwards engine trace events to `tracing`.
    pub fn new(engine: E) -> Self {
        Self::with_trace(engine, Arc::new(TracingSink))
    }

    pub fn with_trace(engine: E, trace: Arc<dyn TraceSink + Send + Sync>) -> Self {
        LabController {
            engine,
            trace,
            state: Mutex::new(State {
                phase: Phase::Idle,
                pending: None,
                current: None,
                generation: 0,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State<E::Params, E::Output>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.state().phase
    }

    /// Number of results published so far.
    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    /// Latest published result.
    pub fn current(&self) -> Option<Arc<E::Output>> {
        self.state().current.clone()
    }

    pub fn has_pending(&self) -> bool {
        self.state().pending.is_some()
    }

    /// Run `params`, or park it if a computation is already in flight.
    ///
    /// When this call runs, it keeps running parked requests until none
    /// remain, and returns the outcome of the last one. A failed run never
    /// replaces the published result.
    pub fn submit(&self, params: E::Params) -> LabResult<Submission> {
        let lab = self.engine.lab();
        {
            let mut state = self.state();
            if state.phase == Phase::Computing {
                let replaced = state.pending.replace(params).is_some();
                debug!(%lab, replaced, "computation in flight, request parked");
                return Ok(Submission::Queued);
            }
            state.phase = Phase::Computing;
        }
        let mut guard = ComputingGuard {
            controller: self,
            armed: true,
        };

        let mut next = params;
        loop {
            let outcome = self.engine.run(&next, self.trace.as_ref());
            let mut state = self.state();
            let result = match outcome {
                Ok(output) => {
                    state.generation += 1;
                    state.current = Some(Arc::new(output));
                    info!(%lab, generation = state.generation, "result published");
                    Ok(Submission::Published {
                        generation: state.generation,
                    })
                }
                Err(err) => {
                    warn!(%lab, error = %err, "computation failed, keeping previous result");
                    Err(err)
                }
            };
            match state.pending.take() {
                Some(parked) => {
                    debug!(%lab, "draining parked request");
                    next = parked;
                }
                None => {
                    state.phase = Phase::Idle;
                    guard.armed = false;
                    return result;
                }
            }
        }
    }
}

/// Returns the controller to `Idle` when a computation unwinds, so a
/// panicking engine or sink cannot wedge it in `Computing`.
struct ComputingGuard<'a, E: LabEngine> {
    controller: &'a LabController<E>,
    armed: bool,
}

impl<E: LabEngine> Drop for ComputingGuard<'_, E> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let lab = self.controller.engine.lab();
        let mut state = self.controller.state();
        let dropped = state.pending.take().is_some();
        state.phase = Phase::Idle;
        warn!(%lab, dropped, "computation unwound, controller reset to idle");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{StimEngine, StimSetup, UltrasoundEngine};
    use physiolab_tissue::{CustomStack, Scenario};
    use physiolab_types::error::LabError;
    use physiolab_types::state::LabKind;
    use physiolab_types::trace::TraceEvent;
    use physiolab_ultrasound::ThermalParams;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{OnceLock, Weak};

    #[test]
    fn test_idle_submit_publishes() {
        let controller = LabController::new(UltrasoundEngine);
        assert!(controller.current().is_none());
        let outcome = controller.submit(ThermalParams::default()).unwrap();
        assert_eq!(outcome, Submission::Published { generation: 1 });
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.current().unwrap().power_w, 5.0);
    }

    /// Sink that submits a second request from inside the first computation.
    struct ResubmitOnce {
        controller: OnceLock<Weak<LabController<UltrasoundEngine>>>,
        fired: AtomicBool,
        queued: Mutex<Option<Submission>>,
    }

    impl TraceSink for ResubmitOnce {
        fn record(&self, event: TraceEvent) {
            if event.stage != "ultrasound.output" || self.fired.swap(true, Ordering::SeqCst) {
                return;
            }
            let Some(controller) = self.controller.get().and_then(Weak::upgrade) else {
                return;
            };
            let later = ThermalParams {
                intensity_w_cm2: 2.0,
                ..ThermalParams::default()
            };
            let outcome = controller.submit(later).ok();
            *self.queued.lock().unwrap() = outcome;
        }
    }

    #[test]
    fn test_reentrant_submit_is_queued_then_drained() {
        let sink = Arc::new(ResubmitOnce {
            controller: OnceLock::new(),
            fired: AtomicBool::new(false),
            queued: Mutex::new(None),
        });
        let controller = Arc::new(LabController::with_trace(UltrasoundEngine, sink.clone()));
        sink.controller.set(Arc::downgrade(&controller)).ok();

        let outcome = controller.submit(ThermalParams::default()).unwrap();
        assert_eq!(*sink.queued.lock().unwrap(), Some(Submission::Queued));
        // both computations ran; the parked one was published last
        assert_eq!(outcome, Submission::Published { generation: 2 });
        assert_eq!(controller.current().unwrap().power_w, 10.0);
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(!controller.has_pending());
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let controller = LabController::new(StimEngine);
        controller.submit(StimSetup::default()).unwrap();
        let before = controller.current().unwrap();

        // an implant with zero thickness is rejected by the stack validator
        let broken = StimSetup {
            scenario: Some(Scenario::Custom(CustomStack {
                implant: Some(physiolab_tissue::ImplantInsert::metal(1.0, 0.0)),
                ..CustomStack::default()
            })),
            ..StimSetup::default()
        };
        let err = controller.submit(broken).unwrap_err();
        assert!(matches!(err, LabError::InvalidStack(_)));
        assert!(Arc::ptr_eq(&before, &controller.current().unwrap()));
        assert_eq!(controller.generation(), 1);
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.engine().lab(), LabKind::Stimulation);
    }

    /// Sink that panics on the first event it sees.
    struct PanicOnce {
        fired: AtomicBool,
    }

    impl TraceSink for PanicOnce {
        fn record(&self, _event: TraceEvent) {
            if !self.fired.swap(true, Ordering::SeqCst) {
                panic!("sink failure");
            }
        }
    }

    #[test]
    fn test_panicking_run_leaves_controller_usable() {
        let sink = Arc::new(PanicOnce {
            fired: AtomicBool::new(false),
        });
        let controller = LabController::with_trace(UltrasoundEngine, sink);

        let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            controller.submit(ThermalParams::default())
        }));
        assert!(unwound.is_err());
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(!controller.has_pending());
        assert!(controller.current().is_none());

        let outcome = controller.submit(ThermalParams::default()).unwrap();
        assert_eq!(outcome, Submission::Published { generation: 1 });
        assert_eq!(controller.current().unwrap().power_w, 5.0);
    }

    #[test]
    fn test_concurrent_submissions_publish_in_order() {
        let controller = Arc::new(LabController::new(UltrasoundEngine));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let controller = Arc::clone(&controller);
                std::thread::spawn(move || {
                    let params = ThermalParams {
                        duration_min: 1.0 + i as f64,
                        ..ThermalParams::default()
                    };
                    controller.submit(params).unwrap()
                })
            })
            .collect();
        let outcomes: Vec<Submission> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let published = outcomes
            .iter()
            .filter(|o| matches!(o, Submission::Published { .. }))
            .count();
        assert!(published >= 1);
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(!controller.has_pending());
        assert!(controller.generation() >= published as u64);
    }
}
