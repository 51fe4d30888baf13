use std::collections::HashMap;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::NaiveDate;
use crossbeam_channel::{unbounded, Receiver, Sender};
use uuid::Uuid;

use super::{DateUpdate, PhaseStore};
use crate::error::{Result, TimelineError};
use crate::model::Phase;

/// One date update queued for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRequest {
    pub seq: u64,
    pub phase_id: Uuid,
    pub update: DateUpdate,
}

/// What the store said about a request.
#[derive(Debug)]
pub struct CommitOutcome {
    pub request: CommitRequest,
    pub result: Result<()>,
}

/// Sends date updates to the store on a background thread.
///
/// Submitting never blocks the UI; outcomes are collected with [`poll`](Self::poll)
/// whenever convenient, possibly several interactions later.
pub struct CommitWorker {
    tx: Option<Sender<CommitRequest>>,
    rx: Receiver<CommitOutcome>,
    handle: Option<JoinHandle<()>>,
    next_seq: u64,
}

impl CommitWorker {
    pub fn spawn(store: Arc<dyn PhaseStore>) -> Result<Self> {
        let (req_tx, req_rx) = unbounded::<CommitRequest>();
        let (out_tx, out_rx) = unbounded::<CommitOutcome>();

        let handle = std::thread::Builder::new()
            .name("phase-commit".into())
            .spawn(move || {
                for request in req_rx.iter() {
                    let result = store.update_phase_dates(request.phase_id, request.update);
                    if let Err(e) = &result {
                        log::warn!("Saving dates for {} failed: {}", request.phase_id, e);
                    }
                    if out_tx.send(CommitOutcome { request, result }).is_err() {
                        break;
                    }
                }
                log::debug!("commit worker stopped");
            })?;

        Ok(Self {
            tx: Some(req_tx),
            rx: out_rx,
            handle: Some(handle),
            next_seq: 1,
        })
    }

    /// Queue a date update for `phase_id`.
    pub fn submit(&mut self, phase_id: Uuid, update: DateUpdate) -> Result<CommitRequest> {
        let request = CommitRequest {
            seq: self.next_seq,
            phase_id,
            update,
        };
        self.tx
            .as_ref()
            .ok_or(TimelineError::WorkerDisconnected)?
            .send(request)
            .map_err(|_| TimelineError::WorkerDisconnected)?;
        self.next_seq += 1;
        Ok(request)
    }

    /// Outcomes that have arrived so far.
    pub fn poll(&self) -> Vec<CommitOutcome> {
        self.rx.try_iter().collect()
    }

    /// Block up to `timeout` for the next outcome.
    pub fn wait(&self, timeout: Duration) -> Option<CommitOutcome> {
        self.rx.recv_timeout(timeout).ok()
    }
}

impl Drop for CommitWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Dates to restore after the store rejected an optimistic update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rollback {
    pub phase_id: Uuid,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Tracks the last dates the store confirmed for each phase and which
/// commit is the newest one still in flight.
#[derive(Debug, Default)]
pub struct PendingCommits {
    confirmed: HashMap<Uuid, (Option<NaiveDate>, Option<NaiveDate>)>,
    in_flight: HashMap<Uuid, u64>,
}

impl PendingCommits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything and take `phases` as the confirmed state.
    pub fn reset(&mut self, phases: &[Phase]) {
        self.in_flight.clear();
        self.confirmed = phases
            .iter()
            .map(|p| (p.id, (p.start_date, p.end_date)))
            .collect();
    }

    pub fn submitted(&mut self, request: &CommitRequest) {
        self.in_flight.insert(request.phase_id, request.seq);
    }

    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Record an outcome. Returns the dates to restore when it failed and no
    /// newer commit for the same phase is still pending.
    pub fn resolve(&mut self, outcome: &CommitOutcome) -> Option<Rollback> {
        let CommitRequest {
            seq,
            phase_id,
            update,
        } = outcome.request;
        let latest = self.in_flight.get(&phase_id) == Some(&seq);
        if latest {
            self.in_flight.remove(&phase_id);
        }
        match &outcome.result {
            Ok(()) => {
                self.confirmed
                    .insert(phase_id, (update.start_date, update.end_date));
                None
            }
            Err(_) if latest => {
                let (start, end) = self.confirmed.get(&phase_id).copied()?;
                Some(Rollback {
                    phase_id,
                    start,
                    end,
                })
            }
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::DateCommit;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn request(seq: u64, commit: DateCommit) -> CommitRequest {
        CommitRequest {
            seq,
            phase_id: commit.phase_id,
            update: commit.into(),
        }
    }

    fn outcome(seq: u64, commit: DateCommit, ok: bool) -> CommitOutcome {
        CommitOutcome {
            request: request(seq, commit),
            result: if ok {
                Ok(())
            } else {
                Err(TimelineError::Store("offline".into()))
            },
        }
    }

    #[test]
    fn failure_rolls_back_to_confirmed_dates() {
        let phase = Phase::new("a", 0).with_dates(Some(d(2024, 3, 1)), Some(d(2024, 3, 10)));
        let mut pending = PendingCommits::new();
        pending.reset(std::slice::from_ref(&phase));

        let commit = DateCommit {
            phase_id: phase.id,
            start: d(2024, 3, 6),
            end: d(2024, 3, 15),
        };
        pending.submitted(&request(1, commit));
        let rollback = pending.resolve(&outcome(1, commit, false));
        assert_eq!(
            rollback,
            Some(Rollback {
                phase_id: phase.id,
                start: Some(d(2024, 3, 1)),
                end: Some(d(2024, 3, 10)),
            })
        );
        assert!(!pending.has_in_flight());
    }

    #[test]
    fn superseded_failure_is_left_to_the_newer_commit() {
        let phase = Phase::new("a", 0).with_dates(Some(d(2024, 3, 1)), Some(d(2024, 3, 10)));
        let mut pending = PendingCommits::new();
        pending.reset(std::slice::from_ref(&phase));

        let first = DateCommit {
            phase_id: phase.id,
            start: d(2024, 3, 2),
            end: d(2024, 3, 11),
        };
        let second = DateCommit {
            phase_id: phase.id,
            start: d(2024, 3, 3),
            end: d(2024, 3, 12),
        };
        pending.submitted(&request(1, first));
        pending.submitted(&request(2, second));

        assert_eq!(pending.resolve(&outcome(1, first, false)), None);
        assert!(pending.has_in_flight());
        // Newer one fails too: back to what the store last confirmed.
        let rollback = pending.resolve(&outcome(2, second, false)).unwrap();
        assert_eq!(rollback.start, Some(d(2024, 3, 1)));
    }

    #[test]
    fn success_becomes_the_new_baseline() {
        let phase = Phase::new("a", 0).with_dates(Some(d(2024, 3, 1)), Some(d(2024, 3, 10)));
        let mut pending = PendingCommits::new();
        pending.reset(std::slice::from_ref(&phase));

        let ok = DateCommit {
            phase_id: phase.id,
            start: d(2024, 4, 1),
            end: d(2024, 4, 10),
        };
        let bad = DateCommit {
            phase_id: phase.id,
            start: d(2024, 5, 1),
            end: d(2024, 5, 10),
        };
        pending.submitted(&request(1, ok));
        assert_eq!(pending.resolve(&outcome(1, ok, true)), None);
        pending.submitted(&request(2, bad));
        let rollback = pending.resolve(&outcome(2, bad, false)).unwrap();
        assert_eq!((rollback.start, rollback.end), (Some(d(2024, 4, 1)), Some(d(2024, 4, 10))));
    }
}
