//! Virtual-clock timers
//!
//! Delays are scheduled callbacks, never blocking waits. Every timer carries
//! the epoch it was scheduled in; the session bumps its epoch on each
//! transition, so a timer from an older epoch is skipped when it fires.
//! Handlers re-read live state at fire time rather than trusting anything
//! captured at schedule time.

use crate::types::EntityId;

/// Deferred work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTask {
    /// Clear a bloomed target and spawn its replacement
    ReplaceBloom { id: EntityId },
    /// Refill a drained leaf batch
    RefillLeaves,
    /// Hide the praise phrase with this token, unless replaced since
    ExpirePraise { token: u64 },
    /// Deliver the simulated image for a prompt
    FinishCreation { prompt: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled {
    pub due_ms: u64,
    pub epoch: u64,
    pub task: TimerTask,
    seq: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `task` after `delay_ms`
    pub fn schedule(&mut self, delay_ms: u64, epoch: u64, task: TimerTask) {
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due_ms: self.now_ms + delay_ms,
            epoch,
            task,
            seq: self.next_seq,
        });
    }

    /// Take the earliest timer due at or before `until`, moving the clock to it
    ///
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: u64) -> Option<Scheduled> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= until)
            .min_by_key(|(_, s)| (s.due_ms, s.seq))
            .map(|(i, _)| i)?;
        let next = self.pending.swap_remove(index);
        self.now_ms = self.now_ms.max(next.due_ms);
        Some(next)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Is a task of this shape waiting in the given epoch?
    pub fn has_pending(&self, epoch: u64, task: &TimerTask) -> bool {
        self.pending.iter().any(|s| s.epoch == epoch && &s.task == task)
    }
}
