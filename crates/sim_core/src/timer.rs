//! Cancellable deferred tick used to pace a layer sequence.

use std::time::{Duration, Instant};

/// Identifies one arming of a [`StepTimer`]. A token stops being live as soon
/// as the timer is re-armed or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    pub token: TickToken,
    pub deadline: Instant,
}

#[derive(Debug)]
pub struct StepTimer {
    interval: Duration,
    generation: u64,
    pending: Option<Expiry>,
}

impl StepTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            generation: 0,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedules a tick one interval after `now`, replacing any pending one.
    pub fn arm(&mut self, now: Instant) -> TickToken {
        self.arm_at(now + self.interval)
    }

    /// Schedules a tick at an explicit deadline, replacing any pending one.
    pub fn arm_at(&mut self, deadline: Instant) -> TickToken {
        self.generation = self.generation.wrapping_add(1);
        let token = TickToken(self.generation);
        self.pending = Some(Expiry { token, deadline });
        tracing::trace!(generation = self.generation, "step timer armed");
        token
    }

    /// Drops the pending tick. Returns `true` if one was scheduled.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_live(&self, token: TickToken) -> bool {
        self.pending.is_some_and(|pending| pending.token == token)
    }

    pub fn pending(&self) -> Option<Expiry> {
        self.pending
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.deadline)
    }

    /// Remaining delay before the pending tick, zero if already overdue.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consumes the pending tick if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<Expiry> {
        match self.pending {
            Some(pending) if pending.deadline <= now => self.pending.take(),
            _ => None,
        }
    }
}
