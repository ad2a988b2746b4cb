//! Deferred transitions
//!
//! Resets and delayed messages are scheduled here instead of as loose
//! callbacks. Each timer remembers the attempt generation it was scheduled
//! in, so the owner can tell a timer from a superseded attempt apart from a
//! live one.

/// What to do when a timer comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Return to aiming
    Reset,
    /// Show the miss message and retry button
    AnnounceMiss,
    /// Hide the fact shown after a win
    HideFact,
}

/// Handle for a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub id: u64,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTimer {
    pub token: TimerToken,
    pub action: TimerAction,
    /// Delay requested at scheduling time (seconds)
    pub delay: f64,
    /// Absolute due time on the host clock (seconds)
    pub due_at: f64,
}

/// Pending timers, in scheduling order
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pending: Vec<ScheduledTimer>,
    next_id: u64,
}

impl Timers {
    pub fn schedule(&mut self, now: f64, delay: f64, action: TimerAction, generation: u64) -> TimerToken {
        let token = TimerToken {
            id: self.next_id,
            generation,
        };
        self.next_id += 1;
        self.pending.push(ScheduledTimer {
            token,
            action,
            delay,
            due_at: now + delay,
        });
        token
    }

    /// Drop every timer scheduled before `generation`. Returns how many.
    pub fn cancel_older_than(&mut self, generation: u64) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.token.generation >= generation);
        before - self.pending.len()
    }

    /// Remove and return timers due at `now`, earliest first (ties keep
    /// scheduling order)
    pub fn take_due(&mut self, now: f64) -> Vec<ScheduledTimer> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due_at <= now);
        self.pending = pending;
        due.sort_by(|a, b| {
            a.due_at
                .partial_cmp(&b.due_at)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.token.id.cmp(&b.token.id))
        });
        due
    }

    pub fn pending(&self) -> &[ScheduledTimer] {
        &self.pending
    }

    /// First pending timer with the given action
    pub fn find(&self, action: TimerAction) -> Option<&ScheduledTimer> {
        self.pending.iter().find(|t| t.action == action)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
