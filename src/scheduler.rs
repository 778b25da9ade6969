//! Virtual-time timer wheel.
//!
//! Every delayed or periodic behaviour on the page (balloon spawn / motion,
//! combo decay, pop removal, effect clears, mascot antics) is a timer here.
//! The browser frame loop feeds elapsed milliseconds in; tests feed them in
//! directly, so nothing depends on wall-clock delays.
//!
//! Timers fire in deadline order; timers sharing a deadline fire in the order
//! they were (re)scheduled. Cancelling a handle guarantees its event is never
//! delivered afterwards.

/// Handle to a scheduled timer. Handles are never reused within a scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Timer<E> {
    id: TimerId,
    due_ms: f64,
    period_ms: Option<f64>,
    seq: u64, // tie-break for equal deadlines
    event: E,
}

pub struct Scheduler<E> {
    now_ms: f64,
    next_id: u64,
    next_seq: u64,
    timers: Vec<Timer<E>>,
}

impl<E: Clone> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 0,
            next_seq: 0,
            timers: Vec::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> f64 {
        self.now_ms
    }

    /// Fire `event` once, `delay_ms` from now.
    pub fn schedule_once(&mut self, delay_ms: f64, event: E) -> TimerId {
        self.insert(delay_ms.max(0.0), None, event)
    }

    /// Fire `event` every `period_ms`, first at `now + period_ms`.
    /// Non-positive periods are clamped to 1ms so `advance` always terminates.
    pub fn schedule_every(&mut self, period_ms: f64, event: E) -> TimerId {
        let period = if period_ms > 0.0 { period_ms } else { 1.0 };
        self.insert(period, Some(period), event)
    }

    fn insert(&mut self, delay_ms: f64, period_ms: Option<f64>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms + delay_ms,
            period_ms,
            seq,
            event,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let s = self.next_seq;
        self.next_seq += 1;
        s
    }

    /// Returns true if the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel the handle stored in `slot`, if any, and empty the slot.
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerId>) {
        if let Some(id) = slot.take() {
            self.cancel(id);
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Pop the earliest timer due at or before `deadline_ms`, moving the clock
    /// to its deadline. Periodic timers are re-armed one period later.
    ///
    /// Callers loop on this so handlers may schedule or cancel timers between
    /// deliveries; finish with [`Scheduler::settle`].
    pub fn next_due(&mut self, deadline_ms: f64) -> Option<(TimerId, E)> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= deadline_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;

        let due = self.timers[idx].due_ms;
        if due > self.now_ms {
            self.now_ms = due;
        }
        match self.timers[idx].period_ms {
            Some(period) => {
                let seq = self.bump_seq();
                let t = &mut self.timers[idx];
                t.due_ms += period;
                t.seq = seq;
                Some((t.id, t.event.clone()))
            }
            None => {
                let t = self.timers.swap_remove(idx);
                Some((t.id, t.event))
            }
        }
    }

    /// Move the clock to `deadline_ms` once all due timers were delivered.
    pub fn settle(&mut self, deadline_ms: f64) {
        if deadline_ms > self.now_ms {
            self.now_ms = deadline_ms;
        }
    }

    /// Deliver everything due within the next `dt_ms` without re-entrancy.
    /// Handlers that need to schedule while draining should use
    /// [`Scheduler::next_due`] instead.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<E> {
        let deadline = self.now_ms + dt_ms.max(0.0);
        let mut fired = Vec::new();
        while let Some((_, e)) = self.next_due(deadline) {
            fired.push(e);
        }
        self.settle(deadline);
        fired
    }
}
