use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use crate::api::types::TimerId;

/// Callback connected to a timer's timeout.
pub type Callback = Box<dyn FnOnce()>;

/// A pending one-shot timer.
struct Timer {
    /// Seconds left before the timer fires.
    remaining: f32,
    /// Callbacks connected to the timer's timeout, in connection order.
    callbacks: Vec<Callback>,
}

#[derive(Default)]
struct TimerState {
    timers: HashMap<TimerId, Timer>,
    next_id: u32,
}

/// One-shot timer facility driven by the game loop.
///
/// Timers are created with a delay, callbacks are connected to them, and
/// `process(dt)` fires every timer whose delay has elapsed. Fired timers are
/// removed before their callbacks run. There is no cancellation.
///
/// Clones share the same timers, so a callback can hold a clone and
/// schedule follow-up timers. Those are first checked on the next `process`.
#[derive(Clone, Default)]
pub struct TimerQueue {
    state: Rc<RefCell<TimerState>>,
}

/// NaN and negative times count as zero.
#[inline]
fn non_negative(seconds: f32) -> f32 {
    if seconds.is_nan() { 0.0 } else { seconds.max(0.0) }
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a one-shot timer that fires after `delay` seconds.
    /// Negative or NaN delays fire on the next `process` call.
    pub fn create_timer(&mut self, delay: f32) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id = state.next_id.wrapping_add(1);
        let remaining = non_negative(delay);
        state.timers.insert(id, Timer { remaining, callbacks: Vec::new() });
        log::debug!("timer {:?} created ({}s)", id, remaining);
        id
    }

    /// Connect a callback to a pending timer's timeout.
    /// Returns false if the timer has already fired.
    pub fn connect(&mut self, id: TimerId, callback: impl FnOnce() + 'static) -> bool {
        match self.state.borrow_mut().timers.get_mut(&id) {
            Some(timer) => {
                timer.callbacks.push(Box::new(callback));
                true
            }
            None => false,
        }
    }

    /// Create a timer and connect a single callback to it.
    pub fn schedule(&mut self, delay: f32, callback: impl FnOnce() + 'static) -> TimerId {
        let id = self.create_timer(delay);
        self.connect(id, callback);
        id
    }

    /// Seconds left on a pending timer.
    pub fn time_left(&self, id: TimerId) -> Option<f32> {
        self.state.borrow().timers.get(&id).map(|t| t.remaining)
    }

    /// Whether a timer is still waiting to fire.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.state.borrow().timers.contains_key(&id)
    }

    /// Advance all timers by `dt` seconds and take the callbacks of the ones
    /// that elapsed, without running them. NaN or negative `dt` counts as zero.
    ///
    /// Timers come out in order of how far past their deadline they are
    /// (earliest deadline first), with creation order breaking ties.
    /// Returns one entry per elapsed timer.
    pub fn drain_elapsed(&mut self, dt: f32) -> Vec<(TimerId, Vec<Callback>)> {
        let dt = non_negative(dt);
        let mut state = self.state.borrow_mut();
        let mut elapsed: Vec<(TimerId, f32)> = Vec::new();

        for (&id, timer) in state.timers.iter_mut() {
            timer.remaining -= dt;
            if timer.remaining <= 0.0 {
                elapsed.push((id, timer.remaining));
            }
        }

        // Most negative remaining = earliest deadline.
        elapsed.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        let due: Vec<(TimerId, Vec<Callback>)> = elapsed
            .into_iter()
            .filter_map(|(id, _)| state.timers.remove(&id).map(|t| (id, t.callbacks)))
            .collect();
        due
    }

    /// Advance all timers by `dt` seconds and fire the ones that elapsed.
    /// Callbacks run after the queue is released, so they may schedule more timers.
    /// Returns the number of timers fired.
    pub fn process(&mut self, dt: f32) -> usize {
        let due = self.drain_elapsed(dt);
        let fired = due.len();
        for (id, callbacks) in due {
            log::debug!("timer {:?} fired ({} callbacks)", id, callbacks.len());
            for callback in callbacks {
                callback();
            }
        }
        fired
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Whether no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.state.borrow().timers.is_empty()
    }
}

impl std::fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("TimerQueue");
        match self.state.try_borrow() {
            Ok(state) => out
                .field("pending", &state.timers.len())
                .field("next_id", &state.next_id),
            Err(_) => out.field("pending", &"<busy>"),
        };
        out.finish()
    }
}
