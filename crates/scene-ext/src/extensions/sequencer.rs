// extensions/sequencer.rs
//
// Queue an animation and get a callback once it should be done.
// The callback rides on a one-shot timer whose delay defaults to the
// animation's length; the timer and the playback queue are not linked.
//
// Usage:
//   queue_with_callback(&mut player, &mut timers, "attack", || hit_done(), None)?;
//   queue_with_callback_and_reset(&mut player, &mut timers, "die", on_dead, Some(2.0))?;
//   timers.process(dt);  // Fires elapsed callbacks

use crate::api::config::{SequencerConfig, RESET_ANIMATION};
use crate::api::types::TimerId;
use crate::components::animation::AnimationPlayer;
use crate::core::timer::TimerQueue;
use crate::error::{Error, Result};

/// Animation runtime the sequencer drives.
pub trait AnimationSource {
    /// Length in seconds of a named animation, `None` if it does not exist.
    fn animation_length(&self, name: &str) -> Option<f32>;

    fn has_animation(&self, name: &str) -> bool {
        self.animation_length(name).is_some()
    }

    /// Append a name to the playback queue.
    fn queue(&mut self, name: &str);
}

/// Timer facility the sequencer schedules callbacks on.
pub trait TimerScheduler {
    /// Create a one-shot timer that runs `callback` after `delay` seconds.
    fn schedule(&mut self, delay: f32, callback: Box<dyn FnOnce()>) -> TimerId;
}

impl AnimationSource for AnimationPlayer {
    fn animation_length(&self, name: &str) -> Option<f32> {
        self.get(name).map(|anim| anim.length)
    }

    fn has_animation(&self, name: &str) -> bool {
        AnimationPlayer::has_animation(self, name)
    }

    fn queue(&mut self, name: &str) {
        AnimationPlayer::queue(self, name);
    }
}

impl TimerScheduler for TimerQueue {
    fn schedule(&mut self, delay: f32, callback: Box<dyn FnOnce()>) -> TimerId {
        TimerQueue::schedule(self, delay, callback)
    }
}

/// Queues animations with completion callbacks and an optional reset pose.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSequencer {
    /// Animation queued by the reset step.
    pub reset_animation: String,
}

impl Default for AnimationSequencer {
    fn default() -> Self {
        Self {
            reset_animation: RESET_ANIMATION.to_string(),
        }
    }
}

impl From<&SequencerConfig> for AnimationSequencer {
    fn from(config: &SequencerConfig) -> Self {
        Self {
            reset_animation: config.reset_animation.clone(),
        }
    }
}

impl AnimationSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `name` and fire `on_finished` after `delay` seconds, or after
    /// the animation's length when no delay is given.
    ///
    /// An unknown name fails with [`Error::AnimationNotFound`] before any
    /// timer is created or anything is queued.
    pub fn queue_with_callback<A, T, F>(
        &self,
        player: &mut A,
        timers: &mut T,
        name: &str,
        on_finished: F,
        delay: Option<f32>,
    ) -> Result<TimerId>
    where
        A: AnimationSource + ?Sized,
        T: TimerScheduler + ?Sized,
        F: FnOnce() + 'static,
    {
        let Some(length) = player.animation_length(name) else {
            log::warn!("queue_with_callback: animation '{}' not found", name);
            return Err(Error::AnimationNotFound(name.to_string()));
        };

        let delay = delay.unwrap_or(length);
        let timer = timers.schedule(delay, Box::new(on_finished));
        player.queue(name);
        log::debug!("queued '{}' with callback in {}s ({:?})", name, delay, timer);
        Ok(timer)
    }

    /// [`queue_with_callback`](Self::queue_with_callback), then queue the
    /// reset animation behind it.
    pub fn queue_with_callback_and_reset<A, T, F>(
        &self,
        player: &mut A,
        timers: &mut T,
        name: &str,
        on_finished: F,
        delay: Option<f32>,
    ) -> Result<TimerId>
    where
        A: AnimationSource + ?Sized,
        T: TimerScheduler + ?Sized,
        F: FnOnce() + 'static,
    {
        let timer = self.queue_with_callback(player, timers, name, on_finished, delay)?;
        self.reset(player);
        Ok(timer)
    }

    /// Queue the reset animation if the player has one.
    /// Returns whether anything was queued.
    pub fn reset<A: AnimationSource + ?Sized>(&self, player: &mut A) -> bool {
        if !player.has_animation(&self.reset_animation) {
            return false;
        }
        player.queue(&self.reset_animation);
        log::debug!("queued reset animation '{}'", self.reset_animation);
        true
    }
}

/// Queue `name` on `player` and fire `on_finished` on `timers` once the
/// delay (default: the animation's length) elapses.
pub fn queue_with_callback<A, T, F>(
    player: &mut A,
    timers: &mut T,
    name: &str,
    on_finished: F,
    delay: Option<f32>,
) -> Result<TimerId>
where
    A: AnimationSource + ?Sized,
    T: TimerScheduler + ?Sized,
    F: FnOnce() + 'static,
{
    AnimationSequencer::default().queue_with_callback(player, timers, name, on_finished, delay)
}

/// Like [`queue_with_callback`], then queue `"RESET"` if the player has it.
pub fn queue_with_callback_and_reset<A, T, F>(
    player: &mut A,
    timers: &mut T,
    name: &str,
    on_finished: F,
    delay: Option<f32>,
) -> Result<TimerId>
where
    A: AnimationSource + ?Sized,
    T: TimerScheduler + ?Sized,
    F: FnOnce() + 'static,
{
    AnimationSequencer::default().queue_with_callback_and_reset(player, timers, name, on_finished, delay)
}

/// Queue `"RESET"` if the player has it.
pub fn reset<A: AnimationSource + ?Sized>(player: &mut A) -> bool {
    AnimationSequencer::default().reset(player)
}
