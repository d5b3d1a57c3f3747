//! Animation player: a library of named animations plus a playback queue.
//!
//! Tracks timing only. Applying poses is left to the host engine.

use std::collections::{HashMap, VecDeque};

/// Definition of a single named animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Duration in seconds.
    pub length: f32,
    /// Whether to loop when reaching the end.
    pub looping: bool,
}

impl Animation {
    /// A one-shot animation of the given length.
    pub fn new(length: f32) -> Self {
        Self { length, looping: false }
    }

    /// A looping animation of the given length.
    pub fn looping(length: f32) -> Self {
        Self { length, looping: true }
    }
}

/// Playback state for a node's animations.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    /// Named animations available to this player.
    animations: HashMap<String, Animation>,
    /// Currently playing animation name (empty when idle).
    current: String,
    /// Seconds into the current animation.
    position: f32,
    /// Whether playback is advancing.
    playing: bool,
    /// Playback speed multiplier (1.0 = normal).
    pub speed: f32,
    /// Animations to play after the current one finishes.
    queue: VecDeque<String>,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self {
            animations: HashMap::new(),
            current: String::new(),
            position: 0.0,
            playing: false,
            speed: 1.0,
            queue: VecDeque::new(),
        }
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`add`](Self::add).
    pub fn with_animation(mut self, name: impl Into<String>, animation: Animation) -> Self {
        self.add(name, animation);
        self
    }

    /// Add or replace an animation.
    pub fn add(&mut self, name: impl Into<String>, animation: Animation) {
        self.animations.insert(name.into(), animation);
    }

    /// Look up an animation by name.
    pub fn get(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name)
    }

    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    /// Name of the animation currently playing or paused, if any.
    pub fn current(&self) -> Option<&str> {
        (!self.current.is_empty()).then_some(self.current.as_str())
    }

    /// Seconds into the current animation.
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Play a named animation from the beginning. Unknown names are ignored.
    pub fn play(&mut self, name: &str) {
        if self.animations.contains_key(name) {
            self.current = name.to_string();
            self.position = 0.0;
            self.playing = true;
        } else {
            log::warn!("play: unknown animation '{}'", name);
        }
    }

    /// Append an animation to the playback queue.
    /// Starts it immediately if nothing is playing.
    pub fn queue(&mut self, name: &str) {
        if self.playing {
            self.queue.push_back(name.to_string());
        } else {
            self.play(name);
        }
    }

    /// Names waiting to play, in order.
    pub fn queued(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Stop playback, rewind and drop anything queued.
    pub fn stop(&mut self) {
        self.playing = false;
        self.position = 0.0;
        self.queue.clear();
    }

    /// Advance playback by `dt` seconds.
    ///
    /// When a one-shot animation reaches its end the next queued animation
    /// starts, carrying over leftover time. Returns the names of animations
    /// that finished during this call.
    pub fn tick(&mut self, dt: f32) -> Vec<String> {
        let mut finished = Vec::new();
        if !self.playing {
            return finished;
        }

        let mut remaining = dt * self.speed;
        while self.playing {
            let Some(anim) = self.animations.get(&self.current) else {
                self.playing = false;
                break;
            };

            let left = anim.length - self.position;
            if remaining < left {
                self.position += remaining;
                break;
            }

            if anim.looping {
                if anim.length <= 0.0 {
                    break;
                }
                self.position = (self.position + remaining) % anim.length;
                break;
            }

            remaining -= left.max(0.0);
            self.position = anim.length;
            finished.push(self.current.clone());
            log::debug!("animation '{}' finished", self.current);

            match self.queue.pop_front() {
                Some(next) if self.animations.contains_key(&next) => {
                    self.current = next;
                    self.position = 0.0;
                }
                Some(next) => {
                    log::warn!("queued animation '{}' no longer exists", next);
                    self.playing = false;
                }
                None => self.playing = false,
            }
        }

        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> AnimationPlayer {
        AnimationPlayer::new()
            .with_animation("idle", Animation::looping(1.0))
            .with_animation("attack", Animation::new(0.5))
            .with_animation("RESET", Animation::new(0.0))
    }

    #[test]
    fn play_unknown_is_ignored() {
        let mut anim = player();
        anim.play("fly");
        assert_eq!(anim.current(), None);
        assert!(!anim.is_playing());
    }

    #[test]
    fn queue_starts_when_idle_and_waits_when_busy() {
        let mut anim = player();
        anim.queue("attack");
        assert_eq!(anim.current(), Some("attack"));
        assert_eq!(anim.queued().count(), 0);

        anim.queue("RESET");
        assert_eq!(anim.queued().collect::<Vec<_>>(), vec!["RESET"]);
    }

    #[test]
    fn one_shot_advances_through_queue() {
        let mut anim = player();
        anim.play("attack");
        anim.queue("attack");
        anim.queue("RESET");

        let finished = anim.tick(0.75);
        assert_eq!(finished, vec!["attack"]);
        assert_eq!(anim.current(), Some("attack"));
        assert!((anim.position() - 0.25).abs() < 1e-6);

        let finished = anim.tick(0.25);
        assert_eq!(finished, vec!["attack", "RESET"]);
        assert!(!anim.is_playing());
    }

    #[test]
    fn looping_wraps_position() {
        let mut anim = player();
        anim.play("idle");
        let finished = anim.tick(2.5);
        assert!(finished.is_empty());
        assert!(anim.is_playing());
        assert!((anim.position() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn stop_rewinds_and_clears_queue() {
        let mut anim = player();
        anim.play("attack");
        anim.queue("idle");
        anim.tick(0.2);
        anim.stop();
        assert!(!anim.is_playing());
        assert_eq!(anim.position(), 0.0);
        assert_eq!(anim.queued().count(), 0);
    }

    #[test]
    fn speed_scales_playback() {
        let mut anim = player();
        anim.speed = 2.0;
        anim.play("attack");
        assert_eq!(anim.tick(0.25), vec!["attack"]);
    }
}
