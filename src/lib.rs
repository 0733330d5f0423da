pub mod app;
pub mod components;
pub mod config;
pub mod dropper;
pub mod error;
pub mod game;
pub mod merge;
pub mod progression;
pub mod selector;
pub mod session;
pub mod systems;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::{Duration, Instant};

#[derive(Resource, Debug, Clone)]
pub struct Time {
    delta: Duration,
    last_update: Instant,
    scale: f32,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    #[must_use]
    pub fn new() -> Self {
        Self {
            delta: Duration::default(),
            last_update: Instant::now(),
            scale: game::NORMAL_TIME_SCALE,
        }
    }

    /// Measures the wall-clock delta since the previous update
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_update);
        self.last_update = now;
    }

    /// Sets the delta directly, for hosts that drive their own clock
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        // Absurd deltas would overflow the Instant; keep the old stamp then
        if let Some(next) = self.last_update.checked_add(delta) {
            self.last_update = next;
        }
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.max(0.0);
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Unscaled frame delta
    #[must_use]
    pub fn raw_delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Frame delta after the session's time scale
    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32() * self.scale
    }
}
