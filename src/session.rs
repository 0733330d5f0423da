#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, TryIter};
use log::{debug, info};

use crate::game::{FROZEN_TIME_SCALE, NORMAL_TIME_SCALE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Lifecycle notifications broadcast to every live subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    GameStarted,
    GamePaused,
    GameResumed,
    GameStopped,
}

/// Show/hide surfaces owned by the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiPanels {
    pub game_visible: bool,
    pub pause_menu_visible: bool,
}

/// Receiving end of a session subscription. Dropping it unsubscribes: the
/// session prunes the matching sender on its next broadcast.
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<SessionEvent>,
}

impl Subscription {
    pub fn try_iter(&self) -> TryIter<'_, SessionEvent> {
        self.receiver.try_iter()
    }

    /// Collects every event received since the last drain
    #[must_use]
    pub fn drain(&self) -> Vec<SessionEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Play/pause state shared by the dropper and the merge engine. There is one
/// per `World`, inserted by the app assembly; everything else only reads it.
#[derive(Resource, Debug)]
pub struct Session {
    state: SessionState,
    time_scale: f32,
    ui: UiPanels,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::Stopped,
            time_scale: NORMAL_TIME_SCALE,
            ui: UiPanels::default(),
            subscribers: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self.state, SessionState::Playing | SessionState::Paused)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    /// True when drops, movement and merges should be processed this tick
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.state == SessionState::Playing
    }

    #[must_use]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    #[must_use]
    pub fn ui(&self) -> UiPanels {
        self.ui
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (sender, receiver) = crossbeam_channel::unbounded();
        self.subscribers.push(sender);
        Subscription { receiver }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Stopped or Paused -> Playing. No-op while already Playing.
    pub fn start(&mut self) {
        if self.state == SessionState::Playing {
            debug!("start ignored, already playing");
            return;
        }
        self.state = SessionState::Playing;
        self.time_scale = NORMAL_TIME_SCALE;
        self.ui.game_visible = true;
        self.ui.pause_menu_visible = false;
        info!("Game started");
        self.publish(SessionEvent::GameStarted);
    }

    /// Playing -> Paused. No-op in any other state.
    pub fn pause(&mut self) {
        if self.state != SessionState::Playing {
            debug!("pause ignored in {:?}", self.state);
            return;
        }
        self.state = SessionState::Paused;
        self.time_scale = FROZEN_TIME_SCALE;
        self.ui.pause_menu_visible = true;
        info!("Game paused");
        self.publish(SessionEvent::GamePaused);
    }

    /// Paused -> Playing. No-op in any other state.
    pub fn resume(&mut self) {
        if self.state != SessionState::Paused {
            debug!("resume ignored in {:?}", self.state);
            return;
        }
        self.state = SessionState::Playing;
        self.time_scale = NORMAL_TIME_SCALE;
        self.ui.pause_menu_visible = false;
        info!("Game resumed");
        self.publish(SessionEvent::GameResumed);
    }

    /// Any state -> Stopped
    pub fn stop(&mut self) {
        self.state = SessionState::Stopped;
        self.time_scale = NORMAL_TIME_SCALE;
        self.ui = UiPanels::default();
        info!("Game stopped");
        self.publish(SessionEvent::GameStopped);
    }

    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Drops every listener. Later transitions still work but notify nobody.
    pub fn shutdown(&mut self) {
        debug!("Session shutdown, clearing {} listeners", self.subscribers.len());
        self.subscribers.clear();
    }

    fn publish(&mut self, event: SessionEvent) {
        // A failed send means the subscription was dropped
        self.subscribers.retain(|sender| sender.send(event).is_ok());
    }
}
