#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::{FruitKind, Input, Position, Viewport};
use crate::config::gameplay::{DropperConfig, MovementAxis, ViewportConfig};
use crate::error::{GameError, GameResult};
use crate::selector::NextDropSelector;
use crate::session::Session;
use crate::systems::{spawn_fruit, spawn_preview};

/// Rectangle the dropper's centre may occupy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Visible half extents shrunk by the dropper's own half footprint and
    /// the padding. An axis too narrow to move on collapses to its centre.
    #[must_use]
    pub fn from_view(view_half: (f32, f32), footprint_half: (f32, f32), padding: f32) -> Self {
        let reach_x = (view_half.0 - footprint_half.0 - padding).max(0.0);
        let reach_y = (view_half.1 - footprint_half.1 - padding).max(0.0);
        Self {
            min_x: -reach_x,
            max_x: reach_x,
            min_y: -reach_y,
            max_y: reach_y,
        }
    }

    #[must_use]
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.min_x, self.max_x)
    }

    #[must_use]
    pub fn clamp_y(&self, y: f32) -> f32 {
        y.clamp(self.min_y, self.max_y)
    }
}

/// Pending fruit, its position, and the smoothed input driving it
#[derive(Resource, Debug, Clone)]
pub struct Dropper {
    pub pending_kind: FruitKind,
    pub position: Position,
    pub smoothed: (f32, f32),
    pub pointer_active: bool,
    pub preview: Option<Entity>,
    settings: DropperConfig,
    fallback_view: (f32, f32),
    last_bounds: Option<Bounds>,
    missing_view_logged: bool,
}

impl Dropper {
    #[must_use]
    pub fn new(settings: &DropperConfig, fallback: &ViewportConfig, pending_kind: FruitKind) -> Self {
        Self {
            pending_kind,
            position: Position::new(0.0, settings.start_y),
            smoothed: (0.0, 0.0),
            pointer_active: false,
            preview: None,
            settings: settings.clone(),
            fallback_view: (fallback.half_width, fallback.half_height),
            last_bounds: None,
            missing_view_logged: false,
        }
    }

    /// Re-arms the dropper for a new round. Preview entities are the
    /// caller's to despawn.
    pub fn reset(&mut self, pending_kind: FruitKind) {
        self.pending_kind = pending_kind;
        self.position = Position::new(0.0, self.settings.start_y);
        self.smoothed = (0.0, 0.0);
        self.pointer_active = false;
        self.preview = None;
    }

    #[must_use]
    pub fn settings(&self) -> &DropperConfig {
        &self.settings
    }

    /// Bounds for this tick. Without a viewport the last known bounds are
    /// reused, or the configured fallback extents if there never was one.
    pub fn current_bounds(&mut self, viewport: Option<Viewport>) -> Bounds {
        let footprint = (self.settings.half_width, self.settings.half_height);

        if let Some(view) = viewport {
            let bounds = Bounds::from_view(
                (view.half_width, view.half_height),
                footprint,
                self.settings.padding,
            );
            self.last_bounds = Some(bounds);
            return bounds;
        }

        if !self.missing_view_logged {
            warn!(
                "{}, using fallback dropper bounds",
                GameError::MissingCollaborator("camera viewport")
            );
            self.missing_view_logged = true;
        }

        self.last_bounds
            .unwrap_or_else(|| Bounds::from_view(self.fallback_view, footprint, self.settings.padding))
    }

    /// Advances one tick: smooth the raw input, integrate, clamp.
    pub fn step(&mut self, raw: (f32, f32), delta_seconds: f32, bounds: Bounds) {
        let factor = self.settings.smoothing_factor();
        self.smoothed.0 += (raw.0 - self.smoothed.0) * factor;
        self.smoothed.1 += (raw.1 - self.smoothed.1) * factor;

        let travel = self.settings.speed * delta_seconds;
        self.position.x = bounds.clamp_x(self.position.x + self.smoothed.0 * travel);

        if self.settings.axis == MovementAxis::Planar {
            self.position.y = bounds.clamp_y(self.position.y + self.smoothed.1 * travel);
        }
    }

    #[must_use]
    pub fn preview_position(&self) -> Position {
        let preview = &self.settings.preview;
        Position::new(
            self.position.x + preview.offset_x,
            self.position.y + preview.offset_y,
        )
    }
}

/// Smooths and applies this tick's movement input
pub fn dropper_movement_system(world: &mut World, delta_seconds: f32) {
    let accepts = world
        .get_resource::<Session>()
        .is_some_and(Session::accepts_input);
    if !accepts {
        return;
    }

    let raw = world
        .get_resource::<Input>()
        .map_or((0.0, 0.0), |input| input.movement);
    let viewport = world.get_resource::<Viewport>().copied();

    if let Some(mut dropper) = world.get_resource_mut::<Dropper>() {
        let bounds = dropper.current_bounds(viewport);
        dropper.step(raw, delta_seconds, bounds);
    }
}

/// Tracks press start/end and drops on release. Returns the dropped fruit.
pub fn dropper_release_system(world: &mut World) -> Option<Entity> {
    let accepts = world
        .get_resource::<Session>()
        .is_some_and(Session::accepts_input);

    let (started, ended) = match world.get_resource_mut::<Input>() {
        Some(mut input) => {
            let presses = (input.press_started, input.press_ended);
            input.clear_presses();
            presses
        }
        None => return None,
    };

    let Some(mut dropper) = world.get_resource_mut::<Dropper>() else {
        return None;
    };

    if !accepts {
        dropper.pointer_active = false;
        return None;
    }

    if started {
        dropper.pointer_active = true;
    }
    if !(ended && dropper.pointer_active) {
        return None;
    }
    dropper.pointer_active = false;

    match drop_pending(world) {
        Ok(entity) => Some(entity),
        Err(e) => {
            warn!("Drop failed: {e}");
            None
        }
    }
}

/// Releases the pending fruit at the dropper and picks the next one.
pub fn drop_pending(world: &mut World) -> GameResult<Entity> {
    let (kind, position) = {
        let dropper = world
            .get_resource::<Dropper>()
            .ok_or(GameError::MissingCollaborator("dropper"))?;
        (dropper.pending_kind.clone(), dropper.position)
    };

    let entity = spawn_fruit(world, &kind, position)?;

    // Exactly one reselection per release
    let next = world
        .get_resource_mut::<NextDropSelector>()
        .ok_or(GameError::MissingCollaborator("next drop selector"))?
        .select_next();

    if let Some(mut dropper) = world.get_resource_mut::<Dropper>() {
        dropper.pending_kind = next.clone();
    }
    refresh_preview(world);

    debug!(
        "Dropped {kind} at ({:.2}, {:.2}), next is {next}",
        position.x, position.y
    );
    Ok(entity)
}

/// Replaces the preview with a fresh one for the pending kind. The old
/// preview is despawned first.
pub fn refresh_preview(world: &mut World) {
    let Some(dropper) = world.get_resource::<Dropper>() else {
        return;
    };

    let old = dropper.preview;
    let enabled = dropper.settings.preview.enabled;
    let scale = dropper.settings.preview.scale;
    let kind = dropper.pending_kind.clone();
    let position = dropper.preview_position();

    if let Some(old) = old {
        world.despawn(old);
    }

    let preview = enabled.then(|| spawn_preview(world, &kind, position, scale));

    if let Some(mut dropper) = world.get_resource_mut::<Dropper>() {
        dropper.preview = preview;
    }
}

/// Keeps the preview glued to the dropper
pub fn preview_follow_system(world: &mut World) {
    let Some(dropper) = world.get_resource::<Dropper>() else {
        return;
    };
    let Some(preview) = dropper.preview else {
        return;
    };
    let target = dropper.preview_position();

    if let Some(mut position) = world.get_mut::<Position>(preview) {
        *position = target;
    }
}
