#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow more than 3 bools in structs for input handling where bools represent distinct flags
    clippy::struct_excessive_bools
)]

use bevy_ecs::prelude::*;
use std::collections::HashMap;
use std::fmt;

use crate::error::{GameError, GameResult};

/// Stable identity tag of a fruit tier, e.g. "Cherry" or "Watermelon"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FruitKind(String);

impl FruitKind {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FruitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FruitKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A live fruit. The kind here is the only identity the merge rule looks at.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Fruit {
    pub kind: FruitKind,
}

/// Collider radius taken from the kind's catalog entry
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub radius: f32,
}

/// Cosmetic label the host may rename freely (e.g. "Cherry (Clone)")
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(pub String);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeState {
    #[default]
    Active,
    Retired,
}

impl MergeState {
    #[must_use]
    pub fn is_active(self) -> bool {
        self == MergeState::Active
    }

    /// Flips `Active` to `Retired`. Returns false if it was already retired,
    /// which is the compare-and-set the merge guard relies on.
    pub fn retire(&mut self) -> bool {
        if *self == MergeState::Active {
            *self = MergeState::Retired;
            true
        } else {
            false
        }
    }
}

/// Per-instance cap on contact callbacks, set once at spawn
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionBudget {
    pub remaining: u32,
}

impl CollisionBudget {
    #[must_use]
    pub fn new(budget: u32) -> Self {
        Self { remaining: budget }
    }

    /// Consumes one callback. Returns false once the budget is spent.
    pub fn consume(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Marks walls and floor; contacts against these never reach the merge rule
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Boundary;

/// Non-physical decoration showing the pending drop
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Preview {
    pub kind: FruitKind,
    pub scale: f32,
}

/// Spawn data per kind, the stand-in for the host's prefabs
#[derive(Resource, Debug, Clone, Default)]
pub struct FruitCatalog {
    radii: HashMap<FruitKind, f32>,
}

impl FruitCatalog {
    pub fn new(entries: impl IntoIterator<Item = (FruitKind, f32)>) -> Self {
        Self {
            radii: entries.into_iter().collect(),
        }
    }

    pub fn radius(&self, kind: &FruitKind) -> GameResult<f32> {
        self.radii
            .get(kind)
            .copied()
            .ok_or_else(|| GameError::UnknownKind(kind.clone()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }
}

/// Input collaborator state for the current tick
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pub movement: (f32, f32),
    pub press_started: bool,
    pub press_ended: bool,
}

impl Input {
    /// Clears the one-shot press flags; movement is a held value
    pub fn clear_presses(&mut self) {
        self.press_started = false;
        self.press_ended = false;
    }
}

/// Screen-to-world projection result: visible half extents in world units
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub half_width: f32,
    pub half_height: f32,
}

/// Contact-begin pairs reported by the physics host, drained each tick
#[derive(Resource, Debug, Clone, Default)]
pub struct ContactEvents {
    pub pending: Vec<(Entity, Entity)>,
}

impl ContactEvents {
    pub fn push(&mut self, a: Entity, b: Entity) {
        self.pending.push((a, b));
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
