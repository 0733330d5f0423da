#![warn(clippy::all, clippy::pedantic)]

//! Same-kind merge rule, run from each participant's contact callback.
//!
//! A contact pair `(a, b)` reaches the rule twice, once per participant. The
//! first callback that matches retires both inputs before spawning anything,
//! so the mirrored callback (or any redundant report of the same pair) finds
//! them retired or gone and does nothing.

use bevy_ecs::prelude::*;
use log::{debug, error, info, trace, warn};

use crate::components::{
    Boundary, CollisionBudget, ContactEvents, Fruit, FruitCatalog, FruitKind, MergeState, Position,
};
use crate::error::GameError;
use crate::game::DEFAULT_COLLISION_BUDGET;
use crate::progression::KindProgressionTable;
use crate::session::Session;
use crate::systems::spawn_fruit;

/// Tunables for the merge rule
#[derive(Resource, Debug, Clone, Copy)]
pub struct MergeRules {
    pub collision_budget: u32,
}

impl Default for MergeRules {
    fn default() -> Self {
        Self {
            collision_budget: DEFAULT_COLLISION_BUDGET,
        }
    }
}

/// What a single contact callback did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Both inputs retired and despawned, one successor spawned
    Merged { successor: Entity, kind: FruitKind },
    /// Ordinary collision between different kinds
    KindMismatch,
    BoundaryIgnored,
    BudgetExhausted,
    /// One of the pair is retired or no longer exists
    NotLive,
    /// One of the pair is not a fruit (preview, scenery)
    NotAFruit,
    /// Same kind, but the successor could not be resolved; both stay active
    Aborted(GameError),
}

impl ContactOutcome {
    #[must_use]
    pub fn is_merge(&self) -> bool {
        matches!(self, ContactOutcome::Merged { .. })
    }
}

/// Runs the merge rule for one callback: `receiver` was touched by `other`.
///
/// Checks run in this order, and the first that fails decides the outcome:
/// boundary (`BoundaryIgnored`), both entities still exist (`NotLive`), both
/// are fruit (`NotAFruit`), receiver budget (`BudgetExhausted`), both active
/// (`NotLive`), same kind (`KindMismatch`), successor resolvable (`Aborted`).
/// The boundary check only sees live entities, so a stale handle to a
/// despawned boundary reports `NotLive`.
///
/// The successor spawns at the receiver's position, not at the contact
/// midpoint.
pub fn handle_contact(world: &mut World, receiver: Entity, other: Entity) -> ContactOutcome {
    if world.get::<Boundary>(other).is_some() || world.get::<Boundary>(receiver).is_some() {
        trace!("Contact {receiver:?} -> {other:?} against boundary, ignored");
        return ContactOutcome::BoundaryIgnored;
    }

    if !world.entities().contains(receiver) || !world.entities().contains(other) {
        return ContactOutcome::NotLive;
    }

    if world.get::<Fruit>(receiver).is_none() || world.get::<Fruit>(other).is_none() {
        return ContactOutcome::NotAFruit;
    }

    // Every callback costs budget, whatever it ends up doing
    let within_budget = world
        .get_mut::<CollisionBudget>(receiver)
        .is_none_or(|mut budget| budget.consume());
    if !within_budget {
        trace!("Contact {receiver:?} -> {other:?} ignored, budget spent");
        return ContactOutcome::BudgetExhausted;
    }

    let both_active = [receiver, other]
        .iter()
        .all(|&e| world.get::<MergeState>(e).is_some_and(|s| s.is_active()));
    if !both_active {
        return ContactOutcome::NotLive;
    }

    let (Some(kind), Some(other_kind)) = (
        world.get::<Fruit>(receiver).map(|f| f.kind.clone()),
        world.get::<Fruit>(other).map(|f| f.kind.clone()),
    ) else {
        return ContactOutcome::NotAFruit;
    };

    if kind != other_kind {
        trace!("{kind} touched {other_kind}, no merge");
        return ContactOutcome::KindMismatch;
    }

    let successor = match resolve_successor(world, &kind) {
        Ok(successor) => successor,
        Err(e) => {
            error!("Merge of two {kind} aborted: {e}");
            return ContactOutcome::Aborted(e);
        }
    };

    let position = world
        .get::<Position>(receiver)
        .copied()
        .unwrap_or_default();

    // Retirement comes first so nothing else can match either input
    if !retire(world, receiver) {
        return ContactOutcome::NotLive;
    }
    if !retire(world, other) {
        reactivate(world, receiver);
        return ContactOutcome::NotLive;
    }

    let successor_entity = match spawn_fruit(world, &successor, position) {
        Ok(entity) => entity,
        Err(e) => {
            error!("Could not spawn {successor} after merge: {e}");
            reactivate(world, receiver);
            reactivate(world, other);
            return ContactOutcome::Aborted(e);
        }
    };

    world.despawn(receiver);
    world.despawn(other);

    debug!(
        "Merged two {kind} into {successor} at ({:.2}, {:.2})",
        position.x, position.y
    );

    ContactOutcome::Merged {
        successor: successor_entity,
        kind: successor,
    }
}

/// Delivers every queued contact pair to both participants. Pairs stay
/// queued while the session is paused or stopped.
pub fn contact_system(world: &mut World) -> Vec<ContactOutcome> {
    let accepts = world
        .get_resource::<Session>()
        .is_some_and(Session::accepts_input);
    if !accepts {
        return Vec::new();
    }

    let pending = match world.get_resource_mut::<ContactEvents>() {
        Some(mut events) => std::mem::take(&mut events.pending),
        None => return Vec::new(),
    };

    let mut outcomes = Vec::with_capacity(pending.len() * 2);
    for (a, b) in pending {
        outcomes.push(handle_contact(world, a, b));
        outcomes.push(handle_contact(world, b, a));
    }
    outcomes
}

/// Marks a fruit retired and removes it, for destruction initiated by the
/// host rather than by a merge.
pub fn retire_fruit(world: &mut World, entity: Entity) -> bool {
    if !retire(world, entity) {
        return false;
    }
    world.despawn(entity)
}

fn resolve_successor(world: &World, kind: &FruitKind) -> Result<FruitKind, GameError> {
    let table = world
        .get_resource::<KindProgressionTable>()
        .ok_or(GameError::MissingCollaborator("kind progression table"))?;
    let successor = table.successor_of(kind)?;

    if kind == table.largest() {
        info!("Two {kind} merged, wrapping around to {successor}");
    }

    // Fail before retiring anything if the successor cannot be spawned
    let catalog = world
        .get_resource::<FruitCatalog>()
        .ok_or(GameError::MissingCollaborator("fruit catalog"))?;
    catalog.radius(&successor)?;

    Ok(successor)
}

fn retire(world: &mut World, entity: Entity) -> bool {
    world
        .get_mut::<MergeState>(entity)
        .is_some_and(|mut state| state.retire())
}

fn reactivate(world: &mut World, entity: Entity) {
    if let Some(mut state) = world.get_mut::<MergeState>(entity) {
        warn!("Restoring {entity:?} to active after failed merge");
        *state = MergeState::Active;
    }
}
