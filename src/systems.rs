use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::components::{
    Boundary, CollisionBudget, DisplayName, Footprint, Fruit, FruitCatalog, FruitKind, MergeState,
    Position, Preview,
};
use crate::error::{GameError, GameResult};
use crate::game::{BOUNDARY_NAME, DEFAULT_COLLISION_BUDGET};
use crate::merge::MergeRules;

/// Instantiates a live fruit of `kind` at `position` with a fresh budget.
pub fn spawn_fruit(world: &mut World, kind: &FruitKind, position: Position) -> GameResult<Entity> {
    let radius = world
        .get_resource::<FruitCatalog>()
        .ok_or(GameError::MissingCollaborator("fruit catalog"))?
        .radius(kind)?;

    let budget = world
        .get_resource::<MergeRules>()
        .map_or(DEFAULT_COLLISION_BUDGET, |rules| rules.collision_budget);

    let entity = world
        .spawn((
            Fruit { kind: kind.clone() },
            position,
            Footprint { radius },
            MergeState::Active,
            CollisionBudget::new(budget),
            // Hosts decorate spawned names; the merge rule never reads this
            DisplayName(format!("{kind} (Clone)")),
        ))
        .id();

    trace!(
        "Spawned {kind} as {entity:?} at ({:.2}, {:.2})",
        position.x, position.y
    );
    Ok(entity)
}

/// Spawns a wall or floor piece. Contacts against it are never merges.
pub fn spawn_boundary(world: &mut World, position: Position) -> Entity {
    world
        .spawn((Boundary, position, DisplayName(BOUNDARY_NAME.to_string())))
        .id()
}

/// Spawns the decorative preview. It carries no merge state or budget.
pub fn spawn_preview(world: &mut World, kind: &FruitKind, position: Position, scale: f32) -> Entity {
    world
        .spawn((
            Preview {
                kind: kind.clone(),
                scale,
            },
            position,
        ))
        .id()
}

/// Removes every fruit and preview from the world
pub fn clear_fruits(world: &mut World) -> usize {
    let doomed: Vec<Entity> = world
        .query_filtered::<Entity, Or<(With<Fruit>, With<Preview>)>>()
        .iter(world)
        .collect();

    for &entity in &doomed {
        world.despawn(entity);
    }

    debug!("Cleared {} fruit entities", doomed.len());
    doomed.len()
}

/// Live fruit with their kind and position, in no particular order
pub fn live_fruits(world: &mut World) -> Vec<(Entity, FruitKind, Position)> {
    world
        .query::<(Entity, &Fruit, &Position, &MergeState)>()
        .iter(world)
        .filter(|(_, _, _, state)| state.is_active())
        .map(|(entity, fruit, position, _)| (entity, fruit.kind.clone(), *position))
        .collect()
}
