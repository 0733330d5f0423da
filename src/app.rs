#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info};
use std::time::Duration;

use crate::Time;
use crate::components::{ContactEvents, FruitCatalog, FruitKind, Input, Position, Viewport};
use crate::config::Config;
use crate::config::gameplay::KindConfig;
use crate::dropper::{
    Dropper, dropper_movement_system, dropper_release_system, preview_follow_system,
    refresh_preview,
};
use crate::error::{GameError, GameResult};
use crate::merge::{ContactOutcome, MergeRules, contact_system};
use crate::progression::KindProgressionTable;
use crate::selector::NextDropSelector;
use crate::session::{Session, SessionState, Subscription};
use crate::systems::{clear_fruits, live_fruits};

/// What one frame produced
#[derive(Debug, Default)]
pub struct TickReport {
    pub dropped: Option<Entity>,
    pub contacts: Vec<ContactOutcome>,
}

impl TickReport {
    #[must_use]
    pub fn merges(&self) -> usize {
        self.contacts.iter().filter(|o| o.is_merge()).count()
    }
}

pub struct App {
    pub world: World,
}

impl App {
    /// Assembles the world from configuration. Fails only when the roster is
    /// empty, since then nothing could ever be dropped.
    pub fn new(config: &Config) -> GameResult<Self> {
        let kinds = config.fruits.kind_list();
        let table = KindProgressionTable::from_kinds(&kinds)?;
        let catalog = catalog_from(&config.fruits.kinds);
        let mut selector =
            NextDropSelector::new(&kinds, config.fruits.selection, config.fruits.seed)?;
        let pending = selector.select_next();

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Input::default());
        world.insert_resource(ContactEvents::default());
        world.insert_resource(Session::new());
        world.insert_resource(MergeRules {
            collision_budget: config.merge.collision_budget,
        });
        world.insert_resource(Viewport {
            half_width: config.viewport.half_width,
            half_height: config.viewport.half_height,
        });
        world.insert_resource(Dropper::new(&config.dropper, &config.viewport, pending));
        world.insert_resource(table);
        world.insert_resource(catalog);
        world.insert_resource(selector);

        info!("Assembled game with {} fruit kinds", kinds.len());
        Ok(Self { world })
    }

    /// Runs one frame: movement, release, preview, contacts.
    pub fn tick(&mut self, delta: Duration) -> TickReport {
        let delta_seconds = {
            let mut time = self.world.resource_mut::<Time>();
            time.advance(delta);
            time.delta_seconds()
        };

        dropper_movement_system(&mut self.world, delta_seconds);
        let dropped = dropper_release_system(&mut self.world);
        preview_follow_system(&mut self.world);
        let contacts = contact_system(&mut self.world);

        TickReport { dropped, contacts }
    }

    pub fn start(&mut self) {
        self.world.resource_mut::<Session>().start();
        self.sync_time_scale();
        if self.world.resource::<Dropper>().preview.is_none() {
            refresh_preview(&mut self.world);
        }
    }

    pub fn pause(&mut self) {
        self.world.resource_mut::<Session>().pause();
        self.sync_time_scale();
    }

    pub fn resume(&mut self) {
        self.world.resource_mut::<Session>().resume();
        self.sync_time_scale();
    }

    pub fn toggle_pause(&mut self) {
        self.world.resource_mut::<Session>().toggle_pause();
        self.sync_time_scale();
    }

    pub fn stop(&mut self) {
        self.world.resource_mut::<Session>().stop();
        self.sync_time_scale();
    }

    /// Stops, clears the board, re-arms the dropper and starts again.
    pub fn restart(&mut self) {
        self.stop();

        let removed = clear_fruits(&mut self.world);
        self.world.resource_mut::<ContactEvents>().clear();
        *self.world.resource_mut::<Input>() = Input::default();

        let pending = self.world.resource_mut::<NextDropSelector>().select_next();
        self.world.resource_mut::<Dropper>().reset(pending);
        debug!("Restart removed {removed} entities");

        self.start();
    }

    /// Tears the session down; subscribers get nothing further.
    pub fn shutdown(&mut self) {
        self.stop();
        self.world.resource_mut::<Session>().shutdown();
    }

    pub fn subscribe(&mut self) -> Subscription {
        self.world.resource_mut::<Session>().subscribe()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.world.resource::<Session>().state()
    }

    pub fn set_movement(&mut self, dx: f32, dy: f32) {
        self.world.resource_mut::<Input>().movement = (dx, dy);
    }

    pub fn press_start(&mut self) {
        self.world.resource_mut::<Input>().press_started = true;
    }

    pub fn press_end(&mut self) {
        self.world.resource_mut::<Input>().press_ended = true;
    }

    /// Queues a contact-begin pair from the physics host
    pub fn report_contact(&mut self, a: Entity, b: Entity) {
        self.world.resource_mut::<ContactEvents>().push(a, b);
    }

    /// Updates or withdraws the camera projection
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        match viewport {
            Some(viewport) => self.world.insert_resource(viewport),
            None => {
                self.world.remove_resource::<Viewport>();
            }
        }
    }

    /// Swaps the fruit roster. Everything is validated before any resource
    /// is replaced, so a bad roster leaves the old one fully in place.
    pub fn set_fruit_kinds(&mut self, kinds: &[KindConfig]) -> GameResult<()> {
        let list: Vec<FruitKind> = kinds.iter().map(|k| FruitKind::new(k.name.clone())).collect();
        let table = KindProgressionTable::from_kinds(&list)?;
        let catalog = catalog_from(kinds);

        self.world
            .resource_mut::<NextDropSelector>()
            .set_kinds(&list)?;
        self.world.insert_resource(table);
        self.world.insert_resource(catalog);

        let pending_known = {
            let dropper = self.world.resource::<Dropper>();
            list.contains(&dropper.pending_kind)
        };
        if !pending_known {
            let pending = self.world.resource_mut::<NextDropSelector>().select_next();
            self.world.resource_mut::<Dropper>().pending_kind = pending;
            refresh_preview(&mut self.world);
        }

        info!("Fruit roster replaced with {} kinds", list.len());
        Ok(())
    }

    #[must_use]
    pub fn pending_kind(&self) -> FruitKind {
        self.world.resource::<Dropper>().pending_kind.clone()
    }

    /// The kind after the pending one, for a "next" display
    pub fn upcoming_kind(&mut self) -> FruitKind {
        self.world.resource_mut::<NextDropSelector>().peek_next()
    }

    #[must_use]
    pub fn dropper_position(&self) -> Position {
        self.world.resource::<Dropper>().position
    }

    pub fn fruits(&mut self) -> Vec<(Entity, FruitKind, Position)> {
        live_fruits(&mut self.world)
    }

    fn sync_time_scale(&mut self) {
        let scale = self.world.resource::<Session>().time_scale();
        self.world.resource_mut::<Time>().set_scale(scale);
    }
}

/// Builds the assembly from the global configuration
impl TryFrom<Config> for App {
    type Error = GameError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        Self::new(&config)
    }
}

fn catalog_from(kinds: &[KindConfig]) -> FruitCatalog {
    FruitCatalog::new(
        kinds
            .iter()
            .map(|k| (FruitKind::new(k.name.clone()), k.radius)),
    )
}
