#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::debug;
use std::collections::{HashMap, HashSet};

use crate::components::FruitKind;
use crate::error::{GameError, GameResult};

/// Maps each kind to the kind two of them merge into.
///
/// For the ordered roster `[k0..kn-1]`, `successor_of(ki)` is `k(i+1 mod n)`.
/// The largest kind therefore wraps back to the smallest; the merge rule
/// still applies it so two watermelons become a cherry.
#[derive(Resource, Debug, Clone)]
pub struct KindProgressionTable {
    order: Vec<FruitKind>,
    becomes: HashMap<FruitKind, FruitKind>,
}

impl KindProgressionTable {
    pub fn from_kinds(kinds: &[FruitKind]) -> GameResult<Self> {
        validate_roster(kinds)?;

        let becomes = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| (kind.clone(), kinds[(i + 1) % kinds.len()].clone()))
            .collect();

        debug!("Built progression table for {} kinds", kinds.len());

        Ok(Self {
            order: kinds.to_vec(),
            becomes,
        })
    }

    pub fn successor_of(&self, kind: &FruitKind) -> GameResult<FruitKind> {
        self.becomes
            .get(kind)
            .cloned()
            .ok_or_else(|| GameError::UnknownKind(kind.clone()))
    }

    /// Replaces the whole table. On error the existing table is left as it was.
    pub fn rebuild(&mut self, kinds: &[FruitKind]) -> GameResult<()> {
        *self = Self::from_kinds(kinds)?;
        Ok(())
    }

    #[must_use]
    pub fn kinds(&self) -> &[FruitKind] {
        &self.order
    }

    #[must_use]
    pub fn contains(&self, kind: &FruitKind) -> bool {
        self.becomes.contains_key(kind)
    }

    #[must_use]
    pub fn largest(&self) -> &FruitKind {
        // from_kinds rejects empty rosters
        &self.order[self.order.len() - 1]
    }
}

/// A roster must be non-empty and name each kind once.
pub fn validate_roster(kinds: &[FruitKind]) -> GameResult<()> {
    if kinds.is_empty() {
        return Err(GameError::EmptyConfiguration);
    }

    let mut seen = HashSet::with_capacity(kinds.len());
    match kinds.iter().find(|kind| !seen.insert(*kind)) {
        Some(repeated) => Err(GameError::DuplicateKind(repeated.clone())),
        None => Ok(()),
    }
}
