#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::components::FruitKind;
use crate::error::GameResult;
use crate::progression::validate_roster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Uniform draw over the whole roster, largest kind included
    #[default]
    Random,
    /// Walks the roster in order and wraps
    Sequential,
}

/// Chooses the kind of the next drop, with an optional one-step lookahead.
#[derive(Resource, Debug, Clone)]
pub struct NextDropSelector {
    kinds: Vec<FruitKind>,
    mode: SelectionMode,
    rng: fastrand::Rng,
    cursor: usize,
    peeked: Option<FruitKind>,
}

impl NextDropSelector {
    pub fn new(kinds: &[FruitKind], mode: SelectionMode, seed: Option<u64>) -> GameResult<Self> {
        validate_roster(kinds)?;

        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        Ok(Self {
            kinds: kinds.to_vec(),
            mode,
            rng,
            cursor: 0,
            peeked: None,
        })
    }

    /// Commits the next kind. A pending peek is returned as-is, never re-rolled.
    pub fn select_next(&mut self) -> FruitKind {
        let kind = match self.peeked.take() {
            Some(kind) => kind,
            None => self.draw(),
        };
        trace!("Selected next drop: {kind}");
        kind
    }

    /// Shows the upcoming kind without consuming it.
    pub fn peek_next(&mut self) -> FruitKind {
        if let Some(kind) = &self.peeked {
            return kind.clone();
        }
        let kind = self.draw();
        self.peeked = Some(kind.clone());
        kind
    }

    /// Swaps the roster. Any outstanding peek is dropped since it may name a
    /// kind that no longer exists.
    pub fn set_kinds(&mut self, kinds: &[FruitKind]) -> GameResult<()> {
        validate_roster(kinds)?;
        self.kinds = kinds.to_vec();
        self.cursor = 0;
        self.peeked = None;
        Ok(())
    }

    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    fn draw(&mut self) -> FruitKind {
        match self.mode {
            SelectionMode::Random => self.kinds[self.rng.usize(..self.kinds.len())].clone(),
            SelectionMode::Sequential => {
                let kind = self.kinds[self.cursor % self.kinds.len()].clone();
                self.cursor = (self.cursor + 1) % self.kinds.len();
                kind
            }
        }
    }
}
