use std::error::Error;
use std::fmt;

use crate::components::FruitKind;

/// Errors raised by the gameplay core. None of them are transient, so callers
/// log and recover locally instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A progression or catalog lookup for a kind that was never configured
    UnknownKind(FruitKind),
    /// A host collaborator (camera projection, etc.) is not available
    MissingCollaborator(&'static str),
    /// No fruit kinds configured; nothing can ever be dropped
    EmptyConfiguration,
    /// The same kind appears twice in a roster
    DuplicateKind(FruitKind),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnknownKind(kind) => write!(f, "unknown fruit kind '{kind}'"),
            GameError::MissingCollaborator(name) => {
                write!(f, "missing collaborator: {name}")
            }
            GameError::EmptyConfiguration => write!(f, "no fruit kinds configured"),
            GameError::DuplicateKind(kind) => write!(f, "fruit kind '{kind}' listed twice"),
        }
    }
}

impl Error for GameError {}

pub type GameResult<T> = Result<T, GameError>;
