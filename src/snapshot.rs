use crate::config::GridSize;
use crate::game::{DeathReason, GameStatus};
use crate::snake::Position;

/// Immutable copy of the game state handed to the presentation layer.
///
/// Built under the game lock once per tick, so a renderer holding a snapshot
/// never sees a half-applied step.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub bounds: GridSize,
    /// Snake cells from head to tail.
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub level: u32,
    /// Order of the state this was taken from; see [`GameState::sequence`].
    ///
    /// [`GameState::sequence`]: crate::game::GameState::sequence
    pub sequence: u64,
    pub running: bool,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
}

impl Snapshot {
    /// Body length in cells.
    #[must_use]
    pub fn length(&self) -> usize {
        self.snake.len()
    }

    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    /// True when `self` was taken from a later state than `other`.
    #[must_use]
    pub fn is_newer_than(&self, other: &Self) -> bool {
        self.sequence > other.sequence
    }
}
