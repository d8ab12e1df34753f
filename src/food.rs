use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Picks a uniformly random cell that the snake does not occupy.
///
/// Rolls a random cell and re-rolls on every hit. Returns `None` when the
/// snake covers the whole grid, so the loop only runs while a free cell
/// exists.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if snake.len() >= bounds.total_cells() {
        return None;
    }

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };

        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }
}
