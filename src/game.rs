use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{FOODS_PER_LEVEL, GridSize, POINTS_PER_FOOD, START_LENGTH};
use crate::food::spawn_position;
use crate::input::{Direction, GameInput, direction_change_is_valid};
use crate::snake::{Position, Snake};
use crate::snapshot::Snapshot;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
    /// The snake covers every cell; no food can be placed.
    Victory,
}

/// Cause of a game over.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub score: u32,
    pub level: u32,
    pub food_eaten: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pending_direction: Option<Direction>,
    sequence: u64,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a state with an entropy-seeded food RNG.
    ///
    /// # Panics
    ///
    /// Panics if the grid cannot hold the starting snake (see
    /// [`grid_fits_starting_snake`]).
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    ///
    /// # Panics
    ///
    /// Panics if the grid cannot hold the starting snake.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        assert!(
            grid_fits_starting_snake(bounds),
            "grid {}x{} cannot hold a {START_LENGTH}-cell starting snake",
            bounds.width,
            bounds.height,
        );

        let snake = starting_snake(bounds);
        let food = initial_food(&mut rng, bounds, &snake);

        Self {
            snake,
            food,
            score: 0,
            level: 1,
            food_eaten: 0,
            status: GameStatus::Running,
            death_reason: None,
            pending_direction: None,
            sequence: 0,
            bounds,
            rng,
        }
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Counter bumped by every step and restart; later snapshots carry
    /// larger values.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the requested, not yet committed direction.
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Does nothing unless the game is running. A wall or self collision
    /// ends the episode; eating food grows the snake by one cell.
    pub fn step(&mut self) {
        self.sequence += 1;
        if !self.is_running() {
            return;
        }

        if let Some(requested) = self.pending_direction.take() {
            if direction_change_is_valid(self.snake.direction(), requested) {
                self.snake.set_direction(requested);
            }
        }

        let next_head = self.snake.next_head_position();
        if !next_head.is_within_bounds(self.bounds) {
            self.end(DeathReason::WallCollision);
            return;
        }

        if self.snake.occupies(next_head) {
            self.end(DeathReason::SelfCollision);
            return;
        }

        let ate_food = next_head == self.food;
        self.snake.advance(next_head, ate_food);
        if ate_food {
            self.eat_food();
        }
    }

    /// Buffers a direction change for the next step.
    ///
    /// The slot holds one request; a newer one overwrites it. Requests that
    /// reverse the committed direction are dropped, as is anything sent
    /// while the game is not running.
    pub fn request_direction(&mut self, direction: Direction) {
        if !self.is_running() {
            return;
        }

        if direction_change_is_valid(self.snake.direction(), direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// Resets to the canonical starting position and resumes play.
    pub fn restart(&mut self) {
        let snake = starting_snake(self.bounds);
        self.food = initial_food(&mut self.rng, self.bounds, &snake);
        self.snake = snake;
        self.score = 0;
        self.level = 1;
        self.food_eaten = 0;
        self.sequence += 1;
        self.status = GameStatus::Running;
        self.death_reason = None;
        self.pending_direction = None;

        info!("game restarted");
    }

    /// Applies one external input event.
    ///
    /// Returns true when the state changed in a way the screen should show
    /// right away (a restart).
    pub fn apply_input(&mut self, input: GameInput) -> bool {
        match input {
            GameInput::Direction(direction) => {
                self.request_direction(direction);
                false
            }
            GameInput::Restart if !self.is_running() => {
                self.restart();
                true
            }
            GameInput::Restart | GameInput::Quit => false,
        }
    }

    /// Copies the state the presentation layer needs.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bounds: self.bounds,
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score,
            level: self.level,
            sequence: self.sequence,
            running: self.is_running(),
            status: self.status,
            death_reason: self.death_reason,
        }
    }

    fn eat_food(&mut self) {
        self.score += POINTS_PER_FOOD;
        self.food_eaten += 1;

        let level = 1 + self.food_eaten / FOODS_PER_LEVEL;
        if level != self.level {
            debug!("level up: {} -> {level}", self.level);
            self.level = level;
        }

        match spawn_position(&mut self.rng, self.bounds, &self.snake) {
            Some(food) => self.food = food,
            None => {
                self.status = GameStatus::Victory;
                info!(
                    "grid filled: score={} level={} length={}",
                    self.score,
                    self.level,
                    self.snake.len()
                );
            }
        }
    }

    fn end(&mut self, reason: DeathReason) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        info!(
            "game over ({reason:?}): score={} level={} length={}",
            self.score,
            self.level,
            self.snake.len()
        );
    }
}

/// Straight snake of `START_LENGTH` cells centred on the grid, heading right.
fn starting_snake(bounds: GridSize) -> Snake {
    let head = Position {
        x: i32::from(bounds.width / 2),
        y: i32::from(bounds.height / 2),
    };
    Snake::new(head, Direction::Right, START_LENGTH)
}

/// True when the centred starting snake lies fully inside `bounds` and
/// leaves at least one free cell for food.
#[must_use]
pub fn grid_fits_starting_snake(bounds: GridSize) -> bool {
    let tail_x = usize::from(bounds.width / 2) + 1;
    bounds.height > 0 && tail_x >= START_LENGTH && bounds.total_cells() > START_LENGTH
}

fn initial_food(rng: &mut StdRng, bounds: GridSize, snake: &Snake) -> Position {
    spawn_position(rng, bounds, snake).expect("validated grid always has a free cell")
}

#[cfg(test)]
mod tests {
    use crate::config::{DEFAULT_GRID, GridSize};
    use crate::input::{Direction, GameInput};
    use crate::snake::{Position, Snake};

    use super::{DeathReason, GameState, GameStatus, grid_fits_starting_snake};

    fn far_food() -> Position {
        Position { x: 0, y: 0 }
    }

    #[test]
    fn new_game_starts_centred_heading_right() {
        let state = GameState::new_with_seed(DEFAULT_GRID, 1);

        assert_eq!(state.snake.head(), Position { x: 8, y: 7 });
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.level, 1);
        assert_eq!(state.status, GameStatus::Running);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut state = GameState::new_with_seed(DEFAULT_GRID, 1);
        state.food = Position { x: 9, y: 7 };

        state.step();

        assert_eq!(state.snake.len(), 5);
        assert_eq!(state.score, 10);
        assert_eq!(state.food_eaten, 1);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut state = GameState::new_with_seed(DEFAULT_GRID, 2);
        state.snake = Snake::new(Position { x: 15, y: 1 }, Direction::Right, 2);

        state.step();

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::WallCollision));
        assert_eq!(state.snake.head(), Position { x: 15, y: 1 });
    }

    #[test]
    fn snake_collision_with_self_sets_game_over() {
        let mut state = GameState::new_with_seed(DEFAULT_GRID, 3);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
                Position { x: 1, y: 1 },
            ],
            Direction::Left,
        );
        state.food = Position { x: 10, y: 10 };

        state.step();

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn step_is_noop_after_game_over() {
        let mut state = GameState::new_with_seed(DEFAULT_GRID, 4);
        state.status = GameStatus::GameOver;
        let head = state.snake.head();
        let food = state.food;

        state.step();

        assert_eq!(state.snake.head(), head);
        assert_eq!(state.food, food);
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn every_step_and_restart_advances_the_sequence() {
        let mut state = GameState::new_with_seed(DEFAULT_GRID, 13);
        state.food = far_food();
        assert_eq!(state.sequence(), 0);

        state.step();
        assert_eq!(state.snapshot().sequence, 1);

        state.status = GameStatus::GameOver;
        state.step();
        let game_over = state.snapshot();
        assert_eq!(game_over.sequence, 2);

        state.apply_input(GameInput::Restart);
        let restarted = state.snapshot();
        assert!(restarted.sequence > game_over.sequence);
        assert!(restarted.running);
    }

    #[test]
    fn narrow_grid_cannot_hold_starting_snake() {
        assert!(grid_fits_starting_snake(DEFAULT_GRID));
        assert!(grid_fits_starting_snake(GridSize {
            width: 6,
            height: 1,
        }));
        assert!(!grid_fits_starting_snake(GridSize {
            width: 5,
            height: 10,
        }));
        assert!(!grid_fits_starting_snake(GridSize {
            width: 10,
            height: 0,
        }));
    }

    #[test]
    #[should_panic(expected = "cannot hold")]
    fn constructor_rejects_grid_too_small_for_starting_snake() {
        let _ = GameState::new_with_seed(
            GridSize {
                width: 3,
                height: 1,
            },
            14,
        );
    }

    #[test]
    fn starting_food_is_off_the_snake_on_tightest_grid() {
        let bounds = GridSize {
            width: 6,
            height: 1,
        };

        for seed in 0..20 {
            let state = GameState::new_with_seed(bounds, seed);
            assert!(state.food.is_within_bounds(bounds));
            assert!(!state.snake.occupies(state.food));
            assert!(state.snake.segments().all(|cell| cell.is_within_bounds(bounds)));
        }
    }

    #[test]
    fn reverse_request_is_rejected_at_input_time() {
        let mut state = GameState::new_with_seed(DEFAULT_GRID, 5);

        state.request_direction(Direction::Left);

        assert_eq!(state.pending_direction(), None);
    }

    #[test]
    fn latest_request_overwrites_pending_slot() {
        let mut state = GameState::new_with_seed(DEFAULT_GRID, 6);
        state.food = far_food();

        state.request_direction(Direction::Up);
        state.request_direction(Direction::Down);
        state.step();

        assert_eq!(state.snake.direction(), Direction::Down);
        assert_eq!(state.snake.head(), Position { x: 8, y: 8 });
        assert_eq!(state.pending_direction(), None);
    }

    #[test]
    fn step_revalidates_pending_direction() {
        let mut state = GameState::new_with_seed(DEFAULT_GRID, 7);
        state.food = far_food();
        state.request_direction(Direction::Up);
        // Commit changes under the request: Up is now a reversal.
        state.snake.set_direction(Direction::Down);

        state.step();

        assert_eq!(state.snake.direction(), Direction::Down);
        assert_eq!(state.snake.head(), Position { x: 8, y: 8 });
    }

    #[test]
    fn level_increases_every_fifth_food() {
        let mut state = GameState::new_with_seed(DEFAULT_GRID, 8);
        state.snake = Snake::new(Position { x: 2, y: 0 }, Direction::Right, 1);

        for expected_eaten in 1..=6 {
            let next = state.snake.next_head_position();
            state.food = next;
            state.step();
            assert_eq!(state.food_eaten, expected_eaten);
        }

        assert_eq!(state.score, 60);
        assert_eq!(state.level, 2);
        assert_eq!(state.snake.len(), 7);
    }

    #[test]
    fn filling_the_grid_is_a_victory() {
        let bounds = GridSize {
            width: 6,
            height: 1,
        };
        let mut state = GameState::new_with_seed(bounds, 9);
        state.snake = Snake::new(Position { x: 4, y: 0 }, Direction::Right, 5);
        state.food = Position { x: 5, y: 0 };

        state.step();

        assert_eq!(state.status, GameStatus::Victory);
        assert!(!state.snapshot().running);
        assert_eq!(state.snake.len(), 6);
    }

    #[test]
    fn restart_only_applies_when_not_running() {
        let mut state = GameState::new_with_seed(DEFAULT_GRID, 10);
        state.food = far_food();
        state.step();

        assert!(!state.apply_input(GameInput::Restart));
        assert_eq!(state.snake.head(), Position { x: 9, y: 7 });

        state.status = GameStatus::GameOver;
        state.score = 40;
        assert!(state.apply_input(GameInput::Restart));
        assert_eq!(state.snake.head(), Position { x: 8, y: 7 });
        assert_eq!(state.score, 0);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.death_reason, None);
    }

    #[test]
    fn direction_input_ignored_while_game_over() {
        let mut state = GameState::new_with_seed(DEFAULT_GRID, 11);
        state.status = GameStatus::GameOver;

        state.apply_input(GameInput::Direction(Direction::Up));

        assert_eq!(state.pending_direction(), None);
    }

    #[test]
    fn snapshot_copies_render_fields() {
        let state = GameState::new_with_seed(DEFAULT_GRID, 12);
        let snapshot = state.snapshot();

        assert_eq!(snapshot.bounds, DEFAULT_GRID);
        assert_eq!(snapshot.length(), 4);
        assert_eq!(snapshot.head(), Some(Position { x: 8, y: 7 }));
        assert_eq!(snapshot.food, state.food);
        assert_eq!(snapshot.level, 1);
        assert!(snapshot.running);
    }
}
