use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use threaded_snake::config::DEFAULT_GRID;
use threaded_snake::game::{GameState, GameStatus};
use threaded_snake::input::{Direction, GameInput};
use threaded_snake::snake::{Position, Snake};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

#[test]
fn three_steps_right_from_start() {
    let mut state = GameState::new_with_seed(DEFAULT_GRID, 42);
    state.food = Position { x: 2, y: 2 };

    for _ in 0..3 {
        state.step();
    }

    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.snake.head(), Position { x: 11, y: 7 });
    assert_eq!(state.snake.len(), 4);
    assert_eq!(state.score, 0);
}

#[test]
fn stepping_onto_food_scores_and_grows() {
    let mut state = GameState::new_with_seed(DEFAULT_GRID, 43);
    state.food = Position { x: 9, y: 7 };

    state.step();

    assert_eq!(state.score, 10);
    assert_eq!(state.food_eaten, 1);
    assert_eq!(state.snake.len(), 5);
    assert!(!state.snake.occupies(state.food));
    assert!(state.food.is_within_bounds(DEFAULT_GRID));
}

#[test]
fn wall_collision_freezes_until_restart() {
    let mut state = GameState::new_with_seed(DEFAULT_GRID, 44);
    state.snake = Snake::new(Position { x: 0, y: 5 }, Direction::Left, 3);
    state.food = Position { x: 10, y: 10 };

    state.step();
    assert_eq!(state.status, GameStatus::GameOver);

    let frozen = state.snapshot();
    state.apply_input(GameInput::Direction(Direction::Up));
    state.step();
    state.step();
    let after = state.snapshot();
    assert_eq!(after.snake, frozen.snake);
    assert_eq!(after.food, frozen.food);
    assert_eq!(after.score, frozen.score);
    assert_eq!(after.status, GameStatus::GameOver);
    assert!(!after.running);

    state.apply_input(GameInput::Restart);
    let restarted = state.snapshot();
    assert!(restarted.running);
    assert_eq!(restarted.score, 0);
    assert_eq!(restarted.level, 1);
    assert_eq!(
        restarted.snake,
        vec![
            Position { x: 8, y: 7 },
            Position { x: 7, y: 7 },
            Position { x: 6, y: 7 },
            Position { x: 5, y: 7 },
        ]
    );
    assert!(!restarted.snake.contains(&restarted.food));
}

#[test]
fn reverse_request_never_commits() {
    let mut state = GameState::new_with_seed(DEFAULT_GRID, 45);
    state.food = Position { x: 0, y: 0 };

    state.apply_input(GameInput::Direction(Direction::Left));
    state.step();

    assert_eq!(state.snake.direction(), Direction::Right);
    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.snake.head(), Position { x: 9, y: 7 });
}

/// Random play across many seeds, checking the invariants after every step.
#[test]
fn random_play_preserves_invariants() {
    for seed in 0..40 {
        let mut state = GameState::new_with_seed(DEFAULT_GRID, seed);
        let mut inputs = StdRng::seed_from_u64(seed + 1000);

        for _ in 0..500 {
            let committed = state.snake.direction();
            let requested = DIRECTIONS[inputs.gen_range(0..DIRECTIONS.len())];
            let length_before = state.snake.len();
            let eaten_before = state.food_eaten;

            state.apply_input(GameInput::Direction(requested));
            state.step();

            assert_ne!(state.snake.direction(), committed.opposite());

            if state.status == GameStatus::GameOver {
                assert_eq!(state.snake.len(), length_before);
                state.apply_input(GameInput::Restart);
                continue;
            }

            let cells: HashSet<Position> = state.snake.segments().copied().collect();
            assert_eq!(cells.len(), state.snake.len(), "snake overlaps itself");
            assert!(cells.iter().all(|cell| cell.is_within_bounds(DEFAULT_GRID)));
            assert!(state.food.is_within_bounds(DEFAULT_GRID));
            assert!(!cells.contains(&state.food));

            let grew = state.food_eaten - eaten_before;
            assert_eq!(state.snake.len(), length_before + grew as usize);
            assert_eq!(state.score, 10 * state.food_eaten);
            assert_eq!(state.level, 1 + state.food_eaten / 5);
        }
    }
}
