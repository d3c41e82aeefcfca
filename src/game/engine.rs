use super::{
    action::Action,
    config::GameConfig,
    state::{Cell, CollisionType, GameState, Phase, Snake},
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Random samples tried before falling back to scanning for free tiles
const MAX_SPAWN_ATTEMPTS: usize = 64;

/// Information about a tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate the apple this tick
    pub ate_apple: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake moved
    pub moved: bool,
    /// Whether the game is over after this tick
    pub game_over: bool,
    pub info: StepInfo,
}

impl StepResult {
    fn still(game_over: bool) -> Self {
        Self {
            moved: false,
            game_over,
            info: StepInfo {
                ate_apple: false,
                collision_type: None,
            },
        }
    }
}

/// What applying a player action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Turned,
    /// The turn would have sent the snake back into itself
    Rejected,
    /// The key has no meaning in the current phase
    Ignored,
    /// A finished game was replaced with a new one
    Restarted,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose spawns are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a new game: a still, one-segment snake and an apple off it
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.random_interior_cell());
        let apple = self.spawn_apple(&snake);

        info!(head = ?snake.head(), ?apple, "new game");
        GameState::new(snake, apple, self.config.x_tiles, self.config.y_tiles)
    }

    /// Apply a mapped key press, guarded on the game phase
    ///
    /// While a game runs only steering matters; once it is over any key
    /// starts a new game.
    pub fn apply_action(&mut self, state: &mut GameState, action: Action) -> ActionOutcome {
        match (state.phase, action) {
            (Phase::GameOver(_), _) => {
                *state = self.reset();
                ActionOutcome::Restarted
            }
            (Phase::Active, Action::Steer(direction)) => {
                if state.snake.set_direction(direction) {
                    ActionOutcome::Turned
                } else {
                    ActionOutcome::Rejected
                }
            }
            (Phase::Active, Action::AnyKey) => ActionOutcome::Ignored,
        }
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_active() {
            return StepResult::still(true);
        }
        let Some(new_head) = state.snake.next_head() else {
            return StepResult::still(false);
        };

        // The tail moves out of the way before the collision check so the
        // head may follow it into the cell it vacates.
        let tail = state.snake.pop_tail();
        let collision = self.check_collision(state, new_head);
        state.snake.push_head(new_head);
        state.moves += 1;

        if let Some(collision_type) = collision {
            state.phase = Phase::GameOver(collision_type);
            info!(
                length = state.snake.len(),
                moves = state.moves,
                ?collision_type,
                "game over"
            );
            return StepResult {
                moved: true,
                game_over: true,
                info: StepInfo {
                    ate_apple: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        let ate_apple = state.apple == Some(new_head);
        if ate_apple {
            if let Some(tail) = tail {
                state.snake.push_tail(tail);
            }
            state.apple = self.spawn_apple(&state.snake);
            debug!(length = state.snake.len(), apple = ?state.apple, "apple eaten");
        }

        StepResult {
            moved: true,
            game_over: false,
            info: StepInfo {
                ate_apple,
                collision_type: None,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, cell: Cell) -> Option<CollisionType> {
        if !state.is_in_bounds(cell) {
            return Some(CollisionType::Wall);
        }

        if state.is_occupied_by_snake(cell) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn random_interior_cell(&mut self) -> Cell {
        let x = self.rng.gen_range(1..=i32::from(self.config.x_tiles));
        let y = self.rng.gen_range(1..=i32::from(self.config.y_tiles));
        Cell::new(x, y)
    }

    /// Pick a uniformly random interior tile not covered by the snake
    ///
    /// Rejection sampling is tried first; once that keeps missing the free
    /// tiles are enumerated. Returns `None` when the snake fills the board.
    pub fn spawn_apple(&mut self, snake: &Snake) -> Option<Cell> {
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let cell = self.random_interior_cell();
            if !snake.contains(cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = (1..=i32::from(self.config.y_tiles))
            .flat_map(|y| (1..=i32::from(self.config.x_tiles)).map(move |x| Cell::new(x, y)))
            .filter(|cell| !snake.contains(*cell))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 7)
    }

    fn state_with(cells: &[(i32, i32)], heading: Direction, apple: (i32, i32)) -> GameState {
        let snake = Snake::from_segments(
            cells.iter().map(|&(x, y)| Cell::new(x, y)),
            Some(heading),
        )
        .unwrap();
        GameState::new(snake, Some(Cell::new(apple.0, apple.1)), 15, 15)
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        for _ in 0..50 {
            let state = engine.reset();

            assert!(state.is_active());
            assert_eq!(state.moves, 0);
            assert_eq!(state.snake.len(), 1);
            assert_eq!(state.snake.heading(), None);
            assert!(state.is_in_bounds(state.snake.head()));

            let apple = state.apple.unwrap();
            assert!(state.is_in_bounds(apple));
            assert_ne!(apple, state.snake.head());
        }
    }

    #[test]
    fn test_still_snake_does_not_move() {
        let mut engine = engine();
        let mut state = engine.reset();
        let before = state.clone();

        let result = engine.step(&mut state);

        assert!(!result.moved);
        assert!(!result.game_over);
        assert_eq!(state, before);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = state_with(&[(5, 5)], Direction::Right, (10, 10));

        let result = engine.step(&mut state);

        assert!(result.moved);
        assert!(!result.game_over);
        assert_eq!(state.snake.head(), Cell::new(6, 5));
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.moves, 1);
    }

    #[test]
    fn test_length_kept_without_apple() {
        let mut engine = engine();
        let mut state = state_with(&[(5, 5), (4, 5), (3, 5)], Direction::Right, (10, 10));

        engine.step(&mut state);

        let cells: Vec<Cell> = state.snake.segments().collect();
        assert_eq!(cells, vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]);
    }

    #[test]
    fn test_apple_consumption() {
        let mut engine = engine();
        let mut state = state_with(&[(5, 5), (4, 5), (3, 5)], Direction::Right, (6, 5));

        let result = engine.step(&mut state);

        assert!(result.info.ate_apple);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.head(), Cell::new(6, 5));
        assert_eq!(state.snake.tail(), Cell::new(3, 5));

        let apple = state.apple.unwrap();
        assert!(state.is_in_bounds(apple));
        assert!(!state.snake.contains(apple));
    }

    #[test]
    fn test_kept_tail_is_restored_before_respawn() {
        let mut engine = GameEngine::with_seed(GameConfig::new(2, 2), 11);
        let snake = Snake::from_segments(
            [Cell::new(2, 1), Cell::new(1, 1), Cell::new(1, 2)],
            Some(Direction::Down),
        )
        .unwrap();
        let mut state = GameState::new(snake, Some(Cell::new(2, 2)), 2, 2);

        let result = engine.step(&mut state);

        // the tail (1,2) is the only cell left, and it is back on the snake
        assert!(result.info.ate_apple);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.tail(), Cell::new(1, 2));
        assert_eq!(state.apple, None);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let mut state = state_with(&[(15, 5)], Direction::Right, (1, 1));

        let result = engine.step(&mut state);

        assert!(result.game_over);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.phase, Phase::GameOver(CollisionType::Wall));
        assert_eq!(state.snake.head(), Cell::new(16, 5));
    }

    #[test]
    fn test_every_wall_collides() {
        let edges = [
            ((1, 7), Direction::Left),
            ((15, 7), Direction::Right),
            ((7, 1), Direction::Up),
            ((7, 15), Direction::Down),
        ];
        for ((x, y), heading) in edges {
            let mut engine = engine();
            let mut state = state_with(&[(x, y)], heading, (3, 3));
            let result = engine.step(&mut state);
            assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        }
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        // Head at (5,5) heading down into the loop of its own body
        let mut state = state_with(
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)],
            Direction::Down,
            (10, 10),
        );

        let result = engine.step(&mut state);

        assert!(result.game_over);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_following_own_tail_is_safe() {
        let mut engine = engine();
        // A closed square: the head moves into the cell the tail leaves
        let mut state = state_with(&[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Down, (10, 10));

        let result = engine.step(&mut state);

        assert!(!result.game_over);
        assert_eq!(state.snake.head(), Cell::new(5, 6));
    }

    #[test]
    fn test_game_over_tick_is_noop() {
        let mut engine = engine();
        let mut state = state_with(&[(15, 5)], Direction::Right, (1, 1));
        engine.step(&mut state);
        let frozen = state.clone();

        let result = engine.step(&mut state);

        assert!(result.game_over);
        assert!(!result.moved);
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_steering_while_active() {
        let mut engine = engine();
        let mut state = state_with(&[(5, 5), (5, 6)], Direction::Up, (1, 1));

        assert_eq!(
            engine.apply_action(&mut state, Action::Steer(Direction::Down)),
            ActionOutcome::Rejected
        );
        assert_eq!(state.snake.heading(), Some(Direction::Up));
        assert_eq!(
            engine.apply_action(&mut state, Action::Steer(Direction::Left)),
            ActionOutcome::Turned
        );
        assert_eq!(
            engine.apply_action(&mut state, Action::AnyKey),
            ActionOutcome::Ignored
        );
        assert_eq!(state.snake.heading(), Some(Direction::Left));
    }

    #[test]
    fn test_any_key_restarts_after_game_over() {
        let mut engine = engine();
        for action in [Action::AnyKey, Action::Steer(Direction::Up)] {
            let mut state = state_with(&[(15, 5), (14, 5)], Direction::Right, (1, 1));
            engine.step(&mut state);
            assert!(!state.is_active());

            assert_eq!(
                engine.apply_action(&mut state, action),
                ActionOutcome::Restarted
            );
            assert!(state.is_active());
            assert_eq!(state.snake.len(), 1);
            assert_eq!(state.snake.heading(), None);
            assert_eq!(state.moves, 0);
        }
    }

    #[test]
    fn test_spawn_avoids_snake() {
        let mut engine = GameEngine::with_seed(GameConfig::new(4, 4), 3);
        // Everything but (4,4) is covered
        let cells: Vec<Cell> = (1..=4)
            .flat_map(|y| (1..=4).map(move |x| Cell::new(x, y)))
            .filter(|&cell| cell != Cell::new(4, 4))
            .collect();
        let snake = Snake::from_segments(cells, None).unwrap();

        for _ in 0..20 {
            assert_eq!(engine.spawn_apple(&snake), Some(Cell::new(4, 4)));
        }
    }

    #[test]
    fn test_spawn_on_full_board() {
        let mut engine = GameEngine::with_seed(GameConfig::new(2, 2), 3);
        let snake = Snake::from_segments(
            [
                Cell::new(1, 1),
                Cell::new(2, 1),
                Cell::new(2, 2),
                Cell::new(1, 2),
            ],
            None,
        )
        .unwrap();

        assert_eq!(engine.spawn_apple(&snake), None);
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = GameEngine::with_seed(GameConfig::default(), 42).reset();
        let b = GameEngine::with_seed(GameConfig::default(), 42).reset();
        assert_eq!(a, b);
    }
}
