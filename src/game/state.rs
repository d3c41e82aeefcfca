use std::collections::VecDeque;

use super::action::Direction;

/// A tile on the game board
///
/// The playable interior is 1-indexed; row and column 0 and N+1 are the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
    /// Current heading; `None` until the player first steers
    heading: Option<Direction>,
}

impl Snake {
    /// A one-segment snake standing still
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
            heading: None,
        }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Cell>,
        heading: Option<Direction>,
    ) -> Option<Self> {
        let body: VecDeque<Cell> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body, heading })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// The segment directly behind the head, if any
    pub fn neck(&self) -> Option<Cell> {
        self.body.get(1).copied()
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Change heading unless it would send the head straight into the neck
    ///
    /// A snake longer than one segment also refuses the reverse of its
    /// current heading, so two quick turns between ticks cannot fold it
    /// back onto itself. Returns whether the heading was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if let Some(neck) = self.neck() {
            if self.head().moved_in_direction(direction) == neck {
                return false;
            }
            if self
                .heading
                .is_some_and(|heading| heading.is_opposite(direction))
            {
                return false;
            }
        }
        self.heading = Some(direction);
        true
    }

    /// Where the head goes on the next move, or `None` while standing still
    pub fn next_head(&self) -> Option<Cell> {
        self.heading
            .map(|heading| self.head().moved_in_direction(heading))
    }

    /// Remove the tail segment; a one-segment snake is left empty until
    /// `push_head` runs
    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub(crate) fn push_tail(&mut self, cell: Cell) {
        self.body.push_back(cell);
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Only true transiently inside a move
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake ran into the border
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Lifecycle of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    GameOver(CollisionType),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the snake fills every free tile
    pub apple: Option<Cell>,
    pub x_tiles: u16,
    pub y_tiles: u16,
    pub phase: Phase,
    /// Ticks on which the snake moved
    pub moves: u32,
}

impl GameState {
    pub fn new(snake: Snake, apple: Option<Cell>, x_tiles: u16, y_tiles: u16) -> Self {
        Self {
            snake,
            apple,
            x_tiles,
            y_tiles,
            phase: Phase::Active,
            moves: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Check if a cell lies in the playable interior
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        (1..=i32::from(self.x_tiles)).contains(&cell.x)
            && (1..=i32::from(self.y_tiles)).contains(&cell.y)
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.contains(cell)
    }
}
