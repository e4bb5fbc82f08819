//! 4-connected grid parsed from an ASCII map.
//!
//! ```text
//! S..#
//! .#..
//! ...G
//! ```
//!
//! `S` is the start, `G` the goal, `#` a wall, `.` open floor. Every move
//! costs 1, so Manhattan distance is an admissible, consistent heuristic.
//! For beam search and MCTS the score is the negated distance to the goal.

use lodestar_kernel::contract::{EvaluateDomain, PathDomain, SearchDomain};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{DecisionWorld, DescribeWorld, GoalWorld, WorldError};

/// JSON description of a grid world: one string per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSpecV1 {
    pub rows: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Enumeration order of moves.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridWorld {
    rows: Vec<String>,
    width: usize,
    walls: Vec<bool>,
    start: Cell,
    goal: Cell,
}

impl GridWorld {
    /// Parse an ASCII map.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Invalid`] for an empty or ragged map, an
    /// unknown character, or anything but exactly one `S` and one `G`.
    pub fn parse(rows: &[&str]) -> Result<Self, WorldError> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(WorldError::invalid("grid map is empty"));
        }
        let mut walls = Vec::with_capacity(rows.len() * width);
        let mut start = None;
        let mut goal = None;
        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(WorldError::invalid(format!(
                    "grid row {r} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for (c, ch) in row.chars().enumerate() {
                let marker = match ch {
                    '#' => {
                        walls.push(true);
                        continue;
                    }
                    '.' => None,
                    'S' => Some(&mut start),
                    'G' => Some(&mut goal),
                    other => {
                        return Err(WorldError::invalid(format!(
                            "unknown grid character {other:?} at row {r}, column {c}"
                        )))
                    }
                };
                walls.push(false);
                if let Some(slot) = marker {
                    if slot.replace(Cell::new(r, c)).is_some() {
                        return Err(WorldError::invalid(format!("grid has more than one {ch}")));
                    }
                }
            }
        }
        let (Some(start), Some(goal)) = (start, goal) else {
            return Err(WorldError::invalid("grid needs exactly one S and one G"));
        };
        Ok(Self {
            rows: rows.iter().map(|row| (*row).to_string()).collect(),
            width,
            walls,
            start,
            goal,
        })
    }

    /// # Errors
    ///
    /// As [`parse`](Self::parse).
    pub fn from_spec(spec: &GridSpecV1) -> Result<Self, WorldError> {
        let rows: Vec<&str> = spec.rows.iter().map(String::as_str).collect();
        Self::parse(&rows)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.walls.len() / self.width
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        cell.row < self.height()
            && cell.col < self.width
            && !self.walls[cell.row * self.width + cell.col]
    }

    /// The cell `mv` leads to, if it stays on open floor.
    #[must_use]
    pub fn step(&self, cell: Cell, mv: Move) -> Option<Cell> {
        let next = match mv {
            Move::Up => Cell::new(cell.row.checked_sub(1)?, cell.col),
            Move::Down => Cell::new(cell.row + 1, cell.col),
            Move::Left => Cell::new(cell.row, cell.col.checked_sub(1)?),
            Move::Right => Cell::new(cell.row, cell.col + 1),
        };
        self.is_open(next).then_some(next)
    }
}

impl SearchDomain for GridWorld {
    type State = Cell;
    type Action = Move;

    fn domain_id(&self) -> &str {
        "grid"
    }

    fn initial_state(&self) -> Cell {
        self.start
    }

    fn is_terminal(&self, state: &Cell) -> bool {
        *state == self.goal
    }

    fn available_actions(&self, state: &Cell) -> Vec<Move> {
        if self.is_terminal(state) {
            return Vec::new();
        }
        Move::ALL
            .into_iter()
            .filter(|mv| self.step(*state, *mv).is_some())
            .collect()
    }

    fn apply_action(&self, state: &Cell, action: &Move) -> Cell {
        match self.step(*state, *action) {
            Some(next) => next,
            None => panic!("move {action:?} from {state:?} leaves open floor"),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn distance(a: Cell, b: Cell) -> f64 {
    a.manhattan(b) as f64
}

impl PathDomain for GridWorld {
    fn edge_cost(&self, _from: &Cell, _to: &Cell) -> f64 {
        1.0
    }

    fn heuristic(&self, state: &Cell, goal: &Cell) -> f64 {
        distance(*state, *goal)
    }
}

impl EvaluateDomain for GridWorld {
    fn evaluate(&self, state: &Cell) -> f64 {
        -distance(*state, self.goal)
    }
}

impl DescribeWorld for GridWorld {
    fn describe_state(&self, state: &Cell) -> Value {
        json!([state.row, state.col])
    }

    fn describe_action(&self, action: &Move) -> Value {
        Value::String(action.as_str().to_string())
    }

    fn fixture(&self) -> Value {
        json!({ "rows": self.rows })
    }
}

impl GoalWorld for GridWorld {
    fn goal(&self) -> Cell {
        self.goal
    }
}

impl DecisionWorld for GridWorld {
    fn fallback_action(&self) -> Move {
        Move::Up
    }
}
