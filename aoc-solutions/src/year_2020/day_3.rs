//! Toboggan Trajectory: count trees along slopes through a horizontally repeating map.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::anyhow;
use std::fmt;
use std::num::NonZeroUsize;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 3, tags = ["2020", "grid"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Tree,
}

impl TryFrom<char> for Cell {
    type Error = anyhow::Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(Cell::Open),
            '#' => Ok(Cell::Tree),
            _ => Err(anyhow!("invalid map symbol {:?}", c)),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Open => f.write_str("."),
            Cell::Tree => f.write_str("#"),
        }
    }
}

/// A map that repeats infinitely to the right.
///
/// All rows share the same width; `(0, 0)` is the top left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.cells.len() / self.width
    }

    /// Cell at column `x` (wrapping) and row `y`, or `None` below the last row.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (y < self.height()).then(|| self.cells[y * self.width + x % self.width])
    }

    /// Trees hit travelling from the top left corner until falling past the bottom row
    pub fn count_trees(&self, slope: Slope) -> usize {
        (0..self.height())
            .step_by(slope.down.get())
            .enumerate()
            .filter(|&(step, y)| self.get(step * slope.right, y) == Some(Cell::Tree))
            .count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.cells.chunks(self.width).enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slope {
    pub right: usize,
    pub down: NonZeroUsize,
}

impl Slope {
    /// `None` when `down` is zero, which would never leave the map
    pub fn new(right: usize, down: usize) -> Option<Self> {
        NonZeroUsize::new(down).map(|down| Slope { right, down })
    }
}

const ONE: NonZeroUsize = NonZeroUsize::MIN;
const TWO: NonZeroUsize = NonZeroUsize::new(2).unwrap();

const PART_ONE_SLOPE: Slope = Slope { right: 3, down: ONE };

const PART_TWO_SLOPES: [Slope; 5] = [
    Slope { right: 1, down: ONE },
    Slope { right: 3, down: ONE },
    Slope { right: 5, down: ONE },
    Slope { right: 7, down: ONE },
    Slope { right: 1, down: TWO },
];

impl AocParser for Solver {
    type SharedData<'a> = Grid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut width = None;
        let mut cells = Vec::new();

        for (line_idx, line) in input.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let row_start = cells.len();
            for c in line.chars() {
                let cell = Cell::try_from(c).map_err(|e| {
                    ParseError::InvalidFormat(format!("(line {}) {}", line_idx + 1, e))
                })?;
                cells.push(cell);
            }
            let row_width = cells.len() - row_start;
            match width {
                None => width = Some(row_width),
                Some(w) if w != row_width => {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {}) row has width {}, expected {}",
                        line_idx + 1,
                        row_width,
                        w
                    )));
                }
                Some(_) => {}
            }
        }

        let width = width.ok_or_else(|| ParseError::MissingData("empty map".to_string()))?;
        log::debug!("map is {} wide, {} tall", width, cells.len() / width);
        Ok(Grid { width, cells })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_trees(PART_ONE_SLOPE).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(PART_TWO_SLOPES
            .iter()
            .map(|&slope| shared.count_trees(slope) as u64)
            .product::<u64>()
            .to_string())
    }
}
