//! Chronal Charge: the square of fuel cells with the most total power.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

const GRID_SIZE: usize = 300;
const PART_1_SQUARE: usize = 3;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 11, tags = ["2018", "grid"])]
pub struct Solver;

/// Power level of the cell at 1-based `(x, y)` for a grid serial number
pub fn power_level(x: i64, y: i64, serial: i64) -> i64 {
    let rack = x + 10;
    ((rack * y + serial) * rack / 100) % 10 - 5
}

/// The best square anchored at its top-left cell, with its size and total power
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub x: usize,
    pub y: usize,
    pub size: usize,
    pub power: i64,
}

/// Summed-area table over the power grid: `sums[y][x]` holds the total of
/// every cell above and left of `(x, y)`, exclusive.
pub struct PowerGrid {
    sums: Vec<Vec<i64>>,
}

impl PowerGrid {
    pub fn new(serial: i64) -> Self {
        let mut sums = vec![vec![0i64; GRID_SIZE + 1]; GRID_SIZE + 1];
        for y in 1..=GRID_SIZE {
            for x in 1..=GRID_SIZE {
                sums[y][x] = power_level(x as i64, y as i64, serial) + sums[y - 1][x]
                    + sums[y][x - 1]
                    - sums[y - 1][x - 1];
            }
        }
        PowerGrid { sums }
    }

    /// Total power of the `size` square whose top-left cell is 1-based `(x, y)`
    pub fn square_power(&self, x: usize, y: usize, size: usize) -> i64 {
        let (x0, y0) = (x - 1, y - 1);
        let (x1, y1) = (x0 + size, y0 + size);
        self.sums[y1][x1] - self.sums[y0][x1] - self.sums[y1][x0] + self.sums[y0][x0]
    }

    /// Most powerful square of exactly `size`; the first in row order wins ties
    pub fn best_of_size(&self, size: usize) -> Option<Square> {
        let last = GRID_SIZE.checked_sub(size)? + 1;
        let mut best: Option<Square> = None;
        for y in 1..=last {
            for x in 1..=last {
                let power = self.square_power(x, y, size);
                if best.is_none_or(|b| power > b.power) {
                    best = Some(Square { x, y, size, power });
                }
            }
        }
        best
    }

    /// Most powerful square of any size; smaller sizes win ties
    pub fn best_of_any_size(&self) -> Option<Square> {
        (1..=GRID_SIZE)
            .filter_map(|size| self.best_of_size(size))
            .fold(None, |best: Option<Square>, square| match best {
                Some(b) if b.power >= square.power => Some(b),
                _ => Some(square),
            })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = i64;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let serial = input.trim();
        if serial.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        serial.parse().map_err(|e| {
            ParseError::InvalidFormat(format!("expected a grid serial number, got {:?}: {}", serial, e))
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let square = PowerGrid::new(*shared)
            .best_of_size(PART_1_SQUARE)
            .ok_or_else(|| SolveError::NoSolution("grid too small".to_string()))?;
        Ok(format!("{},{}", square.x, square.y))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let square = PowerGrid::new(*shared)
            .best_of_any_size()
            .ok_or_else(|| SolveError::NoSolution("grid too small".to_string()))?;
        log::debug!("best square has power {}", square.power);
        Ok(format!("{},{},{}", square.x, square.y, square.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_power_levels() {
        assert_eq!(power_level(3, 5, 8), 4);
        assert_eq!(power_level(122, 79, 57), -5);
        assert_eq!(power_level(217, 196, 39), 0);
        assert_eq!(power_level(101, 153, 71), 4);
    }

    #[test]
    fn test_best_three_by_three() {
        let grid = PowerGrid::new(18);
        assert_eq!(
            grid.best_of_size(3),
            Some(Square {
                x: 33,
                y: 45,
                size: 3,
                power: 29
            })
        );
        let mut serial = Solver::parse("42\n").unwrap();
        assert_eq!(Solver::solve_part(&mut serial, 1).unwrap(), "21,61");
    }

    #[test]
    fn test_best_of_any_size() {
        let mut serial = Solver::parse("18").unwrap();
        assert_eq!(Solver::solve_part(&mut serial, 2).unwrap(), "90,269,16");
        let best = PowerGrid::new(42).best_of_any_size().unwrap();
        assert_eq!((best.x, best.y, best.size, best.power), (232, 251, 12, 119));
    }

    #[test]
    fn test_square_power_matches_cell_sum() {
        let grid = PowerGrid::new(57);
        let direct: i64 = (120..124)
            .flat_map(|x| (77..81).map(move |y| power_level(x, y, 57)))
            .sum();
        assert_eq!(grid.square_power(120, 77, 4), direct);
        assert_eq!(grid.best_of_size(GRID_SIZE + 1), None);
    }

    #[test]
    fn test_bad_serial() {
        assert!(matches!(Solver::parse(""), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("forty-two"), Err(ParseError::InvalidFormat(_))));
    }
}
