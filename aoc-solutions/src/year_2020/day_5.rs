//! Binary Boarding: decode binary-space-partitioned seat codes.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

pub const ROWS: u16 = 128;
pub const COLUMNS: u16 = 8;
const ROW_SYMBOLS: usize = 7;
const COLUMN_SYMBOLS: usize = 3;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 5, tags = ["2020", "decoding"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatError {
    #[error("invalid seat symbol {0:?}")]
    InvalidSymbol(char),
    #[error("seat code must be {expected} symbols, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("{region} at position {position} does not select a {dimension}")]
    WrongDimension {
        region: Region,
        position: usize,
        dimension: &'static str,
    },
    #[error("{0} seats qualify as the missing seat")]
    AmbiguousGap(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Front,
    Back,
    Left,
    Right,
}

impl Region {
    fn is_lower_half(self) -> bool {
        matches!(self, Region::Front | Region::Left)
    }

    fn selects_row(self) -> bool {
        matches!(self, Region::Front | Region::Back)
    }
}

impl TryFrom<char> for Region {
    type Error = SeatError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'F' => Ok(Region::Front),
            'B' => Ok(Region::Back),
            'L' => Ok(Region::Left),
            'R' => Ok(Region::Right),
            _ => Err(SeatError::InvalidSymbol(c)),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Region::Front => "F",
            Region::Back => "B",
            Region::Left => "L",
            Region::Right => "R",
        };
        f.write_str(symbol)
    }
}

/// Keep the lower or upper half of the inclusive range `first..=last`
pub fn bisect(first: u16, last: u16, lower_half: bool) -> (u16, u16) {
    if first >= last {
        return (first, last);
    }
    let mid = first + (last - first + 1) / 2;
    if lower_half {
        (first, mid - 1)
    } else {
        (mid, last)
    }
}

/// Resolve `count` candidates down to one by halving once per region
pub fn resolve(count: u16, regions: &[Region]) -> u16 {
    let (first, _) = regions
        .iter()
        .fold((0, count.saturating_sub(1)), |(first, last), region| {
            bisect(first, last, region.is_lower_half())
        });
    first
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Seat {
    pub row: u16,
    pub column: u16,
}

impl Seat {
    pub fn id(self) -> u16 {
        self.row * COLUMNS + self.column
    }

    /// Decode a 10-symbol code: seven `F`/`B` row symbols, then three `L`/`R` column symbols
    pub fn decode(code: &str) -> Result<Self, SeatError> {
        let regions = code
            .chars()
            .map(Region::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let expected = ROW_SYMBOLS + COLUMN_SYMBOLS;
        if regions.len() != expected {
            return Err(SeatError::WrongLength {
                expected,
                actual: regions.len(),
            });
        }

        for (position, &region) in regions.iter().enumerate() {
            let wants_row = position < ROW_SYMBOLS;
            if region.selects_row() != wants_row {
                return Err(SeatError::WrongDimension {
                    region,
                    position,
                    dimension: if wants_row { "row" } else { "column" },
                });
            }
        }

        let (row_regions, column_regions) = regions.split_at(ROW_SYMBOLS);
        Ok(Seat {
            row: resolve(ROWS, row_regions),
            column: resolve(COLUMNS, column_regions),
        })
    }
}

/// The ID that is missing while both its neighbours are present.
///
/// Returns `Ok(None)` when no ID qualifies and an error when several do.
pub fn find_gap(ids: &BTreeSet<u16>) -> Result<Option<u16>, SeatError> {
    let gaps: Vec<u16> = ids
        .iter()
        .zip(ids.iter().skip(1))
        .filter(|&(&low, &high)| high - low == 2)
        .map(|(&low, _)| low + 1)
        .collect();

    match gaps.as_slice() {
        [] => Ok(None),
        [gap] => Ok(Some(*gap)),
        _ => Err(SeatError::AmbiguousGap(gaps.len())),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Seat>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                Seat::decode(line.trim()).map_err(|e| {
                    ParseError::InvalidFormat(format!("(line {}) {}", line_idx + 1, e))
                })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .map(|seat| seat.id())
            .max()
            .map(|id| id.to_string())
            .ok_or_else(|| SolveError::NoSolution("no boarding passes".to_string()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let ids: BTreeSet<u16> = shared.iter().map(|seat| seat.id()).collect();
        log::debug!("{} distinct seat IDs", ids.len());

        find_gap(&ids)
            .map_err(SolveError::failed)?
            .map(|id| id.to_string())
            .ok_or_else(|| SolveError::NoSolution("no seat with both neighbours taken".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    fn encode(id: u16) -> String {
        let row = id / COLUMNS;
        let column = id % COLUMNS;
        let rows = (0..ROW_SYMBOLS).rev().map(|bit| if (row >> bit) & 1 == 1 { 'B' } else { 'F' });
        let columns = (0..COLUMN_SYMBOLS)
            .rev()
            .map(|bit| if (column >> bit) & 1 == 1 { 'R' } else { 'L' });
        rows.chain(columns).collect()
    }

    #[test]
    fn test_bisect_steps() {
        let steps = [
            ((0, 127), true, (0, 63)),
            ((0, 63), false, (32, 63)),
            ((32, 63), true, (32, 47)),
            ((32, 47), false, (40, 47)),
            ((40, 47), false, (44, 47)),
            ((44, 47), true, (44, 45)),
            ((44, 45), true, (44, 44)),
        ];
        for ((first, last), lower, expected) in steps {
            assert_eq!(bisect(first, last, lower), expected);
        }
    }

    #[test]
    fn test_decode_examples() {
        let seat = Seat::decode("FBFBBFFRLR").unwrap();
        assert_eq!(seat, Seat { row: 44, column: 5 });
        assert_eq!(seat.id(), 357);
        assert_eq!(Seat::decode("BFFFBBFRRR").unwrap().id(), 567);
        assert_eq!(Seat::decode("FFFBBBFRRR").unwrap().id(), 119);
        assert_eq!(Seat::decode("BBFFBBFRLL").unwrap().id(), 820);
    }

    #[test]
    fn test_decode_rejects_bad_codes() {
        assert_eq!(
            Seat::decode("FBFBBFFRLX"),
            Err(SeatError::InvalidSymbol('X'))
        );
        assert_eq!(
            Seat::decode("FBFBBFFRL"),
            Err(SeatError::WrongLength {
                expected: 10,
                actual: 9
            })
        );
        assert!(matches!(
            Seat::decode("FBFBBFRRLR"),
            Err(SeatError::WrongDimension { position: 6, .. })
        ));
    }

    #[test]
    fn test_highest_seat_id() {
        let mut seats = Solver::parse("FBFBBFFRLR\nBFFFBBFRRR\nBBFFBBFRLL\n").unwrap();
        assert_eq!(Solver::solve_part(&mut seats, 1).unwrap(), "820");
    }

    #[test]
    fn test_missing_seat() {
        let input: String = [100u16, 101, 103, 104]
            .into_iter()
            .map(|id| encode(id) + "\n")
            .collect();
        let mut seats = Solver::parse(&input).unwrap();
        assert_eq!(Solver::solve_part(&mut seats, 2).unwrap(), "102");
    }

    #[test]
    fn test_gap_outcomes() {
        let contiguous: BTreeSet<u16> = (10..20).collect();
        assert_eq!(find_gap(&contiguous), Ok(None));

        let two_gaps: BTreeSet<u16> = [10, 12, 14].into_iter().collect();
        assert_eq!(find_gap(&two_gaps), Err(SeatError::AmbiguousGap(2)));

        // a missing run of two seats is not a gap
        let wide: BTreeSet<u16> = [10, 13].into_iter().collect();
        assert_eq!(find_gap(&wide), Ok(None));
    }

    #[test]
    fn test_empty_input_has_no_highest_seat() {
        let mut seats = Solver::parse("").unwrap();
        assert!(matches!(
            Solver::solve_part(&mut seats, 1),
            Err(SolveError::NoSolution(_))
        ));
    }

    proptest! {
        #[test]
        fn decode_is_a_bijection_onto_seat_ids(id in 0u16..ROWS * COLUMNS) {
            let seat = Seat::decode(&encode(id)).unwrap();
            prop_assert_eq!(seat.id(), id);
            prop_assert!(seat.row < ROWS && seat.column < COLUMNS);
        }
    }
}
