//! Flawed Frequency Transmission: repeated phases of a patterned digit transform.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

const PHASES: usize = 100;
const MESSAGE_LEN: usize = 8;
const OFFSET_DIGITS: usize = 7;
const REPEATS: usize = 10_000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 16, tags = ["2019", "signal"])]
pub struct Solver;

/// One phase. Output digit `i` repeats each element of `0, 1, 0, -1` `i + 1`
/// times, drops the very first value, and keeps the ones digit of the sum.
/// Prefix sums turn each run of equal coefficients into one subtraction.
pub fn phase(signal: &[u8]) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(signal.len() + 1);
    prefix.push(0i64);
    for &digit in signal {
        prefix.push(prefix[prefix.len() - 1] + i64::from(digit));
    }
    let len = signal.len();
    let run = |start: usize, width: usize| {
        let end = (start + width).min(len);
        prefix[end] - prefix[start.min(len)]
    };

    (0..len)
        .map(|idx| {
            let width = idx + 1;
            let mut total = 0;
            let mut start = idx;
            while start < len {
                total += run(start, width);
                total -= run(start + 2 * width, width);
                start += 4 * width;
            }
            (total.abs() % 10) as u8
        })
        .collect()
}

pub fn after_phases(signal: &[u8], phases: usize) -> Vec<u8> {
    (0..phases).fold(signal.to_vec(), |signal, _| phase(&signal))
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Message hidden in the signal repeated `REPEATS` times. Past the halfway
/// point every coefficient is 1, so each phase is a running sum from the end.
pub fn embedded_message(signal: &[u8]) -> Result<String, SolveError> {
    if signal.len() < OFFSET_DIGITS {
        return Err(SolveError::NoSolution(format!(
            "signal needs at least {} digits for the offset",
            OFFSET_DIGITS
        )));
    }
    let offset = signal[..OFFSET_DIGITS]
        .iter()
        .fold(0usize, |acc, &d| acc * 10 + usize::from(d));
    let total = signal.len() * REPEATS;
    if offset < total / 2 || offset + MESSAGE_LEN > total {
        return Err(SolveError::NoSolution(format!(
            "offset {} is outside the second half of {} digits",
            offset, total
        )));
    }

    let mut tail: Vec<u8> = (offset..total).map(|idx| signal[idx % signal.len()]).collect();
    for _ in 0..PHASES {
        let mut sum = 0u8;
        for digit in tail.iter_mut().rev() {
            sum = (sum + *digit) % 10;
            *digit = sum;
        }
    }
    Ok(digits_to_string(&tail[..MESSAGE_LEN]))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let signal = input
            .trim()
            .chars()
            .enumerate()
            .map(|(idx, c)| {
                c.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                    ParseError::InvalidFormat(format!("(digit {}) expected 0-9, got {:?}", idx + 1, c))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if signal.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        Ok(signal)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let output = after_phases(shared, PHASES);
        Ok(digits_to_string(&output[..MESSAGE_LEN.min(output.len())]))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        embedded_message(shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_phases_of_short_signal() {
        let signal = Solver::parse("12345678").unwrap();
        assert_eq!(digits_to_string(&phase(&signal)), "48226158");
        assert_eq!(digits_to_string(&after_phases(&signal, 4)), "01029498");
    }

    #[test]
    fn test_first_eight_after_hundred_phases() {
        for (input, expected) in [
            ("80871224585914546619083218645595", "24176176"),
            ("19617804207202209144916044189917", "73745418"),
            ("69317163492948606335995924319873", "52432133"),
        ] {
            let mut signal = Solver::parse(input).unwrap();
            assert_eq!(Solver::solve_part(&mut signal, 1).unwrap(), expected);
        }
    }

    #[test]
    fn test_embedded_message() {
        for (input, expected) in [
            ("03036732577212944063491565474664", "84462026"),
            ("02935109699940807407585447034323", "78725270"),
            ("03081770884921959731165446850517", "53553731"),
        ] {
            let mut signal = Solver::parse(input).unwrap();
            assert_eq!(Solver::solve_part(&mut signal, 2).unwrap(), expected);
        }
    }

    #[test]
    fn test_offset_in_first_half() {
        let mut signal = Solver::parse("12345678").unwrap();
        assert!(matches!(
            Solver::solve_part(&mut signal, 2),
            Err(SolveError::NoSolution(_))
        ));
        let mut signal = Solver::parse("123").unwrap();
        assert!(matches!(
            Solver::solve_part(&mut signal, 2),
            Err(SolveError::NoSolution(_))
        ));
    }

    #[test]
    fn test_bad_input() {
        assert!(matches!(Solver::parse(" \n"), Err(ParseError::MissingData(_))));
        assert!(matches!(
            Solver::parse("12-4"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(digit 3)")
        ));
    }
}
