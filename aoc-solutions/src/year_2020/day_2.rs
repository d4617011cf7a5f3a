//! Password Philosophy: count passwords that satisfy their policy.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{Context, anyhow, bail};
use std::str::FromStr;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 2, tags = ["2020", "parsing"])]
pub struct Solver;

/// `MIN-MAX C`: two numbers and the letter they constrain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min: usize,
    pub max: usize,
    pub letter: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordEntry<'a> {
    pub policy: PasswordPolicy,
    pub password: &'a str,
}

impl FromStr for PasswordPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (range, letter) = s
            .split_once(' ')
            .ok_or_else(|| anyhow!("expected `MIN-MAX C`, got {:?}", s))?;
        let (min, max) = range
            .split_once('-')
            .ok_or_else(|| anyhow!("expected `MIN-MAX`, got {:?}", range))?;
        let min: usize = min.parse().context("min")?;
        let max: usize = max.parse().context("max")?;
        if min == 0 || min > max {
            bail!("invalid range {}-{}", min, max);
        }

        let mut chars = letter.chars();
        let (Some(letter), None) = (chars.next(), chars.next()) else {
            bail!("invalid policy character {:?}", letter);
        };

        Ok(PasswordPolicy { min, max, letter })
    }
}

impl<'a> PasswordEntry<'a> {
    /// Parse `MIN-MAX C: PASSWORD`, borrowing the password from `line`
    pub fn parse(line: &'a str) -> anyhow::Result<Self> {
        let (policy, password) = line
            .split_once(": ")
            .ok_or_else(|| anyhow!("expected `POLICY: PASSWORD`, got {:?}", line))?;
        Ok(PasswordEntry {
            policy: policy.parse()?,
            password,
        })
    }

    /// The letter occurs between `min` and `max` times, inclusive
    pub fn is_valid_by_count(&self) -> bool {
        let count = self
            .password
            .chars()
            .filter(|&c| c == self.policy.letter)
            .count();
        (self.policy.min..=self.policy.max).contains(&count)
    }

    /// Exactly one of the 1-based positions `min` and `max` holds the letter.
    /// A password too short to have both positions is invalid.
    pub fn is_valid_by_position(&self) -> bool {
        if self.password.chars().count() < self.policy.max {
            return false;
        }
        let holds = |position: usize| {
            position
                .checked_sub(1)
                .and_then(|idx| self.password.chars().nth(idx))
                == Some(self.policy.letter)
        };
        holds(self.policy.min) ^ holds(self.policy.max)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<PasswordEntry<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_idx, line)| {
                PasswordEntry::parse(line).with_context(|| format!("(line {})", line_idx + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|entry| entry.is_valid_by_count())
            .count()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|entry| entry.is_valid_by_position())
            .count()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "1-3 a: abcde\n1-3 b: cdefg\n2-9 c: ccccccccc";

    fn entry(min: usize, max: usize, letter: char, password: &str) -> PasswordEntry<'_> {
        PasswordEntry {
            policy: PasswordPolicy { min, max, letter },
            password,
        }
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!(
            PasswordEntry::parse("1-3 a: abcde").unwrap(),
            entry(1, 3, 'a', "abcde")
        );
    }

    #[test]
    fn test_valid_by_count() {
        assert!(entry(1, 3, 'a', "abcde").is_valid_by_count());
        assert!(!entry(1, 3, 'b', "cdefg").is_valid_by_count());
        assert!(entry(2, 9, 'c', "ccccccccc").is_valid_by_count());
    }

    #[test]
    fn test_valid_by_position() {
        assert!(entry(1, 3, 'a', "abcde").is_valid_by_position());
        assert!(!entry(1, 3, 'b', "cdefg").is_valid_by_position());
        assert!(!entry(2, 9, 'c', "ccccccccc").is_valid_by_position());
        // both positions must exist
        assert!(!entry(1, 9, 'a', "abc").is_valid_by_position());
        assert!(!entry(1, 4, 'a', "abc").is_valid_by_position());
        assert!(entry(1, 3, 'a', "abc").is_valid_by_position());
    }

    #[test]
    fn test_malformed_lines() {
        for line in [
            "1-3 a abcde",
            "1_3 a: abcde",
            "x-3 a: abcde",
            "1-3 ab: abcde",
            "0-3 a: abcde",
            "4-3 a: abcde",
        ] {
            assert!(PasswordEntry::parse(line).is_err(), "{:?} should not parse", line);
        }
    }

    #[test]
    fn test_parse_error_names_line() {
        let err = Solver::parse("1-3 a: abcde\n1-3 b cdefg").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.starts_with("(line 2)")));
    }

    #[test]
    fn test_solve_example() {
        let mut entries = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut entries, 1).unwrap(), "2");
        assert_eq!(Solver::solve_part(&mut entries, 2).unwrap(), "1");
    }

    #[test]
    fn test_short_password_fails_position_rule() {
        let mut entries = Solver::parse("1-9 a: abc\n").unwrap();
        assert_eq!(Solver::solve_part(&mut entries, 1).unwrap(), "1");
        assert_eq!(Solver::solve_part(&mut entries, 2).unwrap(), "0");
    }
}
