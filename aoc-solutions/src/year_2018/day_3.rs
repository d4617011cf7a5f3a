//! No Matter How You Slice It: overlapping fabric claims.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{Context, anyhow};
use regex::Regex;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

static CLAIM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(\d+) @ (\d+),(\d+): (\d+)x(\d+)$").unwrap());

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 3, tags = ["2018", "grid"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub id: u32,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Claim {
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.left..self.left + self.width)
            .flat_map(move |x| (self.top..self.top + self.height).map(move |y| (x, y)))
    }
}

impl FromStr for Claim {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = CLAIM
            .captures(s)
            .ok_or_else(|| anyhow!("expected `#ID @ LEFT,TOP: WxH`, got {:?}", s))?;
        let field = |idx: usize| -> anyhow::Result<u32> {
            caps[idx]
                .parse()
                .with_context(|| format!("field {:?}", &caps[idx]))
        };
        let claim = Claim {
            id: field(1)?,
            left: field(2)?,
            top: field(3)?,
            width: field(4)?,
            height: field(5)?,
        };
        claim
            .left
            .checked_add(claim.width)
            .zip(claim.top.checked_add(claim.height))
            .ok_or_else(|| anyhow!("claim #{} reaches past the fabric", claim.id))?;
        Ok(claim)
    }
}

/// How many claims cover each square inch
pub fn coverage(claims: &[Claim]) -> HashMap<(u32, u32), u32> {
    let mut counts = HashMap::new();
    for cell in claims.iter().flat_map(|claim| claim.cells()) {
        *counts.entry(cell).or_insert(0) += 1;
    }
    counts
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Claim>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let claims = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                line.trim()
                    .parse::<Claim>()
                    .with_context(|| format!("(line {})", line_idx + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))?;
        if claims.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        Ok(claims)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let overlapping = coverage(shared).values().filter(|&&n| n > 1).count();
        Ok(overlapping.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let counts = coverage(shared);
        let intact: Vec<u32> = shared
            .iter()
            .filter(|claim| claim.cells().all(|cell| counts.get(&cell) == Some(&1)))
            .map(|claim| claim.id)
            .collect();
        match intact.as_slice() {
            [id] => Ok(id.to_string()),
            [] => Err(SolveError::NoSolution("every claim overlaps another".to_string())),
            many => Err(SolveError::NoSolution(format!(
                "{} claims do not overlap: {:?}",
                many.len(),
                many
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "#1 @ 1,3: 4x4\n#2 @ 3,1: 4x4\n#3 @ 5,5: 2x2\n";

    #[test]
    fn test_example() {
        let mut claims = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(
            claims[0],
            Claim {
                id: 1,
                left: 1,
                top: 3,
                width: 4,
                height: 4
            }
        );
        assert_eq!(Solver::solve_part(&mut claims, 1).unwrap(), "4");
        assert_eq!(Solver::solve_part(&mut claims, 2).unwrap(), "3");
    }

    #[test]
    fn test_empty_claim_covers_nothing() {
        let claims = Solver::parse("#7 @ 2,2: 0x3\n").unwrap();
        assert_eq!(claims[0].cells().count(), 0);
        assert!(coverage(&claims).is_empty());
    }

    #[test]
    fn test_ambiguous_intact_claim() {
        let mut claims = Solver::parse("#1 @ 0,0: 1x1\n#2 @ 5,5: 1x1\n").unwrap();
        assert!(matches!(
            Solver::solve_part(&mut claims, 2),
            Err(SolveError::NoSolution(msg)) if msg.starts_with("2 claims")
        ));
    }

    #[test]
    fn test_malformed_claims() {
        assert!(matches!(Solver::parse(""), Err(ParseError::MissingData(_))));
        assert!(matches!(
            Solver::parse("#1 @ 1,3: 4x4\n#2 @ 3,1 4x4\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")
        ));
        assert!(Solver::parse("#1 @ 4294967295,0: 2x2\n").is_err());
    }
}
