//! Memory Maneuver: a license tree stored as a flat list of numbers.
//!
//! Each node is a header (child count, metadata count), then its children,
//! then its metadata entries.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{Context, anyhow, bail};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 8, tags = ["2018", "tree"])]
pub struct Solver;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub children: Vec<Node>,
    pub metadata: Vec<u32>,
}

impl Node {
    fn read(numbers: &mut impl Iterator<Item = u32>) -> anyhow::Result<Node> {
        let mut next = |what: &str| numbers.next().ok_or_else(|| anyhow!("missing {}", what));
        let child_count = next("child count")?;
        let metadata_count = next("metadata count")?;
        let children = (0..child_count)
            .map(|idx| Node::read(numbers).with_context(|| format!("child {}", idx + 1)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let metadata = (0..metadata_count)
            .map(|_| numbers.next().ok_or_else(|| anyhow!("missing metadata entry")))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Node { children, metadata })
    }

    /// Sum of every metadata entry in this subtree
    pub fn metadata_sum(&self) -> u64 {
        self.metadata.iter().map(|&m| u64::from(m)).sum::<u64>()
            + self.children.iter().map(Node::metadata_sum).sum::<u64>()
    }

    /// A leaf is worth its metadata sum. Otherwise each metadata entry
    /// picks a child by 1-based index and entries past the end count as zero.
    pub fn value(&self) -> u64 {
        if self.children.is_empty() {
            return self.metadata.iter().map(|&m| u64::from(m)).sum();
        }
        self.metadata
            .iter()
            .filter_map(|&m| (m as usize).checked_sub(1).and_then(|idx| self.children.get(idx)))
            .map(Node::value)
            .sum()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Node;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let numbers = input
            .split_whitespace()
            .enumerate()
            .map(|(idx, token)| {
                token
                    .parse::<u32>()
                    .with_context(|| format!("(number {}) expected a count, got {:?}", idx + 1, token))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))?;
        if numbers.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }

        let mut iter = numbers.into_iter();
        let root = Node::read(&mut iter)
            .and_then(|root| match iter.len() {
                0 => Ok(root),
                extra => bail!("{} numbers left after the root node", extra),
            })
            .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))?;
        Ok(root)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.metadata_sum().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.value().to_string())
    }
}
