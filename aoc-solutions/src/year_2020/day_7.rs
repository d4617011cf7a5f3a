//! Handy Haversacks: queries over the "bag contains bags" rule graph.
//!
//! Rules form a directed graph whose edges carry a multiplicity: `light red`
//! containing `2 muted yellow` bags is an edge of weight 2. The graph is only
//! ever read by the queries; all traversal state lives in the query call.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{Context, anyhow, bail};
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

const MY_BAG: &str = "shiny gold";

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 7, tags = ["2020", "graph"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("no rule for bag {0:?}")]
    UnknownBag(String),
    #[error("bag {0:?} eventually contains itself")]
    Cycle(String),
    #[error("bag {0:?} holds more bags than fit in 64 bits")]
    Overflow(String),
}

/// Bags directly inside one bag, with their counts
pub type Contents<'a> = Vec<(&'a str, u32)>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet<'a> {
    rules: HashMap<&'a str, Contents<'a>>,
}

impl<'a> RuleSet<'a> {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn contents(&self, bag: &str) -> Option<&Contents<'a>> {
        self.rules.get(bag)
    }

    /// Number of distinct bags that eventually contain `target`, not counting `target` itself
    pub fn ancestor_count(&self, target: &str) -> Result<usize, RuleError> {
        let (&target, _) = self
            .rules
            .get_key_value(target)
            .ok_or_else(|| RuleError::UnknownBag(target.to_string()))?;

        let mut parents: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for (&bag, contents) in &self.rules {
            for &(child, _) in contents {
                parents.entry(child).or_default().push(bag);
            }
        }

        let mut visited: HashSet<&'a str> = HashSet::from([target]);
        let mut queue = VecDeque::from([target]);
        while let Some(bag) = queue.pop_front() {
            for &parent in parents.get(bag).into_iter().flatten() {
                if visited.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }

        Ok(visited.len() - 1)
    }

    /// Total number of bags inside `bag`: every edge `bag -> child` of weight `n`
    /// contributes `n * (1 + total_contained(child))`.
    pub fn total_contained(&self, bag: &str) -> Result<u64, RuleError> {
        let mut memo = HashMap::new();
        self.contained(bag, &mut memo)
    }

    /// `memo` holds `None` for bags still being expanded, which marks a cycle
    fn contained(
        &self,
        bag: &str,
        memo: &mut HashMap<&'a str, Option<u64>>,
    ) -> Result<u64, RuleError> {
        let (&bag, contents) = self
            .rules
            .get_key_value(bag)
            .ok_or_else(|| RuleError::UnknownBag(bag.to_string()))?;

        match memo.get(bag) {
            Some(Some(total)) => return Ok(*total),
            Some(None) => return Err(RuleError::Cycle(bag.to_string())),
            None => {}
        }

        memo.insert(bag, None);
        let mut total: u64 = 0;
        for &(child, count) in contents {
            let inner = self.contained(child, memo)?;
            total = inner
                .checked_add(1)
                .and_then(|with_child| with_child.checked_mul(u64::from(count)))
                .and_then(|edge| total.checked_add(edge))
                .ok_or_else(|| RuleError::Overflow(bag.to_string()))?;
        }
        memo.insert(bag, Some(total));
        Ok(total)
    }
}

/// `light red bags` or `1 bright white bag` -> `light red` / `bright white`
fn bag_name(s: &str) -> anyhow::Result<&str> {
    s.strip_suffix(" bags")
        .or_else(|| s.strip_suffix(" bag"))
        .ok_or_else(|| anyhow!("expected `<name> bag(s)`, got {:?}", s))
}

fn parse_rule(line: &str) -> anyhow::Result<(&str, Contents<'_>)> {
    let line = line
        .strip_suffix('.')
        .ok_or_else(|| anyhow!("rule must end with '.'"))?;
    let (outer, inner) = line
        .split_once(" contain ")
        .ok_or_else(|| anyhow!("expected `<bag> contain <bags>`"))?;
    let outer = bag_name(outer)?;

    if inner == "no other bags" {
        return Ok((outer, Vec::new()));
    }

    let mut contents: Contents<'_> = Vec::new();
    for item in inner.split(", ") {
        let (count, name) = item
            .split_once(' ')
            .ok_or_else(|| anyhow!("expected `<count> <bag>`, got {:?}", item))?;
        let count: u32 = count
            .parse()
            .with_context(|| format!("invalid count {:?}", count))?;
        let name = bag_name(name)?;
        if contents.iter().any(|&(existing, _)| existing == name) {
            bail!("{:?} listed twice", name);
        }
        contents.push((name, count));
    }
    Ok((outer, contents))
}

impl AocParser for Solver {
    type SharedData<'a> = RuleSet<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut rules = HashMap::new();

        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (bag, contents) = parse_rule(line).map_err(|e| {
                ParseError::InvalidFormat(format!("(line {}) {:#}", line_idx + 1, e))
            })?;
            if rules.insert(bag, contents).is_some() {
                return Err(ParseError::InvalidFormat(format!(
                    "(line {}) second rule for bag {:?}",
                    line_idx + 1,
                    bag
                )));
            }
        }

        let rule_set = RuleSet { rules };
        for (bag, contents) in &rule_set.rules {
            let undefined = contents
                .iter()
                .find(|(child, _)| rule_set.contents(child).is_none());
            if let Some((child, _)) = undefined {
                return Err(ParseError::InvalidFormat(format!(
                    "bag {:?} contains {:?}, which has no rule",
                    bag, child
                )));
            }
        }

        log::debug!("parsed {} bag rules", rule_set.len());
        Ok(rule_set)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .ancestor_count(MY_BAG)
            .map(|count| count.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .total_contained(MY_BAG)
            .map(|total| total.to_string())
            .map_err(SolveError::failed)
    }
}
