//! Universal Orbit Map: count orbits and orbital transfers in the orbit tree.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;
use thiserror::Error;

const CENTER: &str = "COM";

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 6, tags = ["2019", "tree"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrbitError {
    #[error("no object {0:?} in the map")]
    UnknownObject(String),
    #[error("object {0:?} orbits itself")]
    Cycle(String),
    #[error("{0:?} and {1:?} orbit unrelated centers")]
    Disconnected(String, String),
}

/// Each object mapped to the object it directly orbits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrbitMap<'a> {
    parents: HashMap<&'a str, &'a str>,
}

impl<'a> OrbitMap<'a> {
    /// Objects `object` orbits, nearest first, up to the root
    pub fn ancestors(&self, object: &str) -> Result<Vec<&'a str>, OrbitError> {
        let mut path = Vec::new();
        let mut current = object;
        while let Some(&parent) = self.parents.get(current) {
            if path.len() > self.parents.len() {
                return Err(OrbitError::Cycle(object.to_string()));
            }
            path.push(parent);
            current = parent;
        }
        Ok(path)
    }

    /// Direct plus indirect orbits of every object
    pub fn total_orbits(&self) -> Result<usize, OrbitError> {
        let mut depths: HashMap<&'a str, usize> = HashMap::from([(CENTER, 0)]);
        let mut total = 0;
        for &object in self.parents.keys() {
            total += self.depth(object, &mut depths)?;
        }
        Ok(total)
    }

    fn depth(&self, object: &'a str, depths: &mut HashMap<&'a str, usize>) -> Result<usize, OrbitError> {
        let mut chain = Vec::new();
        let mut current = object;
        let base = loop {
            if let Some(&depth) = depths.get(current) {
                break depth;
            }
            match self.parents.get(current) {
                Some(&parent) => {
                    if chain.len() > self.parents.len() {
                        return Err(OrbitError::Cycle(object.to_string()));
                    }
                    chain.push(current);
                    current = parent;
                }
                // a root other than the center
                None => break 0,
            }
        };
        for (offset, &node) in chain.iter().rev().enumerate() {
            depths.insert(node, base + offset + 1);
        }
        Ok(base + chain.len())
    }

    /// Orbital transfers to move from the object `from` orbits to the one `to` orbits
    pub fn transfers(&self, from: &str, to: &str) -> Result<usize, OrbitError> {
        for object in [from, to] {
            if !self.parents.contains_key(object) {
                return Err(OrbitError::UnknownObject(object.to_string()));
            }
        }
        let from_path = self.ancestors(from)?;
        let to_path = self.ancestors(to)?;
        let to_index: HashMap<&str, usize> =
            to_path.iter().enumerate().map(|(idx, &o)| (o, idx)).collect();

        from_path
            .iter()
            .enumerate()
            .find_map(|(idx, object)| to_index.get(object).map(|&other| idx + other))
            .ok_or_else(|| OrbitError::Disconnected(from.to_string(), to.to_string()))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = OrbitMap<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut parents = HashMap::new();
        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (center, object) = line
                .split_once(')')
                .filter(|(center, object)| !center.is_empty() && !object.is_empty())
                .ok_or_else(|| {
                    ParseError::InvalidFormat(format!(
                        "(line {}) expected `CENTER)OBJECT`, got {:?}",
                        line_idx + 1,
                        line
                    ))
                })?;
            if parents.insert(object, center).is_some() {
                return Err(ParseError::InvalidFormat(format!(
                    "(line {}) {:?} orbits two objects",
                    line_idx + 1,
                    object
                )));
            }
        }
        log::debug!("parsed {} orbits", parents.len());
        Ok(OrbitMap { parents })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .total_orbits()
            .map(|total| total.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .transfers("YOU", "SAN")
            .map(|count| count.to_string())
            .map_err(SolveError::failed)
    }
}
