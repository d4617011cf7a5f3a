//! Custom Customs: aggregate yes-answers per travel group.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 6, tags = ["2020", "sets"])]
pub struct Solver;

/// Per-question tally for one group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupAnswers {
    persons: usize,
    tally: [usize; 26],
}

impl GroupAnswers {
    /// Record one person's answers; each letter counts once per person
    pub fn add_person(&mut self, answers: &str) -> Result<(), char> {
        let mut seen = [false; 26];
        for c in answers.chars() {
            if !c.is_ascii_lowercase() {
                return Err(c);
            }
            seen[(c as u8 - b'a') as usize] = true;
        }
        for (count, _) in self.tally.iter_mut().zip(seen).filter(|(_, seen)| *seen) {
            *count += 1;
        }
        self.persons += 1;
        Ok(())
    }

    pub fn persons(&self) -> usize {
        self.persons
    }

    /// Questions anyone in the group answered
    pub fn anyone(&self) -> usize {
        self.tally.iter().filter(|&&count| count > 0).count()
    }

    /// Questions everyone in the group answered
    pub fn everyone(&self) -> usize {
        self.tally
            .iter()
            .filter(|&&count| count > 0 && count == self.persons)
            .count()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<GroupAnswers>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut groups = Vec::new();
        let mut current = GroupAnswers::default();

        for (line_idx, line) in input.lines().map(str::trim).enumerate() {
            if line.is_empty() {
                if current.persons > 0 {
                    groups.push(std::mem::take(&mut current));
                }
                continue;
            }
            current.add_person(line).map_err(|c| {
                ParseError::InvalidFormat(format!(
                    "(line {}) answers must be a-z, got {:?}",
                    line_idx + 1,
                    c
                ))
            })?;
        }
        if current.persons > 0 {
            groups.push(current);
        }

        Ok(groups)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(GroupAnswers::anyone).sum::<usize>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(GroupAnswers::everyone).sum::<usize>().to_string())
    }
}
