//! 1202 Program Alarm: run the gravity assist program with a chosen noun and verb.

use super::intcode::{self, IntcodeError, Machine};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

const ALARM: (i64, i64) = (12, 2);
const TARGET_OUTPUT: i64 = 19_690_720;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 2, tags = ["2019", "intcode"])]
pub struct Solver;

/// Address 0 after running `program` with `noun` at address 1 and `verb` at address 2
pub fn run_with(program: &[i64], noun: i64, verb: i64) -> Result<i64, IntcodeError> {
    let mut machine = Machine::new(program);
    machine.write(1, noun)?;
    machine.write(2, verb)?;
    machine.run(&[])?;
    Ok(machine.read(0))
}

/// First `(noun, verb)` in `0..=99` order whose run leaves `target` at address 0.
/// Pairs that fault are skipped.
pub fn find_noun_verb(program: &[i64], target: i64) -> Option<(i64, i64)> {
    (0..=99)
        .flat_map(|noun| (0..=99).map(move |verb| (noun, verb)))
        .find(|&(noun, verb)| run_with(program, noun, verb) == Ok(target))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        intcode::parse_program(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        run_with(shared, ALARM.0, ALARM.1)
            .map(|value| value.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (noun, verb) = find_noun_verb(shared, TARGET_OUTPUT).ok_or_else(|| {
            SolveError::NoSolution(format!("no noun and verb produce {}", TARGET_OUTPUT))
        })?;
        Ok((100 * noun + verb).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_run_with() {
        let program = intcode::parse_program("1,0,0,0,99,10,20,30").unwrap();
        assert_eq!(run_with(&program, 5, 6), Ok(30));
        assert_eq!(run_with(&program, 5, 7), Ok(40));
        assert_eq!(run_with(&program, 99, 99), Ok(0));
    }

    #[test]
    fn test_find_noun_verb_takes_first_match() {
        let program = intcode::parse_program("1,0,0,0,99,10,20,30").unwrap();
        // noun 2 points at the verb itself, so verb 30 reads 30 + 0
        assert_eq!(find_noun_verb(&program, 30), Some((2, 30)));
        assert_eq!(find_noun_verb(&program, -5), None);
    }

    #[test]
    fn test_solve_parts() {
        let mut program = Solver::parse("1,0,0,0,99,10,20,30,40,50,60,70,80").unwrap();
        // 12 and 2 point at 80 and the verb itself
        assert_eq!(Solver::solve_part(&mut program, 1).unwrap(), "82");
        assert!(matches!(
            Solver::solve_part(&mut program, 2),
            Err(SolveError::NoSolution(_))
        ));
    }

    #[test]
    fn test_fault_is_a_solve_error() {
        let mut program = Solver::parse("2,0,0,0,98").unwrap();
        assert!(matches!(
            Solver::solve_part(&mut program, 1),
            Err(SolveError::SolveFailed(_))
        ));
    }
}
