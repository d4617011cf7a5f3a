//! Sunny with a Chance of Asteroids: run the diagnostic program for a system ID.

use super::intcode::{self, IntcodeError, Machine};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

const AIR_CONDITIONER: i64 = 1;
const THERMAL_RADIATOR: i64 = 5;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 5, tags = ["2019", "intcode"])]
pub struct Solver;

/// Last output of the diagnostic run; earlier outputs are test results
pub fn diagnostic_code(program: &[i64], system_id: i64) -> Result<i64, IntcodeError> {
    let outputs = Machine::new(program).run(&[system_id])?;
    let failed_checks = outputs
        .iter()
        .rev()
        .skip(1)
        .filter(|&&check| check != 0)
        .count();
    if failed_checks > 0 {
        log::warn!("{} diagnostic check(s) failed for system {}", failed_checks, system_id);
    }
    outputs.last().copied().ok_or(IntcodeError::NoOutput)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        intcode::parse_program(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        diagnostic_code(shared, AIR_CONDITIONER)
            .map(|code| code.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        diagnostic_code(shared, THERMAL_RADIATOR)
            .map(|code| code.to_string())
            .map_err(SolveError::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_system_id_selects_part() {
        let mut program = Solver::parse("3,0,4,0,99").unwrap();
        assert_eq!(Solver::solve_part(&mut program, 1).unwrap(), "1");
        assert_eq!(Solver::solve_part(&mut program, 2).unwrap(), "5");
    }

    #[test]
    fn test_last_output_is_the_code() {
        // prints two passing checks, then the input plus 100
        let program = intcode::parse_program("104,0,104,0,3,13,101,100,13,13,4,13,99,0").unwrap();
        assert_eq!(diagnostic_code(&program, 5), Ok(105));
    }

    #[test]
    fn test_silent_program_fails() {
        let program = intcode::parse_program("3,0,99").unwrap();
        assert_eq!(diagnostic_code(&program, 1), Err(IntcodeError::NoOutput));
        let mut program = program;
        assert!(matches!(
            Solver::solve_part(&mut program, 1),
            Err(SolveError::SolveFailed(_))
        ));
    }
}
