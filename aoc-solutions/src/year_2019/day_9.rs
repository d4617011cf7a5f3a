//! Sensor Boost: the BOOST program in test mode and in sensor boost mode.

use super::intcode::{self, IntcodeError, Machine};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

const TEST_MODE: i64 = 1;
const BOOST_MODE: i64 = 2;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 9, tags = ["2019", "intcode"])]
pub struct Solver;

/// The BOOST keycode; more than one output lists the opcodes that misbehave
pub fn boost(program: &[i64], mode: i64) -> Result<String, SolveError> {
    let outputs = Machine::new(program)
        .run(&[mode])
        .map_err(SolveError::failed)?;
    match outputs.as_slice() {
        [keycode] => Ok(keycode.to_string()),
        [] => Err(SolveError::failed(IntcodeError::NoOutput)),
        faulty => Err(SolveError::NoSolution(format!(
            "self check reported faulty opcodes {:?}",
            faulty
        ))),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        intcode::parse_program(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        boost(shared, TEST_MODE)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        boost(shared, BOOST_MODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_single_output_is_the_keycode() {
        let mut program = Solver::parse("104,1125899906842624,99").unwrap();
        assert_eq!(
            Solver::solve_part(&mut program, 1).unwrap(),
            "1125899906842624"
        );
    }

    #[test]
    fn test_mode_reaches_the_program() {
        // relative base 10, read the mode into address 10, then echo it
        let mut program = Solver::parse("109,10,203,0,204,0,99").unwrap();
        assert_eq!(Solver::solve_part(&mut program, 1).unwrap(), "1");
        assert_eq!(Solver::solve_part(&mut program, 2).unwrap(), "2");
    }

    #[test]
    fn test_multiple_outputs_report_faults() {
        let quine = "109,1,204,-1,1001,100,1,100,1008,100,16,101,1006,101,0,99";
        let mut program = Solver::parse(quine).unwrap();
        assert!(matches!(
            Solver::solve_part(&mut program, 1),
            Err(SolveError::NoSolution(_))
        ));
    }

    #[test]
    fn test_silent_program() {
        let mut program = Solver::parse("3,0,99").unwrap();
        assert!(matches!(
            Solver::solve_part(&mut program, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }
}
