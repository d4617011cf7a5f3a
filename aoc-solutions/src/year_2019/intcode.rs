//! Intcode virtual machine shared by the 2019 puzzles.
//!
//! Memory is a vector of signed integers that grows on write; reads beyond
//! the end yield 0. Supported opcodes are 1 (add), 2 (mul), 3 (input),
//! 4 (output), 5/6 (jump if true/false), 7 (less than), 8 (equals),
//! 9 (adjust relative base) and 99 (halt), with position, immediate and
//! relative parameter modes.

use aoc_solver::ParseError;
use std::collections::VecDeque;
use thiserror::Error;

/// Addresses at or beyond this are rejected instead of growing memory
const MEMORY_LIMIT: usize = 1 << 22;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntcodeError {
    #[error("unknown opcode {opcode} at address {address}")]
    UnknownOpcode { opcode: i64, address: usize },
    #[error("unknown parameter mode {mode} at address {address}")]
    UnknownMode { mode: i64, address: usize },
    #[error("address {0} is outside memory")]
    InvalidAddress(i64),
    #[error("instruction at address {0} writes through an immediate parameter")]
    ImmediateWrite(usize),
    #[error("arithmetic overflow at address {0}")]
    Overflow(usize),
    #[error("input requested at address {0} but none is left")]
    MissingInput(usize),
    #[error("program halted without output")]
    NoOutput,
}

/// Comma separated integers, surrounding whitespace ignored
pub fn parse_program(input: &str) -> Result<Vec<i64>, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::MissingData("empty intcode program".to_string()));
    }
    input
        .split(',')
        .enumerate()
        .map(|(idx, value)| {
            value.trim().parse::<i64>().map_err(|_| {
                ParseError::InvalidFormat(format!(
                    "(value {}) expected an integer, got {:?}",
                    idx + 1,
                    value
                ))
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Position,
    Immediate,
    Relative,
}

/// Why [`Machine::resume`] returned control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Output(i64),
    NeedsInput,
    Halted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    memory: Vec<i64>,
    ip: usize,
    relative_base: i64,
    inputs: VecDeque<i64>,
}

impl Machine {
    pub fn new(program: &[i64]) -> Self {
        Machine {
            memory: program.to_vec(),
            ip: 0,
            relative_base: 0,
            inputs: VecDeque::new(),
        }
    }

    /// Address of the next instruction
    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn push_input(&mut self, value: i64) {
        self.inputs.push_back(value);
    }

    pub fn read(&self, address: usize) -> i64 {
        self.memory.get(address).copied().unwrap_or(0)
    }

    pub fn write(&mut self, address: usize, value: i64) -> Result<(), IntcodeError> {
        if address >= MEMORY_LIMIT {
            return Err(IntcodeError::InvalidAddress(address as i64));
        }
        if address >= self.memory.len() {
            self.memory.resize(address + 1, 0);
        }
        self.memory[address] = value;
        Ok(())
    }

    /// Feed `inputs` and run until halt, collecting every output.
    ///
    /// Running out of input is an error here; use [`Machine::resume`] to
    /// drive a machine that waits for input.
    pub fn run(&mut self, inputs: &[i64]) -> Result<Vec<i64>, IntcodeError> {
        self.inputs.extend(inputs);
        let mut outputs = Vec::new();
        loop {
            match self.resume()? {
                Event::Output(value) => outputs.push(value),
                Event::NeedsInput => return Err(IntcodeError::MissingInput(self.ip)),
                Event::Halted => return Ok(outputs),
            }
        }
    }

    /// Execute until the next output, an input with an empty queue, or halt.
    /// A halted machine keeps reporting [`Event::Halted`].
    pub fn resume(&mut self) -> Result<Event, IntcodeError> {
        loop {
            let address = self.ip;
            let instruction = self.read(address);
            if instruction < 0 {
                return Err(IntcodeError::UnknownOpcode {
                    opcode: instruction,
                    address,
                });
            }

            match instruction % 100 {
                opcode @ (1 | 2 | 7 | 8) => {
                    let a = self.param(0)?;
                    let b = self.param(1)?;
                    let value = match opcode {
                        1 => a.checked_add(b),
                        2 => a.checked_mul(b),
                        7 => Some(i64::from(a < b)),
                        _ => Some(i64::from(a == b)),
                    }
                    .ok_or(IntcodeError::Overflow(address))?;
                    let target = self.target(2)?;
                    self.write(target, value)?;
                    self.ip += 4;
                }
                3 => {
                    let Some(value) = self.inputs.pop_front() else {
                        return Ok(Event::NeedsInput);
                    };
                    let target = self.target(0)?;
                    self.write(target, value)?;
                    self.ip += 2;
                }
                4 => {
                    let value = self.param(0)?;
                    self.ip += 2;
                    return Ok(Event::Output(value));
                }
                opcode @ (5 | 6) => {
                    let condition = self.param(0)?;
                    if (condition != 0) == (opcode == 5) {
                        self.ip = to_address(self.param(1)?)?;
                    } else {
                        self.ip += 3;
                    }
                }
                9 => {
                    let offset = self.param(0)?;
                    self.relative_base = self
                        .relative_base
                        .checked_add(offset)
                        .ok_or(IntcodeError::Overflow(address))?;
                    self.ip += 2;
                }
                99 => return Ok(Event::Halted),
                _ => {
                    return Err(IntcodeError::UnknownOpcode {
                        opcode: instruction,
                        address,
                    });
                }
            }
        }
    }

    fn mode(&self, param: usize) -> Result<Mode, IntcodeError> {
        let divisor = [100, 1_000, 10_000][param];
        match self.read(self.ip) / divisor % 10 {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            mode => Err(IntcodeError::UnknownMode {
                mode,
                address: self.ip,
            }),
        }
    }

    /// Value of the `param`-th parameter of the current instruction
    fn param(&self, param: usize) -> Result<i64, IntcodeError> {
        let raw = self.read(self.ip + 1 + param);
        match self.mode(param)? {
            Mode::Position => Ok(self.read(to_address(raw)?)),
            Mode::Immediate => Ok(raw),
            Mode::Relative => Ok(self.read(self.relative_address(raw)?)),
        }
    }

    /// Address the `param`-th parameter of the current instruction writes to
    fn target(&self, param: usize) -> Result<usize, IntcodeError> {
        let raw = self.read(self.ip + 1 + param);
        match self.mode(param)? {
            Mode::Position => to_address(raw),
            Mode::Immediate => Err(IntcodeError::ImmediateWrite(self.ip)),
            Mode::Relative => self.relative_address(raw),
        }
    }

    fn relative_address(&self, offset: i64) -> Result<usize, IntcodeError> {
        let address = self
            .relative_base
            .checked_add(offset)
            .ok_or(IntcodeError::Overflow(self.ip))?;
        to_address(address)
    }
}

fn to_address(value: i64) -> Result<usize, IntcodeError> {
    usize::try_from(value)
        .ok()
        .filter(|&address| address < MEMORY_LIMIT)
        .ok_or(IntcodeError::InvalidAddress(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(program: &str, inputs: &[i64]) -> Result<Vec<i64>, IntcodeError> {
        Machine::new(&parse_program(program).unwrap()).run(inputs)
    }

    #[test]
    fn test_parse_program() {
        assert_eq!(parse_program("1,0,0,3,99\n").unwrap(), vec![1, 0, 0, 3, 99]);
        assert_eq!(parse_program(" 104, -7 ,99").unwrap(), vec![104, -7, 99]);
        assert!(matches!(parse_program("  \n"), Err(ParseError::MissingData(_))));
        assert!(matches!(
            parse_program("1,x,3"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(value 2)")
        ));
        assert!(parse_program("1,,3").is_err());
    }

    #[test]
    fn test_add_and_multiply() {
        let cases: [(&str, usize, i64); 5] = [
            ("1,9,10,3,2,3,11,0,99,30,40,50", 0, 3500),
            ("1,0,0,0,99", 0, 2),
            ("2,3,0,3,99", 3, 6),
            ("2,4,4,5,99,0", 5, 9801),
            ("1,1,1,4,99,5,6,0,99", 0, 30),
        ];
        for (program, address, expected) in cases {
            let mut machine = Machine::new(&parse_program(program).unwrap());
            assert_eq!(machine.run(&[]), Ok(Vec::new()));
            assert_eq!(machine.read(address), expected, "{}", program);
        }
    }

    #[test]
    fn test_parameter_modes() {
        let mut machine = Machine::new(&parse_program("1002,4,3,4,33").unwrap());
        assert_eq!(machine.run(&[]), Ok(Vec::new()));
        assert_eq!(machine.read(4), 99);

        assert_eq!(run("3,0,4,0,99", &[42]), Ok(vec![42]));
    }

    #[test]
    fn test_comparisons_and_jumps() {
        for (program, input, expected) in [
            ("3,9,8,9,10,9,4,9,99,-1,8", 8, 1),
            ("3,9,8,9,10,9,4,9,99,-1,8", 7, 0),
            ("3,9,7,9,10,9,4,9,99,-1,8", 7, 1),
            ("3,9,7,9,10,9,4,9,99,-1,8", 9, 0),
            ("3,3,1108,-1,8,3,4,3,99", 8, 1),
            ("3,3,1107,-1,8,3,4,3,99", 8, 0),
            ("3,12,6,12,15,1,13,14,13,4,13,99,-1,0,1,9", 0, 0),
            ("3,12,6,12,15,1,13,14,13,4,13,99,-1,0,1,9", 5, 1),
            ("3,3,1105,-1,9,1101,0,0,12,4,12,99,1", 0, 0),
            ("3,3,1105,-1,9,1101,0,0,12,4,12,99,1", 5, 1),
        ] {
            assert_eq!(run(program, &[input]), Ok(vec![expected]), "{} <- {}", program, input);
        }
    }

    #[test]
    fn test_relative_base_and_large_numbers() {
        let quine = "109,1,204,-1,1001,100,1,100,1008,100,16,101,1006,101,0,99";
        assert_eq!(run(quine, &[]), Ok(parse_program(quine).unwrap()));

        assert_eq!(
            run("104,1125899906842624,99", &[]),
            Ok(vec![1125899906842624])
        );
        let output = run("1102,34915192,34915192,7,4,7,99,0", &[]).unwrap();
        assert_eq!(output[0].to_string().len(), 16);
    }

    #[test]
    fn test_resume_waits_for_input() {
        let mut machine = Machine::new(&parse_program("3,0,4,0,3,0,4,0,99").unwrap());
        assert_eq!(machine.resume(), Ok(Event::NeedsInput));
        machine.push_input(5);
        assert_eq!(machine.resume(), Ok(Event::Output(5)));
        assert_eq!(machine.resume(), Ok(Event::NeedsInput));
        machine.push_input(6);
        assert_eq!(machine.resume(), Ok(Event::Output(6)));
        assert_eq!(machine.resume(), Ok(Event::Halted));
        assert_eq!(machine.resume(), Ok(Event::Halted));
    }

    #[test]
    fn test_faults() {
        assert_eq!(
            run("98", &[]),
            Err(IntcodeError::UnknownOpcode {
                opcode: 98,
                address: 0
            })
        );
        assert_eq!(
            run("-1", &[]),
            Err(IntcodeError::UnknownOpcode {
                opcode: -1,
                address: 0
            })
        );
        assert_eq!(
            run("301,0,0,0,99", &[]),
            Err(IntcodeError::UnknownMode {
                mode: 3,
                address: 0
            })
        );
        assert_eq!(run("1101,1,1,-1,99", &[]), Err(IntcodeError::InvalidAddress(-1)));
        assert_eq!(run("11101,1,1,0,99", &[]), Err(IntcodeError::ImmediateWrite(0)));
        assert_eq!(
            run("1102,9223372036854775807,2,0,99", &[]),
            Err(IntcodeError::Overflow(0))
        );
        assert_eq!(run("3,0,99", &[]), Err(IntcodeError::MissingInput(0)));
        assert_eq!(
            run("1101,1,1,99999999,99", &[]),
            Err(IntcodeError::InvalidAddress(99999999))
        );
    }
}
