//! Space Stoichiometry: ore needed for fuel, and fuel a fixed ore budget buys.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{Context, anyhow, bail};
use std::collections::HashMap;
use thiserror::Error;

const ORE: &str = "ORE";
const FUEL: &str = "FUEL";
const ORE_BUDGET: u64 = 1_000_000_000_000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 14, tags = ["2019", "graph"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChemistryError {
    #[error("no reaction produces {0:?}")]
    UnknownChemical(String),
    #[error("{0:?} is needed to produce itself")]
    Cycle(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction<'a> {
    pub output: u64,
    pub inputs: Vec<(u64, &'a str)>,
}

/// Reactions keyed by their product, plus every chemical in an order where
/// each one comes after all chemicals it is made from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nanofactory<'a> {
    reactions: HashMap<&'a str, Reaction<'a>>,
    order: Vec<&'a str>,
}

impl<'a> Nanofactory<'a> {
    pub fn new(reactions: HashMap<&'a str, Reaction<'a>>) -> Result<Self, ChemistryError> {
        let mut factory = Nanofactory {
            reactions,
            order: Vec::new(),
        };
        let mut marks = HashMap::new();
        let mut order = Vec::new();
        factory.visit(FUEL, &mut marks, &mut order)?;
        factory.order = order;
        Ok(factory)
    }

    /// Depth-first post-order; `false` marks a chemical still on the stack
    fn visit(
        &self,
        chemical: &'a str,
        marks: &mut HashMap<&'a str, bool>,
        order: &mut Vec<&'a str>,
    ) -> Result<(), ChemistryError> {
        match marks.get(chemical) {
            Some(true) => return Ok(()),
            Some(false) => return Err(ChemistryError::Cycle(chemical.to_string())),
            None if chemical == ORE => return Ok(()),
            None => {}
        }
        let reaction = self
            .reactions
            .get(chemical)
            .ok_or_else(|| ChemistryError::UnknownChemical(chemical.to_string()))?;
        marks.insert(chemical, false);
        for &(_, input) in &reaction.inputs {
            self.visit(input, marks, order)?;
        }
        marks.insert(chemical, true);
        order.push(chemical);
        Ok(())
    }

    /// Ore needed for `fuel` units of fuel, `None` if the amount overflows.
    /// Leftovers are shared, so each chemical is settled once after all of
    /// its consumers.
    pub fn ore_for(&self, fuel: u64) -> Option<u64> {
        let mut needed: HashMap<&'a str, u64> = HashMap::from([(FUEL, fuel)]);
        for &chemical in self.order.iter().rev() {
            let amount = needed.get(chemical).copied().unwrap_or(0);
            if amount == 0 {
                continue;
            }
            let reaction = self.reactions.get(chemical)?;
            let batches = amount.div_ceil(reaction.output);
            for &(quantity, input) in &reaction.inputs {
                let entry = needed.entry(input).or_insert(0);
                *entry = entry.checked_add(quantity.checked_mul(batches)?)?;
            }
        }
        Some(needed.get(ORE).copied().unwrap_or(0))
    }

    /// Most fuel `ore` can make, `None` if no bound fits in 64 bits
    pub fn max_fuel(&self, ore: u64) -> Option<u64> {
        let fits = |fuel: u64| self.ore_for(fuel).is_some_and(|needed| needed <= ore);
        if !fits(1) {
            return Some(0);
        }
        let mut high = 2;
        while fits(high) {
            high = high.checked_mul(2)?;
        }
        let mut low = high / 2;
        while high - low > 1 {
            let mid = low + (high - low) / 2;
            if fits(mid) {
                low = mid;
            } else {
                high = mid;
            }
        }
        Some(low)
    }
}

fn term(s: &str) -> anyhow::Result<(u64, &str)> {
    let (quantity, name) = s
        .trim()
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected `QUANTITY NAME`, got {:?}", s.trim()))?;
    let quantity: u64 = quantity.parse().with_context(|| format!("quantity {:?}", quantity))?;
    if quantity == 0 {
        bail!("quantity of {:?} must be positive", name);
    }
    Ok((quantity, name.trim()))
}

fn reaction(line: &str) -> anyhow::Result<(&str, Reaction<'_>)> {
    let (inputs, output) = line
        .split_once("=>")
        .ok_or_else(|| anyhow!("expected `INPUTS => OUTPUT`, got {:?}", line))?;
    let (output, name) = term(output)?;
    let inputs = inputs.split(',').map(term).collect::<anyhow::Result<Vec<_>>>()?;
    Ok((name, Reaction { output, inputs }))
}

impl AocParser for Solver {
    type SharedData<'a> = Nanofactory<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut reactions = HashMap::new();
        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (name, rule) = reaction(line)
                .and_then(|(name, rule)| {
                    if reactions.contains_key(name) {
                        bail!("{:?} is produced by two reactions", name);
                    }
                    Ok((name, rule))
                })
                .with_context(|| format!("(line {})", line_idx + 1))
                .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))?;
            reactions.insert(name, rule);
        }
        if reactions.is_empty() {
            return Err(ParseError::MissingData("empty input".to_string()));
        }
        log::debug!("parsed {} reactions", reactions.len());
        Nanofactory::new(reactions).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .ore_for(1)
            .map(|ore| ore.to_string())
            .ok_or_else(|| SolveError::NoSolution("ore needed does not fit in 64 bits".to_string()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .max_fuel(ORE_BUDGET)
            .map(|fuel| fuel.to_string())
            .ok_or_else(|| SolveError::NoSolution("fuel made does not fit in 64 bits".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SIMPLE: &str = "\
10 ORE => 10 A
1 ORE => 1 B
7 A, 1 B => 1 C
7 A, 1 C => 1 D
7 A, 1 D => 1 E
7 A, 1 E => 1 FUEL
";

    const SHARED_BATCHES: &str = "\
9 ORE => 2 A
8 ORE => 3 B
7 ORE => 5 C
3 A, 4 B => 1 AB
5 B, 7 C => 1 BC
4 C, 1 A => 1 CA
2 AB, 3 BC, 4 CA => 1 FUEL
";

    const MEDIUM: &str = "\
157 ORE => 5 NZVS
165 ORE => 6 DCFZ
44 XJWVT, 5 KHKGT, 1 QDVJ, 29 NZVS, 9 GPVTF, 48 HKGWZ => 1 FUEL
12 HKGWZ, 1 GPVTF, 8 PSHF => 9 QDVJ
179 ORE => 7 PSHF
177 ORE => 5 HKGWZ
7 DCFZ, 7 PSHF => 2 XJWVT
165 ORE => 2 GPVTF
3 DCFZ, 7 NZVS, 5 HKGWZ, 10 PSHF => 8 KHKGT
";

    const LARGE: &str = "\
2 VPVL, 7 FWMGM, 2 CXFTF, 11 MNCFX => 1 STKFG
17 NVRVD, 3 JNWZP => 8 VPVL
53 STKFG, 6 MNCFX, 46 VJHF, 81 HVMC, 68 CXFTF, 25 GNMV => 1 FUEL
22 VJHF, 37 MNCFX => 5 FWMGM
139 ORE => 4 NVRVD
144 ORE => 7 JNWZP
5 MNCFX, 7 RFSQX, 2 FWMGM, 2 VPVL, 19 CXFTF => 3 HVMC
5 VJHF, 7 MNCFX, 9 VPVL, 37 CXFTF => 6 GNMV
145 ORE => 6 MNCFX
1 NVRVD => 8 CXFTF
1 VJHF, 6 MNCFX => 4 RFSQX
176 ORE => 6 VJHF
";

    const LARGEST: &str = "\
171 ORE => 8 CNZTR
7 ZLQW, 3 BMBT, 9 XCVML, 26 XMNCP, 1 WPTQ, 2 MZWV, 1 RJRHP => 4 PLWSL
114 ORE => 4 BHXH
14 VRPVC => 6 BMBT
6 BHXH, 18 KTJDG, 12 WPTQ, 7 PLWSL, 31 FHTLT, 37 ZDVW => 1 FUEL
6 WPTQ, 2 BMBT, 8 ZLQW, 18 KTJDG, 1 XMNCP, 6 MZWV, 1 RJRHP => 6 FHTLT
15 XDBXC, 2 LTCX, 1 VRPVC => 6 ZLQW
13 WPTQ, 10 LTCX, 3 RJRHP, 14 XMNCP, 2 MZWV, 1 ZLQW => 1 ZDVW
5 BMBT => 4 WPTQ
189 ORE => 9 KTJDG
1 MZWV, 17 XDBXC, 3 XCVML => 2 XMNCP
12 VRPVC, 27 CNZTR => 2 XDBXC
15 KTJDG, 12 BHXH => 5 XCVML
3 BHXH, 2 VRPVC => 7 MZWV
121 ORE => 7 VRPVC
7 XCVML => 6 RJRHP
5 BHXH, 4 VRPVC => 5 LTCX
";

    #[test]
    fn test_ore_for_one_fuel() {
        for (input, ore) in [
            (SIMPLE, 31),
            (SHARED_BATCHES, 165),
            (MEDIUM, 13312),
            (LARGE, 180697),
            (LARGEST, 2210736),
        ] {
            let mut factory = Solver::parse(input).unwrap();
            assert_eq!(Solver::solve_part(&mut factory, 1).unwrap(), ore.to_string());
        }
    }

    #[test]
    fn test_fuel_from_a_trillion_ore() {
        for (input, fuel) in [(MEDIUM, 82892753), (LARGE, 5586022), (LARGEST, 460664)] {
            let mut factory = Solver::parse(input).unwrap();
            assert_eq!(Solver::solve_part(&mut factory, 2).unwrap(), fuel.to_string());
        }
    }

    #[test]
    fn test_budget_edges() {
        let factory = Solver::parse(SIMPLE).unwrap();
        assert_eq!(factory.max_fuel(30), Some(0));
        assert_eq!(factory.max_fuel(31), Some(1));
        assert_eq!(factory.ore_for(2), Some(62));
        assert_eq!(factory.max_fuel(0), Some(0));
    }

    #[test]
    fn test_unknown_and_cyclic_chemicals() {
        assert!(matches!(
            Solver::parse("1 ORE => 1 A\n2 B => 1 FUEL\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("\"B\"")
        ));
        assert!(matches!(
            Solver::parse("1 A => 1 FUEL\n1 FUEL => 1 A\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("itself")
        ));
        assert!(matches!(
            Solver::parse("1 ORE => 1 A\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("\"FUEL\"")
        ));
    }

    #[test]
    fn test_malformed_reactions() {
        assert!(matches!(Solver::parse("\n"), Err(ParseError::MissingData(_))));
        assert!(matches!(
            Solver::parse("1 ORE => 1 FUEL\n1 ORE -> 1 A\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")
        ));
        assert!(Solver::parse("0 ORE => 1 FUEL\n").is_err());
        assert!(Solver::parse("1 ORE => 1 FUEL\n2 ORE => 1 FUEL\n").is_err());
    }
}
