//! Passport Processing: validate blank-line-separated `key:value` records.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static HAIR_COLOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#[0-9a-f]{6}$").unwrap());

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 4, tags = ["2020", "validation"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassportError {
    #[error("unknown field key {0:?}")]
    UnknownField(String),
    #[error("field {0:?} is not written as `key:value`")]
    MissingSeparator(String),
    #[error("field {0} appears more than once")]
    DuplicateField(&'static str),
    #[error("height {0:?} is not a number followed by `cm` or `in`")]
    InvalidHeight(String),
    #[error("unknown eye color {0:?}")]
    InvalidEyeColor(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BirthYear,
    IssueYear,
    ExpirationYear,
    Height,
    HairColor,
    EyeColor,
    PassportId,
    CountryId,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::BirthYear,
        Field::IssueYear,
        Field::ExpirationYear,
        Field::Height,
        Field::HairColor,
        Field::EyeColor,
        Field::PassportId,
        Field::CountryId,
    ];

    /// Every field except the country ID
    pub const REQUIRED: [Field; 7] = [
        Field::BirthYear,
        Field::IssueYear,
        Field::ExpirationYear,
        Field::Height,
        Field::HairColor,
        Field::EyeColor,
        Field::PassportId,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::BirthYear => "byr",
            Field::IssueYear => "iyr",
            Field::ExpirationYear => "eyr",
            Field::Height => "hgt",
            Field::HairColor => "hcl",
            Field::EyeColor => "ecl",
            Field::PassportId => "pid",
            Field::CountryId => "cid",
        }
    }

    /// Whether `value` satisfies this field's strict format rule
    pub fn is_valid_value(self, value: &str) -> bool {
        match self {
            Field::BirthYear => year_in(value, 1920, 2002),
            Field::IssueYear => year_in(value, 2010, 2020),
            Field::ExpirationYear => year_in(value, 2020, 2030),
            Field::Height => value.parse::<Height>().is_ok_and(|h| h.is_valid()),
            Field::HairColor => HAIR_COLOR.is_match(value),
            Field::EyeColor => value.parse::<EyeColor>().is_ok(),
            Field::PassportId => value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit()),
            Field::CountryId => true,
        }
    }
}

impl FromStr for Field {
    type Err = PassportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| PassportError::UnknownField(s.to_string()))
    }
}

fn year_in(value: &str, min: u32, max: u32) -> bool {
    value.len() == 4
        && value.bytes().all(|b| b.is_ascii_digit())
        && value.parse::<u32>().is_ok_and(|year| (min..=max).contains(&year))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Height {
    Centimeters(u32),
    Inches(u32),
}

impl Height {
    pub fn is_valid(self) -> bool {
        match self {
            Height::Centimeters(cm) => (150..=193).contains(&cm),
            Height::Inches(inches) => (59..=76).contains(&inches),
        }
    }
}

impl FromStr for Height {
    type Err = PassportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PassportError::InvalidHeight(s.to_string());
        let (number, unit): (&str, fn(u32) -> Height) = if let Some(cm) = s.strip_suffix("cm") {
            (cm, Height::Centimeters)
        } else if let Some(inches) = s.strip_suffix("in") {
            (inches, Height::Inches)
        } else {
            return Err(invalid());
        };
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        number.parse().map(unit).map_err(|_| invalid())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeColor {
    Amber,
    Blue,
    Brown,
    Gray,
    Green,
    Hazel,
    Other,
}

impl FromStr for EyeColor {
    type Err = PassportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amb" => Ok(EyeColor::Amber),
            "blu" => Ok(EyeColor::Blue),
            "brn" => Ok(EyeColor::Brown),
            "gry" => Ok(EyeColor::Gray),
            "grn" => Ok(EyeColor::Green),
            "hzl" => Ok(EyeColor::Hazel),
            "oth" => Ok(EyeColor::Other),
            _ => Err(PassportError::InvalidEyeColor(s.to_string())),
        }
    }
}

/// One passport record; values borrow from the input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passport<'a> {
    fields: [Option<&'a str>; 8],
}

impl<'a> Passport<'a> {
    pub fn get(&self, field: Field) -> Option<&'a str> {
        self.fields[field as usize]
    }

    pub fn set(&mut self, field: Field, value: &'a str) -> Result<(), PassportError> {
        let slot = &mut self.fields[field as usize];
        if slot.is_some() {
            return Err(PassportError::DuplicateField(field.key()));
        }
        *slot = Some(value);
        Ok(())
    }

    /// Add every `key:value` token of one input line
    pub fn extend_from_line(&mut self, line: &'a str) -> Result<(), PassportError> {
        for token in line.split_whitespace() {
            let (key, value) = token
                .split_once(':')
                .ok_or_else(|| PassportError::MissingSeparator(token.to_string()))?;
            self.set(key.parse()?, value)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(Option::is_none)
    }

    /// Lenient check: every required field is present and non-empty
    pub fn has_required_fields(&self) -> bool {
        Field::REQUIRED
            .into_iter()
            .all(|field| self.get(field).is_some_and(|value| !value.is_empty()))
    }

    /// Strict check: every required field is present and well-formed
    pub fn is_strictly_valid(&self) -> bool {
        Field::REQUIRED.into_iter().all(|field| {
            self.get(field)
                .is_some_and(|value| field.is_valid_value(value))
        })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Passport<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut passports = Vec::new();
        let mut current = Passport::default();

        for (line_idx, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    passports.push(std::mem::take(&mut current));
                }
                continue;
            }
            current.extend_from_line(line).map_err(|e| {
                ParseError::InvalidFormat(format!("(line {}) {}", line_idx + 1, e))
            })?;
        }
        if !current.is_empty() {
            passports.push(current);
        }

        log::debug!("parsed {} passports", passports.len());
        Ok(passports)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|passport| passport.has_required_fields())
            .count()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|passport| passport.is_strictly_valid())
            .count()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
ecl:gry pid:860033327 eyr:2020 hcl:#fffffd
byr:1937 iyr:2017 cid:147 hgt:183cm

iyr:2013 ecl:amb cid:350 eyr:2023 pid:028048884
hcl:#cfa07d byr:1929

hcl:#ae17e1 iyr:2013
eyr:2024
ecl:brn pid:760753108 byr:1931
hgt:179cm

hcl:#cfa07d eyr:2025 pid:166559648
iyr:2011 ecl:brn hgt:59in
";

    const INVALID: &str = "\
eyr:1972 cid:100
hcl:#18171d ecl:amb hgt:170 pid:186cm iyr:2018 byr:1926

iyr:2019
hcl:#602927 eyr:1967 hgt:170cm
ecl:grn pid:012533040 byr:1946

hcl:dab227 iyr:2012
ecl:brn hgt:182cm pid:021572410 eyr:2020 byr:1992 cid:277

hgt:59cm ecl:zzz
eyr:2038 hcl:74454a iyr:2023
pid:3556412378 byr:2007
";

    const VALID: &str = "\
pid:087499704 hgt:74in ecl:grn iyr:2012 eyr:2030 byr:1980
hcl:#623a2f

eyr:2029 ecl:blu cid:129 byr:1989
iyr:2014 pid:896056539 hcl:#a97842 hgt:165cm

hcl:#888785
hgt:164cm byr:2001 iyr:2015 cid:88
pid:545766238 ecl:hzl
eyr:2022

iyr:2010 hgt:158cm hcl:#b6652a ecl:blu byr:1944 eyr:2021 pid:093154719
";

    fn solve(input: &str, part: u8) -> String {
        let mut passports = Solver::parse(input).unwrap();
        Solver::solve_part(&mut passports, part).unwrap()
    }

    #[test]
    fn test_lenient_example() {
        assert_eq!(solve(EXAMPLE, 1), "2");
    }

    #[test]
    fn test_strict_examples() {
        assert_eq!(solve(INVALID, 2), "0");
        assert_eq!(solve(VALID, 2), "4");
    }

    #[test]
    fn test_field_rules() {
        assert!(Field::BirthYear.is_valid_value("2002"));
        assert!(!Field::BirthYear.is_valid_value("2003"));
        assert!(!Field::BirthYear.is_valid_value("+200"));
        assert!(Field::Height.is_valid_value("60in"));
        assert!(Field::Height.is_valid_value("190cm"));
        assert!(!Field::Height.is_valid_value("190in"));
        assert!(!Field::Height.is_valid_value("190"));
        assert!(Field::HairColor.is_valid_value("#123abc"));
        assert!(!Field::HairColor.is_valid_value("#123abz"));
        assert!(!Field::HairColor.is_valid_value("123abc"));
        assert!(Field::EyeColor.is_valid_value("brn"));
        assert!(!Field::EyeColor.is_valid_value("wat"));
        assert!(Field::PassportId.is_valid_value("000000001"));
        assert!(!Field::PassportId.is_valid_value("0123456789"));
    }

    #[test]
    fn test_field_boundaries() {
        let cases = [
            (Field::BirthYear, "1919", false),
            (Field::BirthYear, "1920", true),
            (Field::BirthYear, "2002", true),
            (Field::BirthYear, "2003", false),
            (Field::IssueYear, "2009", false),
            (Field::IssueYear, "2010", true),
            (Field::IssueYear, "2020", true),
            (Field::IssueYear, "2021", false),
            (Field::IssueYear, "02015", false),
            (Field::ExpirationYear, "2019", false),
            (Field::ExpirationYear, "2020", true),
            (Field::ExpirationYear, "2030", true),
            (Field::ExpirationYear, "2031", false),
            (Field::Height, "149cm", false),
            (Field::Height, "150cm", true),
            (Field::Height, "193cm", true),
            (Field::Height, "194cm", false),
            (Field::Height, "58in", false),
            (Field::Height, "59in", true),
            (Field::Height, "76in", true),
            (Field::Height, "77in", false),
            (Field::Height, "170", false),
            (Field::Height, "", false),
            (Field::Height, "cm", false),
            (Field::Height, "+170cm", false),
            (Field::HairColor, "#000000", true),
            (Field::HairColor, "#abcdef0", false),
            (Field::HairColor, "#ABCDEF", false),
            (Field::EyeColor, "amb", true),
            (Field::EyeColor, "oth", true),
            (Field::EyeColor, "ambr", false),
            (Field::EyeColor, "", false),
            (Field::PassportId, "12345678", false),
            (Field::PassportId, "123456789", true),
            (Field::PassportId, "1234567890", false),
            (Field::PassportId, "12345678a", false),
            (Field::CountryId, "", true),
        ];
        for (field, value, expected) in cases {
            assert_eq!(
                field.is_valid_value(value),
                expected,
                "{}:{:?}",
                field.key(),
                value
            );
        }
    }

    #[test]
    fn test_height_and_eye_color_errors() {
        assert_eq!("183cm".parse::<Height>(), Ok(Height::Centimeters(183)));
        assert_eq!("59in".parse::<Height>(), Ok(Height::Inches(59)));
        assert_eq!(
            "170".parse::<Height>(),
            Err(PassportError::InvalidHeight("170".to_string()))
        );
        assert_eq!(
            "xcm".parse::<Height>(),
            Err(PassportError::InvalidHeight("xcm".to_string()))
        );
        assert_eq!("hzl".parse::<EyeColor>(), Ok(EyeColor::Hazel));
        assert_eq!(
            "zzz".parse::<EyeColor>(),
            Err(PassportError::InvalidEyeColor("zzz".to_string()))
        );
    }

    #[test]
    fn test_out_of_range_year_is_lenient_but_not_strict() {
        let mut passports = Solver::parse(
            "byr:1900 iyr:2012 eyr:2022 hgt:170cm hcl:#abcdef ecl:amb pid:123456789",
        )
        .unwrap();
        let passport = &passports[0];
        assert!(passport.has_required_fields());
        assert!(!passport.is_strictly_valid());
        assert_eq!(Solver::solve_part(&mut passports, 1).unwrap(), "1");
        assert_eq!(Solver::solve_part(&mut passports, 2).unwrap(), "0");
    }

    #[test]
    fn test_missing_field_invalid_even_leniently() {
        let passports =
            Solver::parse("byr:1990 iyr:2012 eyr:2022 hgt:170cm hcl:#abcdef ecl:amb cid:1")
                .unwrap();
        assert!(!passports[0].has_required_fields());
    }

    #[test]
    fn test_malformed_records() {
        assert!(matches!(
            Solver::parse("byr:1990 xyz:1"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("xyz")
        ));
        assert!(matches!(
            Solver::parse("byr:1990\nbyr1990"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")
        ));
        assert!(matches!(
            Solver::parse("byr:1990\nbyr:1991"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("more than once")
        ));
    }

    #[test]
    fn test_extra_blank_lines_do_not_create_records() {
        let passports = Solver::parse("\n\nbyr:1990\n\n\n\niyr:2010\n\n").unwrap();
        assert_eq!(passports.len(), 2);
    }
}
