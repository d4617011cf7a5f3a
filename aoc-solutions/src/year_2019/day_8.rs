//! Space Image Format: layered images, their checksum and the decoded picture.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::fmt;
use thiserror::Error;

const WIDTH: usize = 25;
const HEIGHT: usize = 6;

const BLACK: u8 = 0;
const WHITE: u8 = 1;
const TRANSPARENT: u8 = 2;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 8, tags = ["2019", "image"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("{len} digits do not split into {width}x{height} layers")]
    Ragged { len: usize, width: usize, height: usize },
    #[error("image has no layers")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    layers: Vec<Vec<u8>>,
}

impl Image {
    pub fn new(width: usize, height: usize, digits: &[u8]) -> Result<Self, ImageError> {
        let size = width * height;
        if digits.is_empty() {
            return Err(ImageError::Empty);
        }
        if size == 0 || digits.len() % size != 0 {
            return Err(ImageError::Ragged {
                len: digits.len(),
                width,
                height,
            });
        }
        Ok(Image {
            width,
            layers: digits.chunks(size).map(<[u8]>::to_vec).collect(),
        })
    }

    /// On the layer with the fewest 0 digits, the 1 count times the 2 count.
    /// Ties go to the earliest layer.
    pub fn checksum(&self) -> usize {
        fn count(layer: &[u8], digit: u8) -> usize {
            layer.iter().filter(|&&d| d == digit).count()
        }
        self.layers
            .iter()
            .min_by_key(|layer| count(layer, 0))
            .map_or(0, |layer| count(layer, 1) * count(layer, 2))
    }

    /// Stack the layers; the first non-transparent pixel from the top wins
    pub fn decode(&self) -> Picture {
        let size = self.layers.first().map_or(0, Vec::len);
        let pixels = (0..size)
            .map(|idx| {
                self.layers
                    .iter()
                    .map(|layer| layer[idx])
                    .find(|&pixel| pixel != TRANSPARENT)
                    .unwrap_or(TRANSPARENT)
            })
            .collect();
        Picture {
            width: self.width,
            pixels,
        }
    }
}

/// A single decoded layer, rendered with `#` for white and `.` for black
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    width: usize,
    pixels: Vec<u8>,
}

impl fmt::Display for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.pixels.chunks(self.width).enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for &pixel in row {
                let symbol = match pixel {
                    BLACK => '.',
                    WHITE => '#',
                    _ => ' ',
                };
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .chars()
            .enumerate()
            .map(|(idx, c)| {
                c.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                    ParseError::InvalidFormat(format!("(digit {}) expected 0-9, got {:?}", idx + 1, c))
                })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let image = Image::new(WIDTH, HEIGHT, shared).map_err(SolveError::failed)?;
        Ok(image.checksum().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let image = Image::new(WIDTH, HEIGHT, shared).map_err(SolveError::failed)?;
        let picture = image.decode();
        log::debug!("decoded picture:\n{}", picture);
        Ok(picture.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_checksum_example() {
        let digits = Solver::parse("123456789012\n").unwrap();
        let image = Image::new(3, 2, &digits).unwrap();
        assert_eq!(image.layers.len(), 2);
        assert_eq!(image.checksum(), 1);
    }

    #[test]
    fn test_decode_example() {
        let digits = Solver::parse("0222112222120000").unwrap();
        let image = Image::new(2, 2, &digits).unwrap();
        assert_eq!(image.decode().to_string(), ".#\n#.");
    }

    #[test]
    fn test_fully_transparent_pixel() {
        let image = Image::new(2, 1, &[2, 0, 2, 1]).unwrap();
        assert_eq!(image.decode().to_string(), " .");
    }

    #[test]
    fn test_solve_full_size_image() {
        let mut digits = vec![1; WIDTH * HEIGHT];
        digits.extend(vec![0; WIDTH * HEIGHT]);
        digits[0] = 2;
        let mut digits = Solver::parse(
            &digits.iter().map(|d| d.to_string()).collect::<String>(),
        )
        .unwrap();

        // first layer has no zeros: 149 ones and a single two
        assert_eq!(Solver::solve_part(&mut digits, 1).unwrap(), "149");
        let picture = Solver::solve_part(&mut digits, 2).unwrap();
        let rows: Vec<&str> = picture.lines().collect();
        assert_eq!(rows.len(), HEIGHT);
        assert_eq!(rows[0], format!(".{}", "#".repeat(WIDTH - 1)));
        assert_eq!(rows[1], "#".repeat(WIDTH));
    }

    #[test]
    fn test_bad_input() {
        assert!(matches!(
            Solver::parse("12a4"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(digit 3)")
        ));
        assert_eq!(
            Image::new(3, 2, &[1, 2, 3, 4, 5]),
            Err(ImageError::Ragged {
                len: 5,
                width: 3,
                height: 2
            })
        );
        assert_eq!(Image::new(3, 2, &[]), Err(ImageError::Empty));

        let mut digits = Solver::parse("1234").unwrap();
        assert!(matches!(
            Solver::solve_part(&mut digits, 1),
            Err(SolveError::SolveFailed(_))
        ));
    }
}
