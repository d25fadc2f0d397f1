//! Tap recovery from an observed stream
//!
//! ## Overview
//!
//! Given `2*degree` observed bits, the feedback taps of a degree-`degree`
//! LFSR satisfy a square linear system over GF(2): row `i` of the matrix
//! is the window `stream[i .. i+degree)` and the target vector is the
//! second half of the observation. Inverting the matrix and applying it to
//! the target yields the tap vector directly.
//!
//! This is a direct construction, not Berlekamp-Massey: it needs the full
//! `2*degree` bits and reports [`LfsrError::SingularSystem`] when the
//! windows are linearly dependent, rather than degrading to a shorter
//! recurrence.

use crate::bitstream::BitStream;
use crate::engine::LfsrEngine;
use crate::error::{LfsrError, Result};
use crate::gf2::Gf2Matrix;
use crate::register::RegisterConfig;
use log::debug;

/// Smallest degree for which the window system is meaningful
pub const MIN_DEGREE: usize = 3;

/// A recovered tap configuration for one degree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    degree: usize,
    solution_vector: Vec<u8>,
    tap_positions: Vec<usize>,
}

impl Solution {
    /// Recovered register width
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Raw degree-length bit vector; position `i` set means a tap at `i`
    pub fn solution_vector(&self) -> &[u8] {
        &self.solution_vector
    }

    /// Tap positions in ascending order
    pub fn tap_positions(&self) -> &[usize] {
        &self.tap_positions
    }

    /// Register configuration carrying the recovered taps
    pub fn config(&self) -> RegisterConfig {
        // recovered positions are indices into the solution vector, so
        // they are always within the register
        RegisterConfig::from_recovered(self.degree, &self.tap_positions)
    }

    /// Engine configured with the recovered taps
    pub fn engine(&self) -> LfsrEngine {
        LfsrEngine::new(self.config())
    }
}

/// Direct GF(2) linear solver for tap recovery
pub struct Gf2Solver;

impl Gf2Solver {
    /// Recover the tap set that explains `stream` at the given degree
    ///
    /// Only the first `2*degree` bits are consulted. Fails with
    /// [`LfsrError::DegreeTooSmall`] below degree 3,
    /// [`LfsrError::InsufficientData`] when the stream is shorter than
    /// `2*degree`, and [`LfsrError::SingularSystem`] when no unique
    /// solution exists at this degree.
    pub fn solve(stream: &BitStream, degree: usize) -> Result<Solution> {
        if degree < MIN_DEGREE {
            return Err(LfsrError::DegreeTooSmall { degree });
        }
        let required = 2 * degree;
        if stream.len() < required {
            return Err(LfsrError::InsufficientData {
                degree,
                required,
                available: stream.len(),
            });
        }

        debug!("building {}x{} window matrix", degree, degree);
        let mut matrix = Gf2Matrix::new(degree);
        for row in 0..degree {
            for col in 0..degree {
                matrix.set(row, col, stream.bit(row + col));
            }
        }
        let target = stream.window(degree, degree).to_vec();

        debug!("inverting window matrix over GF(2)");
        let inverse = matrix
            .invert()
            .ok_or(LfsrError::SingularSystem { degree })?;

        let solution_vector = inverse.mul_vec(&target);
        let tap_positions: Vec<usize> = solution_vector
            .iter()
            .enumerate()
            .filter_map(|(position, &bit)| (bit == 1).then_some(position))
            .collect();
        debug!("recovered taps {:?} at degree {}", tap_positions, degree);

        Ok(Solution {
            degree,
            solution_vector,
            tap_positions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_too_small() {
        let stream: BitStream = "10110100".parse().unwrap();
        for degree in 0..MIN_DEGREE {
            assert_eq!(
                Gf2Solver::solve(&stream, degree).unwrap_err(),
                LfsrError::DegreeTooSmall { degree }
            );
        }
    }

    #[test]
    fn test_insufficient_data() {
        let stream: BitStream = "10110".parse().unwrap();
        assert_eq!(
            Gf2Solver::solve(&stream, 3).unwrap_err(),
            LfsrError::InsufficientData {
                degree: 3,
                required: 6,
                available: 5
            }
        );
    }

    #[test]
    fn test_solution_builds_engine() {
        // degree-4 maximal stream from taps {0,1}, seed 0b1001
        let stream: BitStream = "10011010".parse().unwrap();
        let solution = Gf2Solver::solve(&stream, 4).unwrap();
        assert_eq!(solution.tap_positions(), &[0, 1]);
        assert_eq!(solution.engine().config().degree(), 4);
    }
}
