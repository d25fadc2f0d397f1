//! Iterative degree search
//!
//! Runs the solver at every candidate degree `3 ..= len/2` and records,
//! per degree, either the recovered configuration or its absence. A
//! singular system at one degree never aborts the scan of the others.
//!
//! The per-degree attempts are independent and read-only over the shared
//! stream, so the scan fans out across threads; results are keyed by
//! degree, which keeps the outcome identical to a sequential scan.

use crate::bitstream::BitStream;
use crate::error::{LfsrError, Result};
use crate::solver::{Gf2Solver, Solution, MIN_DEGREE};
use log::debug;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Total mapping from candidate degree to recovered solution, if any
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    solutions: BTreeMap<usize, Option<Solution>>,
}

impl SearchOutcome {
    /// Every scanned degree, present or absent, in degree order
    pub fn solutions(&self) -> &BTreeMap<usize, Option<Solution>> {
        &self.solutions
    }

    /// Degrees where a consistent tap configuration was recovered
    pub fn recovered(&self) -> impl Iterator<Item = (usize, &Solution)> {
        self.solutions
            .iter()
            .filter_map(|(&degree, solution)| solution.as_ref().map(|s| (degree, s)))
    }

    /// Number of degrees with a recovered configuration
    pub fn hit_count(&self) -> usize {
        self.recovered().count()
    }

    /// Whether any degree produced a configuration
    pub fn has_hits(&self) -> bool {
        self.recovered().next().is_some()
    }
}

/// Scan over all candidate degrees for a stream
pub struct DegreeSearch;

impl DegreeSearch {
    /// Solve at every degree in `3 ..= len/2`
    ///
    /// Fails with [`LfsrError::StreamTooShort`] when that range is empty.
    /// Per-degree [`LfsrError::SingularSystem`] and
    /// [`LfsrError::InsufficientData`] are absorbed as absent entries;
    /// anything else would indicate the whole scan is meaningless and
    /// propagates.
    pub fn search(stream: &BitStream) -> Result<SearchOutcome> {
        let max_degree = stream.len() / 2;
        if max_degree < MIN_DEGREE {
            return Err(LfsrError::StreamTooShort {
                length: stream.len(),
            });
        }

        debug!(
            "scanning degrees {}..={} over a {}-bit stream",
            MIN_DEGREE,
            max_degree,
            stream.len()
        );
        let solutions = (MIN_DEGREE..=max_degree)
            .into_par_iter()
            .map(|degree| match Gf2Solver::solve(stream, degree) {
                Ok(solution) => Ok((degree, Some(solution))),
                Err(LfsrError::SingularSystem { .. })
                | Err(LfsrError::InsufficientData { .. }) => Ok((degree, None)),
                Err(other) => Err(other),
            })
            .collect::<Result<BTreeMap<usize, Option<Solution>>>>()?;

        debug!(
            "degree scan found {} configuration(s)",
            solutions.values().filter(|s| s.is_some()).count()
        );
        Ok(SearchOutcome { solutions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_too_short() {
        let stream: BitStream = "10110".parse().unwrap();
        assert_eq!(
            DegreeSearch::search(&stream).unwrap_err(),
            LfsrError::StreamTooShort { length: 5 }
        );
    }

    #[test]
    fn test_mapping_is_total_over_the_range() {
        let stream: BitStream = "1011010011".parse().unwrap();
        let outcome = DegreeSearch::search(&stream).unwrap();
        let degrees: Vec<usize> = outcome.solutions().keys().copied().collect();
        assert_eq!(degrees, vec![3, 4, 5]);
    }
}
