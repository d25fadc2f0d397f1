//! Scoring recovered configurations against the observed stream
//!
//! A reconstruction is only as good as the stream it regenerates.
//! [`Validator`] seeds a register from the observed prefix, replays the
//! full run and reports how many bits differ. [`IterValidator`] chains the
//! degree search into this, scoring every recovered configuration — the
//! end-to-end "recover and score" pipeline.

use crate::bitstream::BitStream;
use crate::engine::{LfsrEngine, RunRequest, Seed};
use crate::error::Result;
use crate::register::RegisterConfig;
use crate::search::DegreeSearch;
use log::debug;
use std::collections::BTreeMap;

/// Bit-for-bit comparison of a regenerated stream against the original
///
/// Recomputed fresh on every validation call; nothing is cached across
/// candidate solutions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationResult {
    /// Count of differing bit positions
    pub hamming_distance: usize,
    /// `1 - hamming_distance / stream_length`, in `[0, 1]`
    pub accuracy: f64,
}

impl ValidationResult {
    /// Whether the reconstruction reproduces the stream exactly
    pub fn is_exact(&self) -> bool {
        self.hamming_distance == 0
    }
}

/// Scores one candidate configuration by regenerating its stream
pub struct Validator;

impl Validator {
    /// Regenerate from the observed prefix and compare bit-for-bit
    ///
    /// The seed is the stream's `degree`-bit prefix read in reverse bit
    /// order: the register's LSb-first convention is the mirror of the
    /// stream's left-to-right character order. The engine then runs
    /// `len - 1` clocks so the regenerated stream has the original's
    /// length.
    pub fn validate(stream: &BitStream, config: &RegisterConfig) -> Result<ValidationResult> {
        let degree = config.degree();
        let seed = Seed::from_stream_prefix(stream, degree)?;
        let engine = LfsrEngine::new(config.clone());
        let run = engine.generate(&RunRequest::new(seed, stream.len() - 1))?;

        let hamming_distance = stream.hamming_distance(&run.stream)?;
        let accuracy = 1.0 - hamming_distance as f64 / stream.len() as f64;
        debug!(
            "degree {} scored: hamming {}, accuracy {:.4}",
            degree, hamming_distance, accuracy
        );

        Ok(ValidationResult {
            hamming_distance,
            accuracy,
        })
    }
}

/// Recover-and-score over every degree the search produces
pub struct IterValidator;

impl IterValidator {
    /// Run the degree search, then score each recovered configuration
    ///
    /// Absent degrees are skipped; [`crate::LfsrError::StreamTooShort`]
    /// from the search propagates, since the whole operation is
    /// meaningless without a degree range.
    pub fn validate(stream: &BitStream) -> Result<BTreeMap<usize, ValidationResult>> {
        let outcome = DegreeSearch::search(stream)?;

        let mut results = BTreeMap::new();
        for (degree, solution) in outcome.recovered() {
            let result = Validator::validate(stream, &solution.config())?;
            results.insert(degree, result);
        }
        Ok(results)
    }
}
