//! Cascaded LFSRs
//!
//! A [`MultiLfsr`] chains same-degree registers: each cascade step clocks
//! the running state through every stage once, in order, and the step's
//! logged state and emitted bit come from the final stage. Unlike a single
//! engine's run, the cascade emits no pre-clock bit, so a run of
//! `iterations` steps yields exactly `iterations` stream bits alongside
//! `iterations + 1` logged states.

use crate::engine::{LfsrEngine, Period, RunRequest, RunState};
use crate::error::{LfsrError, Result};
use crate::register::RegisterState;
use log::debug;

/// Chain of same-degree engines driven as one generator
#[derive(Debug, Clone)]
pub struct MultiLfsr {
    stages: Vec<LfsrEngine>,
    degree: usize,
}

impl MultiLfsr {
    /// Build a cascade; all stages must share one degree
    pub fn new(stages: Vec<LfsrEngine>) -> Result<Self> {
        let first = stages.first().ok_or(LfsrError::EmptyCascade)?;
        let degree = first.config().degree();
        for stage in &stages {
            let found = stage.config().degree();
            if found != degree {
                return Err(LfsrError::DegreeMismatch {
                    expected: degree,
                    found,
                });
            }
        }
        Ok(Self { stages, degree })
    }

    /// Shared register width of every stage
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of chained stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Feedback polynomial of each stage, in chain order
    pub fn feedback_polynomials(&self) -> Vec<String> {
        self.stages
            .iter()
            .map(|stage| stage.config().feedback_polynomial())
            .collect()
    }

    /// Drive the cascade for `iterations` steps from the requested seed
    pub fn generate(&self, request: &RunRequest) -> Result<RunState> {
        if request.seed.significant_bits() > self.degree {
            return Err(LfsrError::SeedOutOfRange {
                degree: self.degree,
            });
        }

        let mut state = RegisterState::from_bits_lsb(request.seed.bits(), self.degree);
        let seed_state = state.clone();

        let mut log = Vec::with_capacity(request.iterations + 1);
        log.push(state.clone());
        let mut stream = crate::bitstream::BitStream::with_capacity(request.iterations);
        let mut period = Period::NotFound;

        for step in 1..=request.iterations as u64 {
            let mut output = 0u8;
            for stage in &self.stages {
                let mut new_bit = 0u8;
                for &tap in stage.config().tap_positions() {
                    new_bit ^= state.bit(tap);
                }
                state.shift_in(new_bit);
                output = state.output_bit();
            }

            log.push(state.clone());
            stream.push(output);

            if period == Period::NotFound && state == seed_state {
                period = Period::Found(step);
            }
        }

        debug!(
            "cascade of {} stages generated {} bits, period {}",
            self.stages.len(),
            stream.len(),
            period
        );

        Ok(RunState {
            seed: seed_state,
            log,
            stream,
            period,
        })
    }
}
