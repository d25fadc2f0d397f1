//! LFSR simulation engine
//!
//! ## Overview
//!
//! [`LfsrEngine`] evolves a register one clock per step using a
//! Fibonacci-style XOR-tap feedback: the bits at the configured tap
//! positions are XORed into a new bit, the register shifts right, and the
//! new bit enters at the MSb. The emitted output is the post-shift LSb.
//!
//! The very first stream bit is the seed's own LSb, emitted before any
//! clocking. Downstream solving depends on this framing: the first
//! `degree` stream bits are exactly the seed read LSb-first, which is what
//! lets the validator re-derive a seed from an observed prefix.
//!
//! Engines are immutable; every [`LfsrEngine::generate`] call returns a
//! fresh [`RunState`], so independent runs of one configuration need no
//! coordination.

use crate::bitstream::BitStream;
use crate::error::{LfsrError, Result};
use crate::register::{RegisterConfig, RegisterState};
use log::debug;
use smallvec::SmallVec;
use std::fmt;

/// Initial register contents, a value in `[0, 2^degree)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    bits: SmallVec<[u8; 16]>,
}

impl Seed {
    /// Seed from an unsigned integer value
    pub fn from_value(value: u128) -> Self {
        let mut bits = SmallVec::new();
        let mut v = value;
        while v > 0 {
            bits.push((v & 1) as u8);
            v >>= 1;
        }
        Self { bits }
    }

    /// Seed from the first `degree` bits of an observed stream
    ///
    /// The stream's left-to-right character order is the mirror of the
    /// register's LSb-first convention, so the prefix is read in reverse:
    /// seed bit 0 is the stream's first character.
    pub fn from_stream_prefix(stream: &BitStream, degree: usize) -> Result<Self> {
        if stream.len() < degree {
            return Err(LfsrError::InsufficientData {
                degree,
                required: degree,
                available: stream.len(),
            });
        }
        Ok(Self {
            bits: stream.window(0, degree).into(),
        })
    }

    /// Number of bits needed to hold the seed value
    pub fn significant_bits(&self) -> usize {
        self.bits
            .iter()
            .rposition(|&b| b == 1)
            .map_or(0, |index| index + 1)
    }

    pub(crate) fn bits(&self) -> &[u8] {
        &self.bits
    }
}

/// One `generate` invocation: seed plus clock count
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub seed: Seed,
    pub iterations: usize,
}

impl RunRequest {
    pub fn new(seed: Seed, iterations: usize) -> Self {
        Self { seed, iterations }
    }
}

/// Cycle length of a run, or why none was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Run ended before the seed state recurred
    NotFound,
    /// First clock index at which the register returned to the seed
    Found(u64),
    /// Clock count exceeded `2^degree - 1` without recurrence; the
    /// feedback polynomial cannot be primitive
    SubMaximal,
}

impl Period {
    pub fn is_found(&self) -> bool {
        matches!(self, Period::Found(_))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::NotFound => write!(f, "not found"),
            Period::Found(period) => write!(f, "{}", period),
            Period::SubMaximal => write!(f, "sub-maximal"),
        }
    }
}

/// Everything one run produced; replaced wholesale by the next run
#[derive(Debug, Clone)]
pub struct RunState {
    /// Initial register contents
    pub seed: RegisterState,
    /// One state per clock, the seed included as state 0
    pub log: Vec<RegisterState>,
    /// One output bit per clock, the seed's LSb first
    pub stream: BitStream,
    /// First recurrence of the seed state, if any
    pub period: Period,
}

/// Deterministic Fibonacci LFSR over a validated configuration
#[derive(Debug, Clone)]
pub struct LfsrEngine {
    config: RegisterConfig,
}

impl LfsrEngine {
    /// Engine over an already-validated configuration
    pub fn new(config: RegisterConfig) -> Self {
        Self { config }
    }

    /// Convenience constructor validating degree and taps in one step
    pub fn with_taps(degree: usize, tap_positions: &[i64]) -> Result<Self> {
        Ok(Self::new(RegisterConfig::new(degree, tap_positions)?))
    }

    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// Run the register for `iterations` clocks from the requested seed
    ///
    /// Deterministic: the same `(degree, taps, seed, iterations)` always
    /// yields the same log, stream and period. The returned stream and
    /// log both hold `iterations + 1` entries.
    pub fn generate(&self, request: &RunRequest) -> Result<RunState> {
        let degree = self.config.degree();
        if request.seed.significant_bits() > degree {
            return Err(LfsrError::SeedOutOfRange { degree });
        }

        let mut state = RegisterState::from_bits_lsb(request.seed.bits(), degree);
        let seed_state = state.clone();

        let mut log = Vec::with_capacity(request.iterations + 1);
        let mut stream = BitStream::with_capacity(request.iterations + 1);
        log.push(state.clone());
        stream.push(state.output_bit());

        let mut period = Period::NotFound;
        // 2^degree - 1; saturated for wide registers, where no feasible
        // run can reach the bound anyway
        let max_clocks = if degree >= 64 {
            u64::MAX
        } else {
            (1u64 << degree) - 1
        };

        for clock in 1..=request.iterations as u64 {
            let mut new_bit = 0u8;
            for &tap in self.config.tap_positions() {
                new_bit ^= state.bit(tap);
            }
            state.shift_in(new_bit);

            log.push(state.clone());
            stream.push(state.output_bit());

            // first assignment wins for both sentinels
            if period == Period::NotFound {
                if state == seed_state {
                    period = Period::Found(clock);
                } else if clock > max_clocks {
                    period = Period::SubMaximal;
                }
            }
        }

        debug!(
            "generated {} bits at degree {}, period {}",
            stream.len(),
            degree,
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
