//! LFSR simulation and GF(2) tap recovery
//!
//! Forward mode drives an [`LfsrEngine`] to produce a bit stream and state
//! log; inverse mode feeds an observed stream through [`Gf2Solver`] or
//! [`DegreeSearch`] to reconstruct the register that could have produced
//! it, and [`Validator`]/[`IterValidator`] score a reconstruction by
//! regenerating its stream and comparing bit-for-bit.

pub mod analysis;
pub mod bitstream;
pub mod cascade;
pub mod engine;
pub mod error;
pub mod gf2;
pub mod register;
pub mod search;
pub mod solver;
pub mod validate;

pub use bitstream::BitStream;
pub use cascade::MultiLfsr;
pub use engine::{LfsrEngine, Period, RunRequest, RunState, Seed};
pub use error::{LfsrError, Result};
pub use gf2::Gf2Matrix;
pub use register::{RegisterConfig, RegisterState};
pub use search::{DegreeSearch, SearchOutcome};
pub use solver::{Gf2Solver, Solution, MIN_DEGREE};
pub use validate::{IterValidator, ValidationResult, Validator};
