//! LFSR engine tests
//!
//! Covers the golden reference trace, the stream/log length invariants,
//! period detection and its sub-maximal sentinel, and configuration
//! validation at construction.

use lfsrs::{LfsrEngine, Period, RegisterConfig, RunRequest, Seed};

fn run(degree: usize, taps: &[i64], seed: u128, iterations: usize) -> lfsrs::RunState {
    let engine = LfsrEngine::with_taps(degree, taps).expect("valid configuration");
    engine
        .generate(&RunRequest::new(Seed::from_value(seed), iterations))
        .expect("valid run")
}

// ============================================================================
// Golden Reference Trace
// ============================================================================

#[test]
fn test_golden_trace_degree_5() {
    // degree 5, taps {1,3}, seed 0b11010, 20 iterations
    let result = run(5, &[1, 3], 0b11010, 20);

    assert_eq!(result.stream.to_string(), "010110110110110110110");

    let expected_log = [
        "11010", "01101", "10110", "11011", "01101", "10110", "11011", "01101", "10110", "11011",
        "01101", "10110", "11011", "01101", "10110", "11011", "01101", "10110", "11011", "01101",
        "10110",
    ];
    let logged: Vec<String> = result.log.iter().map(|state| state.to_string()).collect();
    assert_eq!(logged, expected_log);

    // the state falls into a 3-cycle that excludes the seed
    assert_eq!(result.period, Period::NotFound);
}

#[test]
fn test_golden_trace_feedback_polynomial() {
    let engine = LfsrEngine::with_taps(5, &[1, 3]).unwrap();
    assert_eq!(
        engine.config().feedback_polynomial(),
        "X^0 + X^1 + X^3 + X^5"
    );
}

// ============================================================================
// Determinism and Length Invariants
// ============================================================================

#[test]
fn test_generate_is_deterministic() {
    let first = run(5, &[1, 3], 0b11010, 50);
    let second = run(5, &[1, 3], 0b11010, 50);

    assert_eq!(first.stream, second.stream);
    assert_eq!(first.log, second.log);
    assert_eq!(first.period, second.period);
}

#[test]
fn test_stream_and_log_lengths() {
    for iterations in [0, 1, 7, 31, 100] {
        let result = run(4, &[0, 1], 0b1001, iterations);
        assert_eq!(result.stream.len(), iterations + 1);
        assert_eq!(result.log.len(), iterations + 1);
    }
}

#[test]
fn test_first_stream_bit_is_seed_lsb() {
    assert_eq!(run(4, &[0, 1], 0b1001, 0).stream.to_string(), "1");
    assert_eq!(run(4, &[0, 1], 0b1000, 0).stream.to_string(), "0");
}

// ============================================================================
// Period Detection
// ============================================================================

#[test]
fn test_maximal_period_degree_4() {
    // x^4 + x + 1 is primitive: all 15 nonzero states before recurrence
    let result = run(4, &[0, 1], 0b1001, 20);
    assert_eq!(result.period, Period::Found(15));
    assert_eq!(result.stream.to_string(), "100110101111000100110");
}

#[test]
fn test_maximal_period_degree_5() {
    // x^5 + x^2 + 1 is primitive
    let result = run(5, &[0, 2], 1, 40);
    assert_eq!(result.period, Period::Found(31));
}

#[test]
fn test_period_not_found_when_run_too_short() {
    let result = run(5, &[0, 2], 1, 20);
    assert_eq!(result.period, Period::NotFound);
}

#[test]
fn test_sub_maximal_sentinel() {
    // taps {1,3} at degree 5 trap the seed outside a 3-cycle; past
    // 2^5 - 1 clocks the recurrence can no longer happen
    let result = run(5, &[1, 3], 0b11010, 40);
    assert_eq!(result.period, Period::SubMaximal);
}

#[test]
fn test_sub_maximal_does_not_overwrite_found_period() {
    // period 15 recurs long before the 2^4 - 1 bound is passed
    let result = run(4, &[0, 1], 0b1001, 100);
    assert_eq!(result.period, Period::Found(15));
}

#[test]
fn test_zero_seed_recurs_immediately() {
    // the all-zero state is a fixed point of any tap configuration
    let result = run(4, &[0, 1], 0, 5);
    assert_eq!(result.period, Period::Found(1));
    assert_eq!(result.stream.to_string(), "000000");
}

#[test]
fn test_period_display_sentinels() {
    assert_eq!(Period::NotFound.to_string(), "not found");
    assert_eq!(Period::SubMaximal.to_string(), "sub-maximal");
    assert_eq!(Period::Found(15).to_string(), "15");
}

// ============================================================================
// Configuration Validation
// ============================================================================

#[test]
fn test_tap_position_bounds() {
    assert!(RegisterConfig::new(5, &[0, 4]).is_ok());
    assert!(RegisterConfig::new(5, &[-4]).is_ok());
    assert!(RegisterConfig::new(5, &[5]).is_err());
    assert!(RegisterConfig::new(5, &[-5]).is_err());
    assert!(RegisterConfig::new(5, &[1, 3, 17]).is_err());
}

#[test]
fn test_negative_taps_alias_top_bits() {
    // -1 reads the register's top bit, same as degree - 1
    let negative = run(5, &[-1, 1], 0b10011, 16);
    let positive = run(5, &[4, 1], 0b10011, 16);
    assert_eq!(negative.stream, positive.stream);
}

#[test]
fn test_seed_must_fit_register() {
    let engine = LfsrEngine::with_taps(5, &[1, 3]).unwrap();
    let request = RunRequest::new(Seed::from_value(1 << 5), 4);
    assert!(engine.generate(&request).is_err());
}

// ============================================================================
// Wide Registers
// ============================================================================

#[test]
fn test_wide_register_runs() {
    // degree beyond one machine word; the sentinel bound saturates
    let result = run(80, &[0, 9, 70], 0xDEAD_BEEF_CAFE, 200);
    assert_eq!(result.stream.len(), 201);
    assert_eq!(result.log[0].to_string().len(), 80);
    assert_eq!(result.period, Period::NotFound);
}
