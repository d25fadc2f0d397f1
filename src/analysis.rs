//! Stream statistics and number extraction
//!
//! Consumers of a run's output: bit-frequency and Laplace-succession
//! estimates, the running ones-probability curve behind randomness plots,
//! and the pseudo-random-number extractor. Everything here reads only the
//! stream; nothing reaches into engine internals.

use crate::bitstream::BitStream;
use crate::error::{LfsrError, Result};
use std::ops::Range;

/// Bit-frequency summary of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomnessReport {
    pub length: usize,
    pub zeros: usize,
    pub ones: usize,
}

impl RandomnessReport {
    /// Relative frequency of the given bit value, in `[0, 1]`
    pub fn frequency(&self, bit: u8) -> f64 {
        let count = if bit == 0 { self.zeros } else { self.ones };
        count as f64 / self.length as f64
    }

    /// Laplace rule-of-succession estimate, `(count + 1) / (length + 2)`
    pub fn laplace_succession(&self, bit: u8) -> f64 {
        let count = if bit == 0 { self.zeros } else { self.ones };
        (count + 1) as f64 / (self.length + 2) as f64
    }
}

/// Count bit frequencies over a stream
pub fn randomness(stream: &BitStream) -> Result<RandomnessReport> {
    if stream.is_empty() {
        return Err(LfsrError::StreamTooShort { length: 0 });
    }
    let ones = stream.ones_count();
    Ok(RandomnessReport {
        length: stream.len(),
        zeros: stream.len() - ones,
        ones,
    })
}

/// Running probability that a bit is 1, one point per stream prefix
///
/// Point `k` is the ones fraction of the first `k + 1` bits. This is the
/// data series behind a randomness plot; rendering is up to the caller.
pub fn ones_probability_curve(stream: &BitStream) -> Vec<f64> {
    let mut curve = Vec::with_capacity(stream.len());
    let mut ones = 0usize;
    for (index, bit) in stream.iter().enumerate() {
        ones += bit as usize;
        curve.push(ones as f64 / (index + 1) as f64);
    }
    curve
}

/// Reduce a stream, read as a binary integer, into the caller's range
///
/// The accumulation happens mod the range span, so arbitrarily long
/// streams never overflow.
pub fn extract_number(stream: &BitStream, range: Range<u64>) -> Result<u64> {
    if range.end <= range.start {
        return Err(LfsrError::EmptyRange);
    }
    if stream.is_empty() {
        return Err(LfsrError::StreamTooShort { length: 0 });
    }
    let span = (range.end - range.start) as u128;
    let mut acc: u128 = 0;
    for bit in stream.iter() {
        acc = (acc * 2 + bit as u128) % span;
    }
    Ok(acc as u64 + range.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randomness_counts() {
        let stream: BitStream = "110100".parse().unwrap();
        let report = randomness(&stream).unwrap();
        assert_eq!(report.ones, 3);
        assert_eq!(report.zeros, 3);
        assert_eq!(report.frequency(1), 0.5);
        // Laplace succession: (3 + 1) / (6 + 2)
        assert_eq!(report.laplace_succession(0), 0.5);
    }

    #[test]
    fn test_randomness_rejects_empty_stream() {
        let stream = BitStream::new();
        assert_eq!(
            randomness(&stream).unwrap_err(),
            LfsrError::StreamTooShort { length: 0 }
        );
    }

    #[test]
    fn test_ones_probability_curve() {
        let stream: BitStream = "1011".parse().unwrap();
        let curve = ones_probability_curve(&stream);
        assert_eq!(curve, vec![1.0, 0.5, 2.0 / 3.0, 0.75]);
    }

    #[test]
    fn test_extract_number() {
        // 0b1101 = 13; 13 % (999 - 100) + 100
        let stream: BitStream = "1101".parse().unwrap();
        assert_eq!(extract_number(&stream, 100..999).unwrap(), 113);
        // single-value range always yields the start
        assert_eq!(extract_number(&stream, 7..8).unwrap(), 7);
    }

    #[test]
    fn test_extract_number_empty_range() {
        let stream: BitStream = "101".parse().unwrap();
        assert_eq!(
            extract_number(&stream, 5..5).unwrap_err(),
            LfsrError::EmptyRange
        );
    }
}
