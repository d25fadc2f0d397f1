//! GF(2) matrix arithmetic
//!
//! ## Overview
//!
//! Exact linear algebra over the two-element field: addition is XOR,
//! multiplication is AND. Rows are bit-packed into u64 limbs so row
//! elimination is a handful of word XORs rather than per-element work.
//!
//! Inversion is Gauss-Jordan elimination against an augmented identity,
//! with pivot search and row swaps. In GF(2) every nonzero pivot is 1, so
//! the pivot-scaling step of the general algorithm vanishes. A column with
//! no available pivot means the matrix is singular and no inverse exists.

use log::trace;

/// Square bit matrix over GF(2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gf2Matrix {
    size: usize,
    rows: Vec<Vec<u64>>,
}

impl Gf2Matrix {
    /// Create a zero matrix
    pub fn new(size: usize) -> Self {
        let limbs = size.div_ceil(64).max(1);
        Self {
            size,
            rows: vec![vec![0u64; limbs]; size],
        }
    }

    /// Create an identity matrix
    pub fn identity(size: usize) -> Self {
        let mut matrix = Self::new(size);
        for i in 0..size {
            matrix.set(i, i, 1);
        }
        matrix
    }

    /// Matrix dimension
    pub fn size(&self) -> usize {
        self.size
    }

    /// Element at (row, col)
    pub fn get(&self, row: usize, col: usize) -> u8 {
        ((self.rows[row][col / 64] >> (col % 64)) & 1) as u8
    }

    /// Set element at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        let mask = 1u64 << (col % 64);
        if value != 0 {
            self.rows[row][col / 64] |= mask;
        } else {
            self.rows[row][col / 64] &= !mask;
        }
    }

    /// XOR row `source` into row `target` (GF(2) row addition)
    fn xor_rows(rows: &mut [Vec<u64>], target: usize, source: usize) {
        // split_at_mut keeps the borrows disjoint whichever side is higher
        let (lo, hi) = rows.split_at_mut(target.max(source));
        let (dst, src) = if target < source {
            (&mut lo[target], &hi[0])
        } else {
            (&mut hi[0], &lo[source])
        };
        for (d, s) in dst.iter_mut().zip(src.iter()) {
            *d ^= *s;
        }
    }

    /// Invert over GF(2); `None` when the matrix is singular
    pub fn invert(&self) -> Option<Gf2Matrix> {
        let size = self.size;
        let mut work = self.clone();
        let mut inverse = Gf2Matrix::identity(size);

        for pivot_col in 0..size {
            // Find a pivot at or below the diagonal
            let pivot_row = (pivot_col..size).find(|&row| work.get(row, pivot_col) == 1)?;
            if pivot_row != pivot_col {
                work.rows.swap(pivot_row, pivot_col);
                inverse.rows.swap(pivot_row, pivot_col);
            }

            // Eliminate the column everywhere else
            for row in 0..size {
                if row != pivot_col && work.get(row, pivot_col) == 1 {
                    Self::xor_rows(&mut work.rows, row, pivot_col);
                    Self::xor_rows(&mut inverse.rows, row, pivot_col);
                }
            }
            trace!("eliminated column {} of {}", pivot_col + 1, size);
        }

        Some(inverse)
    }

    /// Matrix-vector product mod 2
    ///
    /// `vector` holds `{0,1}` values; the result bit for each row is the
    /// parity of the AND of the row with the vector.
    pub fn mul_vec(&self, vector: &[u8]) -> Vec<u8> {
        let limbs = self.size.div_ceil(64).max(1);
        let mut packed = vec![0u64; limbs];
        for (index, &bit) in vector.iter().enumerate() {
            if bit != 0 {
                packed[index / 64] |= 1u64 << (index % 64);
            }
        }

        self.rows
            .iter()
            .map(|row| {
                let ones: u32 = row
                    .iter()
                    .zip(packed.iter())
                    .map(|(r, v)| (r & v).count_ones())
                    .sum();
                (ones % 2) as u8
            })
            .collect()
    }
}
