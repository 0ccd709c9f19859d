/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::AdjMatrix;
use crate::RcmError;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Generates random symmetric adjacency matrices with a given sparsity.
///
/// The sparsity is the expected fraction of zero entries off the diagonal:
/// every unordered pair of distinct vertices is connected independently with
/// probability `1 - sparsity`. Loops are never included.
///
/// Generation is deterministic given the seed of the [pseudorandom number
/// generator](SmallRng).
#[derive(Debug, Clone)]
pub struct Sparse {
    n: usize,
    sparsity: f64,
    seed: u64,
}

impl Sparse {
    /// Creates a new generator, given the number of vertices, the sparsity,
    /// and a seed.
    pub fn new(n: usize, sparsity: f64, seed: u64) -> Result<Self, RcmError> {
        if n == 0 {
            return Err(RcmError::InvalidConfiguration(
                "the number of vertices must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&sparsity) {
            return Err(RcmError::InvalidConfiguration(format!(
                "the sparsity must be in [0..1], got {}",
                sparsity
            )));
        }
        Ok(Self { n, sparsity, seed })
    }

    /// Generates the matrix.
    pub fn generate(&self) -> AdjMatrix {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let p = 1.0 - self.sparsity;
        let mut matrix = AdjMatrix::new(self.n);
        for u in 0..self.n {
            for v in u + 1..self.n {
                if rng.random_bool(p) {
                    matrix.add_edge(u, v);
                }
            }
        }
        matrix
    }
}
