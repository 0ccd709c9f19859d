/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::AdjMatrix;
use rayon::prelude::*;

/// Returns the bandwidth of the matrix, that is, the maximum distance
/// `|u - v|` over the nonzero off-diagonal entries `(u, v)`.
///
/// A matrix without off-diagonal entries has bandwidth zero.
pub fn bandwidth(graph: &AdjMatrix) -> usize {
    (0..graph.num_nodes())
        .into_par_iter()
        .map(|u| {
            graph
                .successors(u)
                .map(|v| u.abs_diff(v))
                .max()
                .unwrap_or(0)
        })
        .max()
        .unwrap_or(0)
}

/// Returns the bandwidth of the matrix whose row and column `i` are row and
/// column `order[i]` of `graph`.
///
/// # Panics
///
/// If `order` is not a permutation of the vertices of `graph`.
pub fn permuted_bandwidth(graph: &AdjMatrix, order: &[usize]) -> usize {
    assert_eq!(
        order.len(),
        graph.num_nodes(),
        "The permutation has {} elements, but the matrix has {} rows",
        order.len(),
        graph.num_nodes()
    );
    let position = super::invert_permutation(order)
        .unwrap_or_else(|x| panic!("Element {} appears twice or is out of range", x));
    (0..graph.num_nodes())
        .into_par_iter()
        .map(|u| {
            graph
                .successors(u)
                .map(|v| position[u].abs_diff(position[v]))
                .max()
                .unwrap_or(0)
        })
        .max()
        .unwrap_or(0)
}
