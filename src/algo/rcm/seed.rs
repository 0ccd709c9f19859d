/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Degrees, VisitedSet};
use rayon::prelude::*;

/// Returns the unvisited vertex of minimum degree, or `None` if all vertices
/// have been visited.
///
/// Ties are broken in favor of the vertex with the smallest index.
pub fn min_degree_seed(degrees: &Degrees, visited: &VisitedSet) -> Option<usize> {
    (0..degrees.len())
        .filter(|&node| !visited.is_visited(node))
        .min_by_key(|&node| (degrees[node], node))
}

/// Parallel version of [`min_degree_seed`] running on the current thread
/// pool.
///
/// The vertices are split into about `num_workers` ranges; each range yields
/// its minimum `(degree, vertex)` pair, and pairs are then reduced
/// lexicographically. Since the reduction is associative and the pairs are
/// distinct, the result is exactly the one of [`min_degree_seed`].
pub fn par_min_degree_seed(
    degrees: &Degrees,
    visited: &VisitedSet,
    num_workers: usize,
) -> Option<usize> {
    let num_nodes = degrees.len();
    (0..num_nodes)
        .into_par_iter()
        .with_min_len(num_nodes.div_ceil(num_workers.max(1)).max(1))
        .filter(|&node| !visited.is_visited(node))
        .map(|node| (degrees[node], node))
        .min()
        .map(|(_, node)| node)
}
