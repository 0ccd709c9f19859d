/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Degrees, VisitedSet};
use crate::graphs::AdjMatrix;
use crate::RcmError;
use rayon::prelude::*;

/// How the row of a dequeued vertex is scanned during a wave.
///
/// When many vertices are expanded at the same time there is already enough
/// top-level parallelism, and each row is scanned by a single task. Otherwise,
/// the spare capacity is split among the active workers, and each row is
/// scanned in parallel in as many chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Each row is scanned by a single task.
    Flat,
    /// Each row is scanned by `inner_workers` parallel tasks.
    Nested { inner_workers: usize },
}

impl Dispatch {
    /// Chooses how to scan rows when `active_workers` vertices are expanded
    /// concurrently out of a budget of `max_workers`.
    pub fn new(active_workers: usize, max_workers: usize) -> Self {
        debug_assert!(active_workers > 0);
        if active_workers > max_workers / 2 {
            Self::Flat
        } else {
            Self::Nested {
                inner_workers: (max_workers - active_workers) / active_workers + 1,
            }
        }
    }
}

/// Collects in `buffer` the unvisited neighbors of `node`, claiming them, and
/// sorts them by ascending degree.
///
/// Neighbors are claimed as soon as they are discovered: if several workers
/// see the same unvisited vertex, exactly one of them collects it. Before
/// sorting, neighbors are in increasing index order, and the sort is stable,
/// so ties in degree are broken by index.
///
/// The buffer is cleared first; its capacity is reused across calls.
pub fn expand(
    graph: &AdjMatrix,
    degrees: &Degrees,
    visited: &VisitedSet,
    node: usize,
    dispatch: Dispatch,
    buffer: &mut Vec<usize>,
) -> Result<(), RcmError> {
    buffer.clear();
    // the degree bounds the number of neighbors we can discover
    buffer
        .try_reserve(degrees[node])
        .map_err(|_| RcmError::AllocationFailure {
            what: "neighbor buffer",
            len: degrees[node],
        })?;
    collect_neighbors(graph, visited, node, dispatch, buffer);
    sort_by_degree(buffer, degrees);
    Ok(())
}

/// Appends to `buffer`, in increasing order, the neighbors of `node` that
/// this call claimed.
pub fn collect_neighbors(
    graph: &AdjMatrix,
    visited: &VisitedSet,
    node: usize,
    dispatch: Dispatch,
    buffer: &mut Vec<usize>,
) {
    let num_nodes = graph.num_nodes();
    let discover = |succ: &usize| {
        let succ = *succ;
        succ != node && graph.has_arc(node, succ) && visited.claim(succ)
    };
    match dispatch {
        Dispatch::Flat => buffer.extend((0..num_nodes).filter(discover)),
        Dispatch::Nested { inner_workers } => buffer.par_extend(
            (0..num_nodes)
                .into_par_iter()
                .with_min_len((num_nodes / inner_workers).max(1))
                .filter(discover),
        ),
    }
}

/// Stably sorts vertices by ascending degree.
#[inline(always)]
pub fn sort_by_degree(nodes: &mut [usize], degrees: &Degrees) {
    nodes.sort_by_key(|&node| degrees[node]);
}
