/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::AdjMatrix;
use crate::utils::try_with_capacity;
use crate::RcmError;
use rayon::prelude::*;
use std::ops::Deref;

/// The degree of each vertex, that is, the number of nonzero entries in its
/// row of the adjacency matrix.
///
/// The table is computed once and never modified, so it can be read
/// concurrently without synchronization. It dereferences to a slice indexed
/// by vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degrees(Box<[usize]>);

impl Degrees {
    /// Computes the degrees sequentially.
    pub fn build(graph: &AdjMatrix) -> Result<Self, RcmError> {
        let num_nodes = graph.num_nodes();
        let mut degrees = try_with_capacity(num_nodes, "degree table")?;
        degrees.extend((0..num_nodes).map(|u| graph.outdegree(u)));
        Ok(Self(degrees.into_boxed_slice()))
    }

    /// Computes the degrees in parallel on the current thread pool.
    ///
    /// Rows are split into `num_workers` contiguous chunks, and each chunk is
    /// filled independently.
    pub fn par_build(graph: &AdjMatrix, num_workers: usize) -> Result<Self, RcmError> {
        let num_nodes = graph.num_nodes();
        let mut degrees = try_with_capacity(num_nodes, "degree table")?;
        degrees.resize(num_nodes, 0);
        let chunk_size = num_nodes.div_ceil(num_workers.max(1)).max(1);
        degrees
            .par_chunks_mut(chunk_size)
            .enumerate()
            .for_each(|(chunk_index, chunk)| {
                let first = chunk_index * chunk_size;
                for (offset, degree) in chunk.iter_mut().enumerate() {
                    *degree = graph.outdegree(first + offset);
                }
            });
        Ok(Self(degrees.into_boxed_slice()))
    }
}

impl Deref for Degrees {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
