/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::sync::atomic::Ordering;
use sux::bits::AtomicBitVec;

/// The set of visited vertices, shared by all workers.
///
/// A vertex becomes visited exactly once: [`claim`](Self::claim) performs the
/// transition with an atomic swap, so among concurrent callers on the same
/// vertex exactly one sees it succeed.
pub struct VisitedSet {
    visited: AtomicBitVec,
}

impl VisitedSet {
    /// Creates a set of `num_nodes` unvisited vertices.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            visited: AtomicBitVec::new(num_nodes),
        }
    }

    /// Returns whether `node` has been claimed.
    #[inline(always)]
    pub fn is_visited(&self, node: usize) -> bool {
        self.visited.get(node, Ordering::Relaxed)
    }

    /// Marks `node` as visited, returning true if this call performed the
    /// transition and false if `node` was already visited.
    #[inline(always)]
    pub fn claim(&self, node: usize) -> bool {
        // no read-modify-write on vertices already taken
        !self.is_visited(node) && !self.visited.swap(node, true, Ordering::Relaxed)
    }
}
