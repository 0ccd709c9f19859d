/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::utils::try_with_capacity;
use crate::RcmError;
use std::collections::VecDeque;
use std::sync::Mutex;

/// The queue of vertices awaiting expansion, together with the order in
/// which vertices have been dequeued.
///
/// Both live behind a single lock, so dequeuing a vertex and assigning it
/// the next position of the order is indivisible: no two workers can obtain
/// the same vertex or the same position.
pub struct Frontier {
    inner: Mutex<State>,
}

struct State {
    queue: VecDeque<usize>,
    order: Vec<usize>,
}

impl Frontier {
    /// Creates an empty frontier for a graph with `num_nodes` vertices.
    ///
    /// Both the queue and the order are allocated upfront, as no vertex is
    /// ever enqueued twice.
    pub fn new(num_nodes: usize) -> Result<Self, RcmError> {
        let mut queue = VecDeque::new();
        queue
            .try_reserve_exact(num_nodes)
            .map_err(|_| RcmError::AllocationFailure {
                what: "frontier",
                len: num_nodes,
            })?;
        Ok(Self {
            inner: Mutex::new(State {
                queue,
                order: try_with_capacity(num_nodes, "permutation")?,
            }),
        })
    }

    /// Enqueues a vertex.
    pub fn push(&self, node: usize) {
        self.inner.lock().unwrap().queue.push_back(node);
    }

    /// Returns the number of queued vertices.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }

    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of vertices dequeued so far.
    pub fn num_recorded(&self) -> usize {
        self.inner.lock().unwrap().order.len()
    }

    /// Dequeues the first vertex and appends it to the order, returning it.
    pub fn pop_and_record(&self) -> Option<usize> {
        let mut state = self.inner.lock().unwrap();
        let node = state.queue.pop_front()?;
        state.order.push(node);
        Some(node)
    }

    /// Dequeues up to `count` vertices into `batch`, in queue order, appending
    /// them to the order under a single lock acquisition. Returns the number
    /// of dequeued vertices.
    ///
    /// The batch is cleared first.
    pub fn pop_and_record_batch(&self, count: usize, batch: &mut Vec<usize>) -> usize {
        batch.clear();
        let mut state = self.inner.lock().unwrap();
        let count = count.min(state.queue.len());
        batch.extend(state.queue.drain(..count));
        state.order.extend_from_slice(batch);
        count
    }

    /// Enqueues the given batches in order, returning the new length of the
    /// queue.
    pub fn extend<'a>(&self, batches: impl IntoIterator<Item = &'a Vec<usize>>) -> usize {
        let mut state = self.inner.lock().unwrap();
        for batch in batches {
            state.queue.extend(batch.iter().copied());
        }
        state.queue.len()
    }

    /// Consumes the frontier, returning the order in which vertices have been
    /// dequeued.
    pub fn into_order(self) -> Vec<usize> {
        self.inner.into_inner().unwrap().order
    }
}
