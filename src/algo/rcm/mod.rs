/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Reverse Cuthill-McKee ordering.
//!
//! The Cuthill-McKee heuristic relabels the vertices of an undirected graph
//! so that the nonzero entries of its adjacency matrix cluster around the
//! diagonal. Each connected component is visited in breadth-first order
//! starting from an unvisited vertex of minimum degree, and the neighbors
//! discovered from each vertex are enqueued by ascending degree. Reversing
//! the resulting order (_reverse_ Cuthill-McKee) usually reduces the
//! [bandwidth](crate::utils::bandwidth) further.
//!
//! Components are always emitted as contiguous blocks: a new seed is chosen
//! only once the queue of the current component has been drained.
//!
//! The parallel visit proceeds by waves: at each wave, as many vertices of
//! the current breadth-first level as there are workers are dequeued
//! together and expanded concurrently, and their sorted neighbor lists are
//! then enqueued in the order in which the vertices were dequeued. Since a
//! wave never spans two levels, vertices are emitted by nondecreasing
//! distance from the seed of their component. When few vertices are expanded
//! at the same time, the scan of each row is itself split among parallel
//! tasks (see [`Dispatch`]). All tasks run on a single thread pool with a
//! fixed number of threads, so nesting never oversubscribes the machine.
//!
//! The parallel order is always a valid Cuthill-McKee order, but when
//! vertices of the same wave share an unvisited neighbor, which of them
//! claims it depends on scheduling, so different runs might produce
//! different orders. The sequential order is deterministic.
//!
//! # Examples
//!
//! ```
//! use rcm::prelude::*;
//! use dsi_progress_logger::no_logging;
//!
//! // A path 0 - 3 - 1 - 2
//! let graph = AdjMatrix::from_edges(4, [(0, 3), (3, 1), (1, 2)]);
//! let order = CuthillMcKee::new(&graph)
//!     .max_workers(2)
//!     .reverse_order(no_logging![])?;
//! assert_eq!(&*order, &[2, 1, 3, 0]);
//! # Ok::<(), RcmError>(())
//! ```

mod degrees;
pub use degrees::Degrees;

mod frontier;
pub use frontier::Frontier;

mod neighbors;
pub use neighbors::*;

mod seed;
pub use seed::*;

mod visited;
pub use visited::VisitedSet;

use crate::graphs::AdjMatrix;
use crate::utils::{par_reverse, reverse, thread_pool};
use crate::RcmError;
use dsi_progress_logger::prelude::*;
use log::{debug, info};
use rayon::prelude::*;
use rayon::ThreadPool;

/// Computes (reverse) Cuthill-McKee orders of a graph.
///
/// The only parameter is the maximum number of workers, which defaults to
/// the number of CPUs. With one worker, [`order`](Self::order) and
/// [`reverse_order`](Self::reverse_order) use the sequential visit.
#[derive(Debug, Clone)]
pub struct CuthillMcKee<'a> {
    graph: &'a AdjMatrix,
    max_workers: usize,
}

impl<'a> CuthillMcKee<'a> {
    pub fn new(graph: &'a AdjMatrix) -> Self {
        Self {
            graph,
            max_workers: num_cpus::get(),
        }
    }

    /// Sets the maximum number of workers, that is, the number of threads
    /// of the pool used by the parallel visit.
    pub fn max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Returns the Cuthill-McKee order, as a map from positions to vertices.
    pub fn order(&self, pl: &mut impl ProgressLog) -> Result<Box<[usize]>, RcmError> {
        if self.max_workers == 1 {
            self.seq_order(pl)
        } else {
            self.par_order(pl)
        }
    }

    /// Returns the reverse Cuthill-McKee order, as a map from positions to
    /// vertices.
    pub fn reverse_order(&self, pl: &mut impl ProgressLog) -> Result<Box<[usize]>, RcmError> {
        if self.max_workers == 1 {
            let mut order = self.seq_order(pl)?;
            reverse(&mut order);
            Ok(order)
        } else {
            let thread_pool = thread_pool(self.max_workers)?;
            let mut order = self.par_order_with(&thread_pool, pl)?;
            thread_pool.install(|| par_reverse(&mut order));
            Ok(order)
        }
    }

    /// Returns the Cuthill-McKee order computed by a sequential visit,
    /// ignoring the maximum number of workers.
    pub fn seq_order(&self, pl: &mut impl ProgressLog) -> Result<Box<[usize]>, RcmError> {
        let num_nodes = self.num_nodes()?;
        let degrees = Degrees::build(self.graph)?;
        let visited = VisitedSet::new(num_nodes);
        let frontier = Frontier::new(num_nodes)?;
        let mut buffer = Vec::new();

        pl.item_name("vertex").expected_updates(Some(num_nodes));
        pl.start("Computing Cuthill-McKee order sequentially...");

        let mut num_components = 0;
        while let Some(seed) = min_degree_seed(&degrees, &visited) {
            num_components += 1;
            start_component(seed, num_components, &degrees, &visited, &frontier);
            while let Some(node) = frontier.pop_and_record() {
                expand(
                    self.graph,
                    &degrees,
                    &visited,
                    node,
                    Dispatch::Flat,
                    &mut buffer,
                )?;
                frontier.extend([&buffer]);
                pl.light_update();
            }
        }

        pl.done();
        Ok(finish(frontier, num_nodes, num_components))
    }

    /// Returns the Cuthill-McKee order computed by a parallel visit on a new
    /// thread pool with the maximum number of workers.
    pub fn par_order(&self, pl: &mut impl ProgressLog) -> Result<Box<[usize]>, RcmError> {
        self.par_order_with(&thread_pool(self.max_workers)?, pl)
    }

    /// Returns the Cuthill-McKee order computed by a parallel visit on the
    /// given thread pool, whose size becomes the maximum number of workers.
    pub fn par_order_with(
        &self,
        thread_pool: &ThreadPool,
        pl: &mut impl ProgressLog,
    ) -> Result<Box<[usize]>, RcmError> {
        let num_nodes = self.num_nodes()?;
        let max_workers = thread_pool.current_num_threads();

        let degrees = thread_pool.install(|| Degrees::par_build(self.graph, max_workers))?;
        let visited = VisitedSet::new(num_nodes);
        let frontier = Frontier::new(num_nodes)?;
        // the vertices of the current wave, in the order they left the queue
        let mut batch = Vec::with_capacity(max_workers);
        // one neighbor buffer per worker, reused across waves
        let mut buffers: Vec<Vec<usize>> = vec![Vec::new(); max_workers];

        pl.item_name("vertex").expected_updates(Some(num_nodes));
        pl.start(format!(
            "Computing Cuthill-McKee order with {} workers...",
            max_workers
        ));

        let mut num_components = 0;
        while let Some(seed) =
            thread_pool.install(|| par_min_degree_seed(&degrees, &visited, max_workers))
        {
            num_components += 1;
            start_component(seed, num_components, &degrees, &visited, &frontier);

            // a wave never mixes vertices of different levels
            let mut curr_level = 1;
            let mut next_level = 0;
            while curr_level > 0 {
                let active_workers =
                    frontier.pop_and_record_batch(curr_level.min(max_workers), &mut batch);
                assert!(
                    active_workers > 0,
                    "The frontier is empty, but {} vertices of the current level are missing",
                    curr_level
                );
                let dispatch = Dispatch::new(active_workers, max_workers);
                thread_pool.install(|| {
                    buffers[..active_workers]
                        .par_iter_mut()
                        .zip(batch.par_iter())
                        .try_for_each(|(buffer, &node)| {
                            expand(self.graph, &degrees, &visited, node, dispatch, buffer)
                        })
                })?;
                // all workers of the wave have joined: merge in dequeue order
                frontier.extend(&buffers[..active_workers]);
                next_level += buffers[..active_workers].iter().map(Vec::len).sum::<usize>();
                pl.update_with_count(active_workers);

                curr_level -= active_workers;
                if curr_level == 0 {
                    curr_level = next_level;
                    next_level = 0;
                }
            }
        }

        pl.done();
        Ok(finish(frontier, num_nodes, num_components))
    }

    fn num_nodes(&self) -> Result<usize, RcmError> {
        match self.graph.num_nodes() {
            0 => Err(RcmError::InvalidConfiguration(
                "the graph has no vertices".into(),
            )),
            n => Ok(n),
        }
    }
}

/// Claims the seed of a new component and enqueues it.
fn start_component(
    seed: usize,
    component: usize,
    degrees: &Degrees,
    visited: &VisitedSet,
    frontier: &Frontier,
) {
    debug_assert!(frontier.is_empty());
    let claimed = visited.claim(seed);
    debug_assert!(claimed, "Seed {} has already been visited", seed);
    frontier.push(seed);
    debug!(
        "Component {} starts at vertex {} of degree {}",
        component, seed, degrees[seed]
    );
}

fn finish(frontier: Frontier, num_nodes: usize, num_components: usize) -> Box<[usize]> {
    let num_recorded = frontier.num_recorded();
    assert_eq!(
        num_recorded, num_nodes,
        "The visit emitted {} vertices out of {}",
        num_recorded, num_nodes
    );
    let order = frontier.into_order();
    info!("Visited {} connected components", num_components);
    order.into_boxed_slice()
}

/// Returns the Cuthill-McKee order of `graph` using at most `max_workers`
/// workers.
pub fn cuthill_mckee(
    graph: &AdjMatrix,
    max_workers: usize,
    pl: &mut impl ProgressLog,
) -> Result<Box<[usize]>, RcmError> {
    CuthillMcKee::new(graph).max_workers(max_workers).order(pl)
}

/// Returns the reverse Cuthill-McKee order of `graph` using at most
/// `max_workers` workers.
pub fn reverse_cuthill_mckee(
    graph: &AdjMatrix,
    max_workers: usize,
    pl: &mut impl ProgressLog,
) -> Result<Box<[usize]>, RcmError> {
    CuthillMcKee::new(graph)
        .max_workers(max_workers)
        .reverse_order(pl)
}
