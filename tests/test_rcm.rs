/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::no_logging;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rcm::prelude::*;
use std::collections::VecDeque;

/// A plain Cuthill-McKee visit used as a reference.
fn reference_order(graph: &AdjMatrix) -> Vec<usize> {
    let n = graph.num_nodes();
    let degrees = (0..n).map(|u| graph.outdegree(u)).collect::<Vec<_>>();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut queue = VecDeque::new();
    while order.len() < n {
        let seed = (0..n)
            .filter(|&u| !visited[u])
            .min_by_key(|&u| (degrees[u], u))
            .unwrap();
        visited[seed] = true;
        queue.push_back(seed);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            let mut succ = graph
                .successors(node)
                .filter(|&v| !visited[v])
                .collect::<Vec<_>>();
            for &v in &succ {
                visited[v] = true;
            }
            succ.sort_by_key(|&v| degrees[v]);
            queue.extend(succ);
        }
    }
    order
}

/// Returns the connected component of each vertex.
fn components(graph: &AdjMatrix) -> Vec<usize> {
    let n = graph.num_nodes();
    let mut comp = vec![usize::MAX; n];
    let mut num_comps = 0;
    for start in 0..n {
        if comp[start] != usize::MAX {
            continue;
        }
        comp[start] = num_comps;
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            for succ in graph.successors(node) {
                if comp[succ] == usize::MAX {
                    comp[succ] = num_comps;
                    stack.push(succ);
                }
            }
        }
        num_comps += 1;
    }
    comp
}

/// Returns the breadth-first distance of each vertex from `seed`, or
/// `usize::MAX` for vertices in other components.
fn distances(graph: &AdjMatrix, seed: usize) -> Vec<usize> {
    let mut dist = vec![usize::MAX; graph.num_nodes()];
    dist[seed] = 0;
    let mut queue = VecDeque::from([seed]);
    while let Some(node) = queue.pop_front() {
        for succ in graph.successors(node) {
            if dist[succ] == usize::MAX {
                dist[succ] = dist[node] + 1;
                queue.push_back(succ);
            }
        }
    }
    dist
}

/// Checks that `order` is a permutation in which each component is a
/// contiguous block in breadth-first order, starting at a vertex of minimum
/// degree.
fn check_cm_order(graph: &AdjMatrix, order: &[usize]) {
    assert_eq!(order.len(), graph.num_nodes());
    assert_eq!(check_permutation(order), Ok(()));

    let comp = components(graph);
    let mut done = vec![false; graph.num_nodes()];
    let mut i = 0;
    while i < order.len() {
        let c = comp[order[i]];
        assert!(!done[c], "component {} is split", c);
        done[c] = true;
        let min_degree = (0..graph.num_nodes())
            .filter(|&u| comp[u] == c)
            .map(|u| graph.outdegree(u))
            .min()
            .unwrap();
        assert_eq!(
            graph.outdegree(order[i]),
            min_degree,
            "the block of component {} does not start at a vertex of minimum degree",
            c
        );
        let dist = distances(graph, order[i]);
        let mut seen = vec![false; graph.num_nodes()];
        seen[order[i]] = true;
        i += 1;
        while i < order.len() && comp[order[i]] == c {
            let node = order[i];
            assert!(
                dist[node] >= dist[order[i - 1]],
                "vertex {} at distance {} follows vertex {} at distance {}",
                node,
                dist[node],
                order[i - 1],
                dist[order[i - 1]]
            );
            assert!(
                graph.successors(node).any(|succ| seen[succ]),
                "vertex {} has no neighbor earlier in its block",
                node
            );
            seen[node] = true;
            i += 1;
        }
    }
}

#[test]
fn test_single_vertex() -> Result<()> {
    let graph = AdjMatrix::new(1);
    for max_workers in [1, 2, 4] {
        assert_eq!(&*reverse_cuthill_mckee(&graph, max_workers, no_logging![])?, &[0]);
    }
    Ok(())
}

#[test]
fn test_two_components() -> Result<()> {
    // A path 0 - 2 - 4 and an edge 1 - 3
    let graph = AdjMatrix::from_edges(5, [(0, 2), (2, 4), (1, 3)]);
    let order = CuthillMcKee::new(&graph).seq_order(no_logging![])?;
    assert_eq!(&*order, &[0, 2, 4, 1, 3]);
    let rev = reverse_cuthill_mckee(&graph, 1, no_logging![])?;
    assert_eq!(&*rev, &[3, 1, 4, 2, 0]);

    for max_workers in [2, 4, 8] {
        let order = cuthill_mckee(&graph, max_workers, no_logging![])?;
        // every wave holds a single vertex
        assert_eq!(&*order, &[0, 2, 4, 1, 3]);
    }
    Ok(())
}

#[test]
fn test_star_with_tails() -> Result<()> {
    // 6 is the center; 0, 1 and 2 hang from it with tails of different
    // lengths: 0 - 3 - 4 - 5, 1 - 7, 2
    let graph = AdjMatrix::from_edges(
        8,
        [(6, 0), (6, 1), (6, 2), (0, 3), (3, 4), (4, 5), (1, 7)],
    );
    // the seed is 2 (degree 1, lowest index among 2, 5, 7)
    let order = CuthillMcKee::new(&graph).seq_order(no_logging![])?;
    assert_eq!(&*order, &[2, 6, 0, 1, 3, 7, 4, 5]);
    assert_eq!(&*order, &reference_order(&graph)[..]);
    Ok(())
}

#[test]
fn test_full_mesh() -> Result<()> {
    let n = 40;
    let graph = AdjMatrix::from_edges(n, (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v))));
    // all degrees are equal, so ties are broken by index
    let order = CuthillMcKee::new(&graph).seq_order(no_logging![])?;
    assert_eq!(&*order, &(0..n).collect::<Vec<_>>()[..]);

    assert_eq!(bandwidth(&graph), n - 1);

    for max_workers in [1, 2, 4, 8] {
        let rev = reverse_cuthill_mckee(&graph, max_workers, no_logging![])?;
        let mut back = rev.to_vec();
        reverse(&mut back);
        check_cm_order(&graph, &back);
        // the seed always comes first
        assert_eq!(back[0], 0);
    }
    Ok(())
}

#[test]
fn test_seq_matches_reference() -> Result<()> {
    for (n, sparsity, seed) in [(10, 0.7, 0), (60, 0.95, 1), (100, 0.98, 2), (150, 0.6, 3)] {
        let graph = Sparse::new(n, sparsity, seed)?.generate();
        let expected = reference_order(&graph);
        let order = CuthillMcKee::new(&graph).seq_order(no_logging![])?;
        assert_eq!(&*order, &expected[..]);
        // a single worker gives the same visit as the sequential one
        let par = CuthillMcKee::new(&graph)
            .max_workers(1)
            .par_order(no_logging![])?;
        assert_eq!(&*par, &expected[..]);
    }
    Ok(())
}

#[test]
fn test_seq_determinism() -> Result<()> {
    let graph = Sparse::new(200, 0.97, 7)?.generate();
    let first = reverse_cuthill_mckee(&graph, 1, no_logging![])?;
    let second = reverse_cuthill_mckee(&graph, 1, no_logging![])?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_reverse_involution() -> Result<()> {
    let graph = Sparse::new(101, 0.9, 11)?.generate();
    let order = CuthillMcKee::new(&graph).seq_order(no_logging![])?;
    let mut rev = order.clone();
    par_reverse(&mut rev);
    assert_eq!(rev[0], order[100]);
    assert_eq!(rev[50], order[50]);
    par_reverse(&mut rev);
    assert_eq!(rev, order);
    Ok(())
}

#[test]
fn test_par_degrees() -> Result<()> {
    let graph = Sparse::new(333, 0.8, 5)?.generate();
    let seq = Degrees::build(&graph)?;
    for num_workers in [1, 2, 4, 8] {
        let par = thread_pool(num_workers)?.install(|| Degrees::par_build(&graph, num_workers))?;
        assert_eq!(par, seq);
    }
    Ok(())
}

#[test]
fn test_concurrency_stress() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    // from many tiny components to a single dense one
    for (n, sparsity) in [(300, 0.999), (300, 0.99), (300, 0.95), (300, 0.6), (64, 0.0)] {
        for seed in 0..3 {
            let graph = Sparse::new(n, sparsity, seed)?.generate();
            for max_workers in [1, 2, 4, 8] {
                for _ in 0..3 {
                    let order = cuthill_mckee(&graph, max_workers, no_logging![])?;
                    check_cm_order(&graph, &order);
                    let rev = reverse_cuthill_mckee(&graph, max_workers, no_logging![])?;
                    assert_eq!(check_permutation(&rev), Ok(()));
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_par_levels() -> Result<()> {
    // sparse graphs with long levels, where waves would otherwise straddle
    // two levels
    for (n, sparsity) in [(300, 0.99), (400, 0.993), (500, 0.995)] {
        for seed in 0..4 {
            let graph = Sparse::new(n, sparsity, seed)?.generate();
            for max_workers in [2, 3, 4, 8, 16] {
                let order = cuthill_mckee(&graph, max_workers, no_logging![])?;
                check_cm_order(&graph, &order);
            }
        }
    }
    Ok(())
}

#[test]
fn test_par_trees_match_seq() -> Result<()> {
    // in a forest no two vertices compete for a neighbor, so the parallel
    // visit must reproduce the sequential one exactly
    let mut rng = SmallRng::seed_from_u64(0);
    for n in [50, 200, 500] {
        let mut edges = vec![];
        for v in 1..n {
            // a few vertices start new trees
            if rng.random_bool(0.95) {
                edges.push((rng.random_range(0..v), v));
            }
        }
        let graph = AdjMatrix::from_edges(n, edges);
        let seq = CuthillMcKee::new(&graph).seq_order(no_logging![])?;
        for max_workers in [2, 3, 4, 8] {
            for _ in 0..3 {
                let par = cuthill_mckee(&graph, max_workers, no_logging![])?;
                assert_eq!(par, seq, "max_workers = {}", max_workers);
            }
        }
    }
    Ok(())
}

#[test]
fn test_bandwidth_reduction() -> Result<()> {
    // a path whose vertices are labeled far apart
    let n = 64;
    let labels = (0..n).map(|i| (i * 29) % n).collect::<Vec<_>>();
    let graph = AdjMatrix::from_edges(n, labels.windows(2).map(|w| (w[0], w[1])));
    assert!(bandwidth(&graph) > 1);
    for max_workers in [1, 4] {
        let rev = reverse_cuthill_mckee(&graph, max_workers, no_logging![])?;
        assert_eq!(permuted_bandwidth(&graph, &rev), 1);
    }
    Ok(())
}

#[cfg_attr(not(feature = "slow_tests"), ignore)]
#[test]
fn test_large() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let graph = Sparse::new(2000, 0.999, 0)?.generate();
    let expected = reference_order(&graph);
    let order = CuthillMcKee::new(&graph).seq_order(no_logging![])?;
    assert_eq!(&*order, &expected[..]);
    for max_workers in [2, 4, 8, 16] {
        let order = cuthill_mckee(&graph, max_workers, no_logging![])?;
        check_cm_order(&graph, &order);
    }
    Ok(())
}
