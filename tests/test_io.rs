/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::no_logging;
use rcm::prelude::*;

#[test]
fn test_perm_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("perm.txt");
    let perm = [3, 0, 4, 1, 2];
    store_perm(&perm, &path)?;
    assert_eq!(std::fs::read_to_string(&path)?, "3\n0\n4\n1\n2\n");
    assert_eq!(&*load_perm(&path)?, &perm);

    std::fs::write(&path, "1\n1\n")?;
    assert!(load_perm(&path).is_err());
    std::fs::write(&path, "0\nfoo\n")?;
    assert!(load_perm(&path).is_err());
    Ok(())
}

#[test]
fn test_reordered_matrix() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let src = dir.path().join("matrix.txt");
    let dst = dir.path().join("reordered.txt");

    Sparse::new(80, 0.95, 42)?.generate().store_ascii(&src)?;
    let graph = AdjMatrix::load_ascii(&src)?;
    let perm = reverse_cuthill_mckee(&graph, 4, no_logging![])?;
    store_reordered(&graph, &perm, &dst)?;

    let reordered = AdjMatrix::load_ascii(&dst)?;
    assert_eq!(reordered.num_nodes(), graph.num_nodes());
    assert_eq!(reordered.num_arcs(), graph.num_arcs());
    for i in 0..perm.len() {
        for j in 0..perm.len() {
            assert_eq!(reordered.has_arc(i, j), graph.has_arc(perm[i], perm[j]));
        }
    }
    assert_eq!(bandwidth(&reordered), permuted_bandwidth(&graph, &perm));
    Ok(())
}

#[test]
fn test_load_errors() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("bad.txt");

    assert!(AdjMatrix::load_ascii(dir.path().join("missing.txt")).is_err());

    std::fs::write(&path, "0 1\n0 0\n")?;
    let err = AdjMatrix::load_ascii(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RcmError>(),
        Some(RcmError::Asymmetric { row: 0, col: 1 })
    ));

    std::fs::write(&path, "0 1 0\n1 0\n")?;
    let err = AdjMatrix::load_ascii(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RcmError>(),
        Some(RcmError::MalformedMatrix { line: 1, .. })
    ));
    Ok(())
}

#[cfg(feature = "cli")]
#[test]
fn test_cli() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let matrix = dir.path().join("matrix.txt");
    let perm = dir.path().join("out").join("perm.txt");
    let reordered = dir.path().join("out").join("reordered.txt");

    rcm::cli::main([
        "rcm",
        "gen",
        "50",
        matrix.to_str().unwrap(),
        "--sparsity",
        "0.9",
        "--seed",
        "1",
    ])?;
    rcm::cli::main([
        "rcm",
        "order",
        perm.to_str().unwrap(),
        "--input",
        matrix.to_str().unwrap(),
        "--reordered",
        reordered.to_str().unwrap(),
        "-j",
        "2",
    ])?;

    let graph = AdjMatrix::load_ascii(&matrix)?;
    let order = load_perm(&perm)?;
    assert_eq!(order.len(), 50);
    let reordered = AdjMatrix::load_ascii(&reordered)?;
    assert_eq!(bandwidth(&reordered), permuted_bandwidth(&graph, &order));

    rcm::cli::main([
        "rcm",
        "order",
        perm.to_str().unwrap(),
        "--random",
        "30",
        "--seq",
    ])?;
    assert_eq!(load_perm(&perm)?.len(), 30);

    rcm::cli::main([
        "rcm",
        "bandwidth",
        matrix.to_str().unwrap(),
        "--perm",
        dir.path().join("out").join("perm.txt").to_str().unwrap(),
    ])
    .expect_err("the permutation has the wrong length");
    Ok(())
}
