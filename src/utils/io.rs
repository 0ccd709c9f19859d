/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::AdjMatrix;
use anyhow::{ensure, Context, Result};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Writes a permutation in ASCII format, one element per line.
pub fn write_perm(perm: &[usize], mut writer: impl Write) -> std::io::Result<()> {
    for x in perm {
        writeln!(writer, "{}", x)?;
    }
    Ok(())
}

/// Stores a permutation in ASCII format, one element per line.
pub fn store_perm(perm: &[usize], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("Could not create permutation at {}", path.display()))?;
    let mut buf = BufWriter::new(file);
    write_perm(perm, &mut buf)
        .and_then(|_| buf.flush())
        .with_context(|| format!("Could not write permutation to {}", path.display()))
}

/// Loads a permutation stored by [`store_perm`], checking that it is a
/// permutation of `0..n`, where `n` is the number of lines.
pub fn load_perm(path: impl AsRef<Path>) -> Result<Box<[usize]>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Could not open permutation {}", path.display()))?;
    let mut perm = Vec::new();
    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| {
            format!("Could not read line {} of {}", line_num + 1, path.display())
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        perm.push(line.parse::<usize>().with_context(|| {
            format!("Could not parse line {} of {}", line_num + 1, path.display())
        })?);
    }
    let check = super::check_permutation(&perm);
    ensure!(
        check.is_ok(),
        "{} is not a permutation: element {:?} is duplicated or out of range",
        path.display(),
        check.err()
    );
    Ok(perm.into_boxed_slice())
}

/// Writes the matrix reordered by `order`: row and column `i` of the output
/// are row and column `order[i]` of `graph`.
pub fn write_reordered(
    graph: &AdjMatrix,
    order: &[usize],
    mut writer: impl Write,
) -> std::io::Result<()> {
    for &u in order {
        for (i, &v) in order.iter().enumerate() {
            if i != 0 {
                writer.write_all(b" ")?;
            }
            writer.write_all(if graph.has_arc(u, v) { b"1" } else { b"0" })?;
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Stores the matrix reordered by `order` in the ASCII format read by
/// [`AdjMatrix::load_ascii`].
pub fn store_reordered(graph: &AdjMatrix, order: &[usize], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure!(
        order.len() == graph.num_nodes(),
        "The permutation has {} elements, but the matrix has {} rows",
        order.len(),
        graph.num_nodes()
    );
    let file = std::fs::File::create(path)
        .with_context(|| format!("Could not create matrix at {}", path.display()))?;
    let mut buf = BufWriter::new(file);
    write_reordered(graph, order, &mut buf)
        .and_then(|_| buf.flush())
        .with_context(|| format!("Could not write matrix to {}", path.display()))
}
