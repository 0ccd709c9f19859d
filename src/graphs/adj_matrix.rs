/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::RcmError;
use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use sux::prelude::BitVec;

/// An undirected graph stored as a dense, symmetric 0/1 adjacency matrix.
///
/// The matrix is stored in row-major order in a [`BitVec`] of `n²` bits, so
/// concurrent reads need no synchronization. Entries on the diagonal are
/// stored (and counted by [`outdegree`](Self::outdegree)), but they are never
/// reported by [`successors`](Self::successors).
///
/// The matrix is symmetric by construction: [`add_edge`](Self::add_edge) sets
/// both `(u, v)` and `(v, u)`, and [`from_rows`](Self::from_rows) rejects
/// asymmetric input.
#[derive(Debug, Clone)]
pub struct AdjMatrix {
    n: usize,
    bits: BitVec,
}

impl AdjMatrix {
    /// Creates a matrix with `n` vertices and no edges.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            bits: BitVec::new(n * n),
        }
    }

    /// Creates a matrix with `n` vertices from an iterator of undirected
    /// edges.
    ///
    /// # Panics
    ///
    /// If an endpoint is not smaller than `n`.
    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut matrix = Self::new(n);
        for (u, v) in edges {
            matrix.add_edge(u, v);
        }
        matrix
    }

    /// Creates a matrix from its rows, checking that the rows describe a
    /// square, symmetric 0/1 matrix.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, RcmError> {
        let n = rows.len();
        let mut matrix = Self::new(n);
        for (row, entries) in rows.iter().enumerate() {
            let entries = entries.as_ref();
            if entries.len() != n {
                return Err(RcmError::MalformedMatrix {
                    line: row + 1,
                    reason: format!("expected {} entries, found {}", n, entries.len()),
                });
            }
            for (col, &entry) in entries.iter().enumerate() {
                match entry {
                    0 => {}
                    1 => matrix.bits.set(row * n + col, true),
                    _ => {
                        return Err(RcmError::MalformedMatrix {
                            line: row + 1,
                            reason: format!("entry {} in column {} is not 0 or 1", entry, col),
                        })
                    }
                }
            }
        }
        matrix.check_symmetric()?;
        Ok(matrix)
    }

    /// Adds the undirected edge `{u, v}`.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert!(
            u < self.n && v < self.n,
            "Edge ({u}, {v}) is out of range (the matrix has {} vertices)",
            self.n
        );
        self.bits.set(u * self.n + v, true);
        self.bits.set(v * self.n + u, true);
    }

    /// Returns the number of vertices.
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.n
    }

    /// Returns the number of nonzero entries of the matrix.
    pub fn num_arcs(&self) -> u64 {
        (0..self.n).map(|u| self.outdegree(u) as u64).sum()
    }

    /// Returns whether the entry `(u, v)` is nonzero.
    #[inline(always)]
    pub fn has_arc(&self, u: usize, v: usize) -> bool {
        self.bits[u * self.n + v]
    }

    /// Returns the number of nonzero entries in row `u`, diagonal included.
    pub fn outdegree(&self, u: usize) -> usize {
        (0..self.n).filter(|&v| self.has_arc(u, v)).count()
    }

    /// Returns the neighbors of `u` in increasing order, excluding `u`
    /// itself.
    pub fn successors(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.n).filter(move |&v| v != u && self.has_arc(u, v))
    }

    fn check_symmetric(&self) -> Result<(), RcmError> {
        for row in 0..self.n {
            for col in row + 1..self.n {
                if self.has_arc(row, col) != self.has_arc(col, row) {
                    return Err(RcmError::Asymmetric { row, col });
                }
            }
        }
        Ok(())
    }

    /// Parses a matrix in ASCII format: one row per line, entries `0` or `1`
    /// separated by whitespace. Empty lines are skipped.
    pub fn read_ascii(reader: impl BufRead) -> Result<Self> {
        let mut rows = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Could not read line {}", line_num + 1))?;
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|token| match token {
                    "0" => Ok(0),
                    "1" => Ok(1),
                    _ => Err(RcmError::MalformedMatrix {
                        line: line_num + 1,
                        reason: format!("unexpected token {:?}", token),
                    }),
                })
                .collect::<Result<Vec<u8>, _>>()?;
            rows.push(row);
        }
        Ok(Self::from_rows(&rows)?)
    }

    /// Loads a matrix in ASCII format from a file.
    pub fn load_ascii(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Could not open matrix {}", path.display()))?;
        Self::read_ascii(BufReader::new(file))
            .with_context(|| format!("Could not parse matrix {}", path.display()))
    }

    /// Writes the matrix in the format accepted by
    /// [`read_ascii`](Self::read_ascii).
    pub fn write_ascii(&self, mut writer: impl Write) -> std::io::Result<()> {
        for u in 0..self.n {
            for v in 0..self.n {
                if v != 0 {
                    writer.write_all(b" ")?;
                }
                writer.write_all(if self.has_arc(u, v) { b"1" } else { b"0" })?;
            }
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Stores the matrix in ASCII format.
    pub fn store_ascii(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .with_context(|| format!("Could not create matrix {}", path.display()))?;
        let mut buf = BufWriter::new(file);
        self.write_ascii(&mut buf)
            .and_then(|_| buf.flush())
            .with_context(|| format!("Could not write matrix to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges() {
        let g = AdjMatrix::from_edges(4, [(0, 1), (1, 2), (3, 3)]);
        assert_eq!(g.num_nodes(), 4);
        assert!(g.has_arc(1, 0));
        assert!(g.has_arc(2, 1));
        assert!(!g.has_arc(0, 2));
        assert_eq!(g.successors(1).collect::<Vec<_>>(), vec![0, 2]);
        // loops are counted by the degree but never returned as successors
        assert_eq!(g.outdegree(3), 1);
        assert_eq!(g.successors(3).count(), 0);
        assert_eq!(g.num_arcs(), 5);
    }

    #[test]
    fn test_from_rows_errors() {
        assert!(matches!(
            AdjMatrix::from_rows(&[vec![0, 1], vec![0, 0]]),
            Err(RcmError::Asymmetric { row: 0, col: 1 })
        ));
        assert!(matches!(
            AdjMatrix::from_rows(&[vec![0, 1], vec![1]]),
            Err(RcmError::MalformedMatrix { line: 2, .. })
        ));
        assert!(matches!(
            AdjMatrix::from_rows(&[vec![0, 2], vec![2, 0]]),
            Err(RcmError::MalformedMatrix { line: 1, .. })
        ));
    }

    #[test]
    fn test_ascii() -> Result<()> {
        let text = "0 1 0\n1 0 1\n\n0 1 0\n";
        let g = AdjMatrix::read_ascii(text.as_bytes())?;
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.successors(1).collect::<Vec<_>>(), vec![0, 2]);

        let mut out = Vec::new();
        g.write_ascii(&mut out)?;
        assert_eq!(String::from_utf8(out)?, "0 1 0\n1 0 1\n0 1 0\n");

        assert!(AdjMatrix::read_ascii("0 x\n1 0\n".as_bytes()).is_err());
        Ok(())
    }
}
