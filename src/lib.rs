/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
// for now we don't need any new feature but we might remove this in the future
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]

pub mod algo;
#[cfg(feature = "cli")]
pub mod cli;
pub mod graphs;
pub mod utils;

use thiserror::Error;

/// Errors reported by the ordering engine and by the matrix readers.
///
/// None of these errors is recoverable once the traversal has started: a
/// partial permutation is never returned.
#[derive(Error, Debug)]
pub enum RcmError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An allocation could not be satisfied.
    #[error("Could not allocate {len} elements for the {what}")]
    AllocationFailure { what: &'static str, len: usize },

    #[error("Malformed matrix at line {line}: {reason}")]
    MalformedMatrix { line: usize, reason: String },

    /// The matrix does not describe an undirected graph.
    #[error("The matrix is not symmetric: entry ({row}, {col}) differs from ({col}, {row})")]
    Asymmetric { row: usize, col: usize },

    #[error("Could not create the thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Prelude module to import everything from this crate
pub mod prelude {
    pub use crate::algo::rcm::*;
    pub use crate::graphs::prelude::*;
    pub use crate::utils::*;
    pub use crate::RcmError;
}
