/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Miscellaneous utilities: permutations, bandwidth, and storage of results.

use crate::RcmError;

mod bandwidth;
pub use bandwidth::*;

mod io;
pub use io::*;

mod perm;
pub use perm::*;

/// Creates a thread pool with the given number of threads.
pub fn thread_pool(num_threads: usize) -> Result<rayon::ThreadPool, RcmError> {
    if num_threads == 0 {
        return Err(RcmError::InvalidConfiguration(
            "the number of threads must be positive".into(),
        ));
    }
    Ok(rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()?)
}

/// Returns an empty vector able to hold `len` elements without reallocating,
/// or an [`AllocationFailure`](RcmError::AllocationFailure) error.
pub(crate) fn try_with_capacity<T>(len: usize, what: &'static str) -> Result<Vec<T>, RcmError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| RcmError::AllocationFailure { what, len })?;
    Ok(v)
}
