/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use rayon::prelude::*;

/// Reverses a permutation in place.
///
/// Position `i` and position `n - 1 - i` are swapped for every `i` in the
/// first half of the slice; on an odd length the middle element stays put.
pub fn reverse(perm: &mut [usize]) {
    perm.reverse();
}

/// Reverses a permutation in place in parallel.
///
/// Each swapped pair is independent, so the two halves of the slice are
/// zipped and swapped in parallel on the current thread pool.
pub fn par_reverse(perm: &mut [usize]) {
    let half = perm.len() / 2;
    let (left, right) = perm.split_at_mut(perm.len() - half);
    left[..half]
        .par_iter_mut()
        .zip(right.par_iter_mut().rev())
        .with_min_len(1024)
        .for_each(|(a, b)| std::mem::swap(a, b));
}

/// Checks that the given slice is a permutation of `0..perm.len()`.
///
/// Returns `Err(x)`, where `x` is the first element (in order of position)
/// that is either out of range or duplicated.
pub fn check_permutation(perm: &[usize]) -> Result<(), usize> {
    let mut seen = vec![false; perm.len()];
    for &x in perm {
        if x >= perm.len() || seen[x] {
            return Err(x);
        }
        seen[x] = true;
    }
    Ok(())
}

/// Given a vector of distinct vertices (interpreted as a position -> vertex
/// map), returns the inverted permutation (interpreted as a vertex ->
/// position map).
///
/// Returns `Err(x)` if `order` is not a permutation, as
/// [`check_permutation`] does.
pub fn invert_permutation(order: &[usize]) -> Result<Box<[usize]>, usize> {
    check_permutation(order)?;
    let mut inv = vec![0; order.len()].into_boxed_slice();
    for (position, &vertex) in order.iter().enumerate() {
        inv[vertex] = position;
    }
    Ok(inv)
}
