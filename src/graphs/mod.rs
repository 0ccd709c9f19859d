/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

pub mod adj_matrix;
pub use adj_matrix::AdjMatrix;

pub mod random;

pub mod prelude {
    pub use super::adj_matrix::AdjMatrix;
    pub use super::random::Sparse;
}
