/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::cli::create_parent_dir;
use crate::prelude::*;
use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches};
use log::info;
use std::path::PathBuf;

pub const COMMAND_NAME: &str = "gen";

#[derive(Args, Debug)]
#[command(about = "Generates a random symmetric adjacency matrix in ASCII format.", long_about = None)]
pub struct CliArgs {
    /// The number of vertices.
    pub n: usize,
    /// The destination file.
    pub dst: PathBuf,

    #[arg(short, long, default_value_t = 0.6)]
    /// The fraction of zero entries.
    pub sparsity: f64,

    #[arg(long, default_value_t = 0)]
    /// The seed of the pseudorandom number generator.
    pub seed: u64,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)).display_order(0))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;

    create_parent_dir(&args.dst)?;
    let graph = Sparse::new(args.n, args.sparsity, args.seed)?.generate();
    graph.store_ascii(&args.dst)?;
    info!(
        "Stored a matrix with {} vertices and {} nonzero entries at {}",
        graph.num_nodes(),
        graph.num_arcs(),
        args.dst.display()
    );

    Ok(())
}
