/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::prelude::*;
use anyhow::{ensure, Result};
use clap::{ArgMatches, Args, Command, FromArgMatches};
use std::path::PathBuf;

pub const COMMAND_NAME: &str = "bandwidth";

#[derive(Args, Debug)]
#[command(about = "Prints the bandwidth of an ASCII adjacency matrix, possibly after applying a permutation.", long_about = None)]
pub struct CliArgs {
    /// The ASCII adjacency matrix.
    pub src: PathBuf,

    #[arg(short, long)]
    /// A permutation stored by the `order` command.
    pub perm: Option<PathBuf>,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)).display_order(0))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;
    let graph = AdjMatrix::load_ascii(&args.src)?;

    match &args.perm {
        None => println!("{}", bandwidth(&graph)),
        Some(path) => {
            let perm = load_perm(path)?;
            ensure!(
                perm.len() == graph.num_nodes(),
                "The permutation has {} elements, but the matrix has {} rows",
                perm.len(),
                graph.num_nodes()
            );
            println!("{}", permuted_bandwidth(&graph, &perm));
        }
    }

    Ok(())
}
