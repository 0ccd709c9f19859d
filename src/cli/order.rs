/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::cli::{create_parent_dir, NumThreadsArg};
use crate::prelude::*;
use anyhow::{Context, Result};
use clap::{ArgMatches, Args, Command, FromArgMatches};
use dsi_progress_logger::prelude::*;
use log::info;
use std::path::PathBuf;

pub const COMMAND_NAME: &str = "order";

#[derive(Args, Debug)]
#[command(about = "Computes the reverse Cuthill-McKee permutation of a symmetric adjacency matrix.", long_about = None)]
pub struct CliArgs {
    /// The filename of the permutation, written in ASCII, one vertex per line.
    pub perm: PathBuf,

    #[arg(short, long, required_unless_present = "random")]
    /// The ASCII adjacency matrix to reorder (one row per line, entries 0 or
    /// 1 separated by whitespace).
    pub input: Option<PathBuf>,

    #[arg(short, long, conflicts_with = "input")]
    /// Reorder a random symmetric matrix with this number of vertices
    /// instead of reading one.
    pub random: Option<usize>,

    #[arg(short, long, default_value_t = 0.6, requires = "random")]
    /// The fraction of zero entries of the random matrix.
    pub sparsity: f64,

    #[arg(long, default_value_t = 0, requires = "random")]
    /// The seed of the generator of the random matrix.
    pub seed: u64,

    #[arg(long)]
    /// Also store the reordered matrix in ASCII format at this path.
    pub reordered: Option<PathBuf>,

    #[arg(long)]
    /// Use the sequential visit, ignoring the number of threads.
    pub seq: bool,

    #[arg(long)]
    /// Compute the Cuthill-McKee permutation, without reversing it.
    pub no_reverse: bool,

    #[clap(flatten)]
    pub num_threads: NumThreadsArg,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)).display_order(0))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;

    let graph = match (&args.input, args.random) {
        (Some(input), _) => {
            info!("Loading matrix from {}", input.display());
            AdjMatrix::load_ascii(input)?
        }
        (None, Some(n)) => {
            info!(
                "Generating a random matrix with {} vertices, sparsity {} and seed {}",
                n, args.sparsity, args.seed
            );
            Sparse::new(n, args.sparsity, args.seed)?.generate()
        }
        (None, None) => unreachable!(),
    };
    info!(
        "The matrix has {} vertices, {} nonzero entries and bandwidth {}",
        graph.num_nodes(),
        graph.num_arcs(),
        bandwidth(&graph)
    );

    let mut pl = ProgressLogger::default();
    pl.display_memory(true);
    if let Some(duration) = submatches.get_one("log-interval") {
        pl.log_interval(*duration);
    }

    let engine = CuthillMcKee::new(&graph).max_workers(if args.seq {
        1
    } else {
        args.num_threads.num_threads
    });
    let start = std::time::Instant::now();
    let perm = if args.no_reverse {
        engine.order(&mut pl)?
    } else {
        engine.reverse_order(&mut pl)?
    };
    info!(
        "Computed the permutation in {:.6} seconds",
        start.elapsed().as_secs_f64()
    );
    info!(
        "The reordered matrix has bandwidth {}",
        permuted_bandwidth(&graph, &perm)
    );

    create_parent_dir(&args.perm)?;
    store_perm(&perm, &args.perm)?;
    info!("Stored the permutation at {}", args.perm.display());

    if let Some(path) = &args.reordered {
        create_parent_dir(path)?;
        store_reordered(&graph, &perm, path)
            .with_context(|| format!("Could not store the reordered matrix at {}", path.display()))?;
        info!("Stored the reordered matrix at {}", path.display());
    }

    Ok(())
}
