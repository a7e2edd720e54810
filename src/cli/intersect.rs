//! `vstolib intersect` sub command.

use clap::Args as ClapArgs;

use crate::algebra;
use crate::common;
use crate::error::Result;
use crate::tsv;

use super::common_args::{IoArgs, MatchParamArgs};

#[derive(Debug, ClapArgs)]
pub struct Args {
    #[clap(flatten)]
    pub io: IoArgs,
    #[clap(flatten)]
    pub params: MatchParamArgs,
}

pub fn run(_common: &common::Args, args: &Args) -> Result<()> {
    let lists: Result<Vec<_>> = args.io.tsv_files.iter().map(tsv::read_variants_tsv).collect();
    let lists = lists?;
    let params = (&args.params).into();
    let intersected = algebra::intersect(&lists, &params, args.io.num_threads);
    tracing::info!(
        "intersect: {} input lists -> {} variants",
        lists.len(),
        intersected.size()
    );
    tsv::write_variants_tsv(&args.io.output_tsv_file, &intersected, args.io.gzip)
}
