//! `vstolib merge` sub command.

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
    let merged = algebra::merge(&lists, &params, args.io.num_threads);
    tracing::info!(
        "merge: {} input lists -> {} variants ({} calls)",
        lists.len(),
        merged.size(),
        merged.num_variant_calls()
    );
    tsv::write_variants_tsv(&args.io.output_tsv_file, &merged, args.io.gzip)
}
