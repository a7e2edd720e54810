//! `vstolib subtract` sub command. The first `--tsv-file` is the
//! target; every subsequent one is a query, applied as a left fold
//! (spec.md §4.4.4).

use clap::Args as ClapArgs;

use crate::algebra;
use crate::common;
use crate::error::{Error, Result};
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
    if args.io.tsv_files.len() < 2 {
        return Err(Error::InvalidParameters(
            "subtract requires a target TSV and at least one query TSV".to_string(),
        ));
    }
    let target = tsv::read_variants_tsv(&args.io.tsv_files[0])?;
    let queries: Result<Vec<_>> = args.io.tsv_files[1..]
        .iter()
        .map(tsv::read_variants_tsv)
        .collect();
    let queries = queries?;
    let params = (&args.params).into();
    let result = algebra::subtract_many(&target, &queries, &params);
    tracing::info!(
        "subtract: {} target variants, {} queries -> {} surviving variants",
        target.size(),
        queries.len(),
        result.size()
    );
    tsv::write_variants_tsv(&args.io.output_tsv_file, &result, args.io.gzip)
}
