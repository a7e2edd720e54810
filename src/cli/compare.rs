//! `vstolib compare` sub command: three-way partition of two inputs
//! (spec.md §4.4.5).

use clap::Args as ClapArgs;

use crate::algebra;
use crate::common;
use crate::defaults;
use crate::error::{Error, Result};
use crate::tsv;

use super::common_args::MatchParamArgs;

#[derive(Debug, ClapArgs)]
pub struct Args {
    /// First input variant TSV (`A`).
    #[clap(long)]
    pub tsv_file_a: String,
    /// Second input variant TSV (`B`).
    #[clap(long)]
    pub tsv_file_b: String,

    /// Output TSV for components shared by both inputs.
    #[clap(long)]
    pub output_shared_tsv_file: String,
    /// Output TSV for variants found only in `A`.
    #[clap(long)]
    pub output_a_only_tsv_file: String,
    /// Output TSV for variants found only in `B`.
    #[clap(long)]
    pub output_b_only_tsv_file: String,

    #[clap(long, default_value_t = defaults::NUM_THREADS)]
    pub num_threads: usize,
    #[clap(long)]
    pub gzip: bool,

    #[clap(flatten)]
    pub params: MatchParamArgs,
}

pub fn run(_common: &common::Args, args: &Args) -> Result<()> {
    if args.tsv_file_a == args.tsv_file_b {
        return Err(Error::InvalidParameters(
            "compare requires two distinct input TSVs".to_string(),
        ));
    }
    let a = tsv::read_variants_tsv(&args.tsv_file_a)?;
    let b = tsv::read_variants_tsv(&args.tsv_file_b)?;
    let params = (&args.params).into();
    let result = algebra::compare(&a, &b, &params, args.num_threads);
    tracing::info!(
        "compare: {} shared, {} a-only, {} b-only",
        result.shared.size(),
        result.a_only.size(),
        result.b_only.size()
    );
    tsv::write_variants_tsv(&args.output_shared_tsv_file, &result.shared, args.gzip)?;
    tsv::write_variants_tsv(&args.output_a_only_tsv_file, &result.a_only, args.gzip)?;
    tsv::write_variants_tsv(&args.output_b_only_tsv_file, &result.b_only, args.gzip)
}
