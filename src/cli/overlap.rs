//! `vstolib overlap` sub command (spec.md §4.4.6).

use clap::Args as ClapArgs;

use crate::algebra;
use crate::common;
use crate::defaults;
use crate::error::Result;
use crate::model::Variant;
use crate::model::VariantsList;
use crate::tsv;

#[derive(Debug, ClapArgs)]
pub struct Args {
    /// Input variant TSV.
    #[clap(long)]
    pub tsv_file: String,
    /// Input region TSV.
    #[clap(long)]
    pub regions_tsv_file: String,
    /// Output variant TSV, restricted to calls with at least one hit.
    #[clap(long)]
    pub output_tsv_file: String,

    /// Padding applied to each region's bounds, in bases.
    #[clap(long, default_value_t = defaults::OVERLAP_PADDING)]
    pub padding: i64,

    #[clap(long, default_value_t = defaults::NUM_THREADS)]
    pub num_threads: usize,
    #[clap(long)]
    pub gzip: bool,
}

pub fn run(_common: &common::Args, args: &Args) -> Result<()> {
    let variants = tsv::read_variants_tsv(&args.tsv_file)?;
    let regions = tsv::read_regions_tsv(&args.regions_tsv_file)?;
    let hits = algebra::overlap(&variants, &regions, args.padding, args.num_threads);

    let filtered: Vec<Variant> = variants
        .variants
        .iter()
        .filter_map(|variant| {
            let calls: Vec<_> = variant
                .variant_calls
                .iter()
                .filter(|c| hits.contains_key(&c.id))
                .cloned()
                .collect();
            (!calls.is_empty()).then(|| Variant::with_calls(variant.id.clone(), calls))
        })
        .collect();
    tracing::info!("overlap: {} calls with at least one hit", hits.len());
    tsv::write_variants_tsv(
        &args.output_tsv_file,
        &VariantsList::from_variants(filtered),
        args.gzip,
    )
}
