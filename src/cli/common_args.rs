//! Argument fragments shared by every sub command (spec.md §6 CLI surface).

use clap::Args as ClapArgs;

use crate::defaults;
use crate::oracle::MatchParams;

#[derive(Debug, ClapArgs, Clone)]
pub struct MatchParamArgs {
    /// Maximum distance in bases between matched breakpoints.
    #[clap(long, default_value_t = defaults::MAX_NEIGHBOR_DISTANCE)]
    pub max_neighbor_distance: i64,

    /// Require both breakpoints (not just one) within the distance.
    #[clap(long, default_value_t = defaults::MATCH_ALL_BREAKPOINTS)]
    pub match_all_breakpoints: bool,

    /// Require both calls to fall in the same variant-type equivalence class.
    #[clap(long, default_value_t = defaults::MATCH_VARIANT_TYPES)]
    pub match_variant_types: bool,

    /// Minimum reciprocal size overlap for INS/DUP calls.
    #[clap(long, default_value_t = defaults::MIN_INS_SIZE_OVERLAP)]
    pub min_ins_size_overlap: f64,

    /// Minimum reciprocal size overlap for DEL calls.
    #[clap(long, default_value_t = defaults::MIN_DEL_SIZE_OVERLAP)]
    pub min_del_size_overlap: f64,
}

impl From<&MatchParamArgs> for MatchParams {
    fn from(args: &MatchParamArgs) -> Self {
        MatchParams {
            max_neighbor_distance: args.max_neighbor_distance,
            match_all_breakpoints: args.match_all_breakpoints,
            match_variant_types: args.match_variant_types,
            min_ins_size_overlap: args.min_ins_size_overlap,
            min_del_size_overlap: args.min_del_size_overlap,
        }
    }
}

#[derive(Debug, ClapArgs, Clone)]
pub struct IoArgs {
    /// Input variant TSV file(s); repeat for multiple inputs.
    #[clap(long = "tsv-file", required = true)]
    pub tsv_files: Vec<String>,

    /// Output variant TSV file.
    #[clap(long)]
    pub output_tsv_file: String,

    /// Number of worker threads for the matching engine.
    #[clap(long, default_value_t = defaults::NUM_THREADS)]
    pub num_threads: usize,

    /// gzip-compress the output file.
    #[clap(long)]
    pub gzip: bool,
}
