//! End-to-end CLI TSV round trip tests (spec.md §8): write an input TSV,
//! run a sub command's `run()` directly, read the output TSV back.

use clap::Parser;
use tempfile::tempdir;

use vstolib::cli::common_args::{IoArgs, MatchParamArgs};
use vstolib::cli::{compare, intersect, merge, overlap, subtract};
use vstolib::common;
use vstolib::defaults;
use vstolib::tsv;

const HEADER: &str = "variant_id\tvariant_call_id\tsample_id\tchromosome_1\tposition_1\tchromosome_2\tposition_2\tvariant_type\treference_allele\talternate_allele\n";

fn common_args() -> common::Args {
    common::Args::parse_from(["vstolib"])
}

fn match_param_args() -> MatchParamArgs {
    MatchParamArgs {
        max_neighbor_distance: defaults::MAX_NEIGHBOR_DISTANCE,
        match_all_breakpoints: defaults::MATCH_ALL_BREAKPOINTS,
        match_variant_types: defaults::MATCH_VARIANT_TYPES,
        min_ins_size_overlap: defaults::MIN_INS_SIZE_OVERLAP,
        min_del_size_overlap: defaults::MIN_DEL_SIZE_OVERLAP,
    }
}

fn write_tsv(path: &std::path::Path, rows: &str) {
    std::fs::write(path, format!("{HEADER}{rows}")).unwrap();
}

#[test]
fn merge_combines_two_overlapping_inputs_into_one_variant() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.tsv");
    let b = dir.path().join("b.tsv");
    let out = dir.path().join("out.tsv");
    write_tsv(&a, "v1\tc1\ts1\tchr1\t100\tchr1\t100\tSNV\tC\tA\n");
    write_tsv(&b, "v2\tc2\ts2\tchr1\t100\tchr1\t100\tSNV\tC\tA\n");

    let args = merge::Args {
        io: IoArgs {
            tsv_files: vec![a.to_string_lossy().to_string(), b.to_string_lossy().to_string()],
            output_tsv_file: out.to_string_lossy().to_string(),
            num_threads: 2,
            gzip: false,
        },
        params: match_param_args(),
    };
    merge::run(&common_args(), &args).unwrap();

    let result = tsv::read_variants_tsv(&out).unwrap();
    assert_eq!(result.size(), 1);
    assert_eq!(result.num_variant_calls(), 2);
}

#[test]
fn intersect_keeps_only_components_touching_every_input() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.tsv");
    let b = dir.path().join("b.tsv");
    let out = dir.path().join("out.tsv");
    write_tsv(
        &a,
        "v1\tc1\ts1\tchr1\t100\tchr1\t100\tSNV\tC\tA\n\
         v2\tc2\ts1\tchr2\t200\tchr2\t200\tSNV\tC\tA\n",
    );
    write_tsv(&b, "v3\tc3\ts2\tchr1\t100\tchr1\t100\tSNV\tC\tA\n");

    let args = intersect::Args {
        io: IoArgs {
            tsv_files: vec![a.to_string_lossy().to_string(), b.to_string_lossy().to_string()],
            output_tsv_file: out.to_string_lossy().to_string(),
            num_threads: 2,
            gzip: false,
        },
        params: match_param_args(),
    };
    intersect::run(&common_args(), &args).unwrap();

    let result = tsv::read_variants_tsv(&out).unwrap();
    assert_eq!(result.size(), 1);
    assert_eq!(result.num_variant_calls(), 2);
}

#[test]
fn subtract_removes_target_calls_matched_in_the_query() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target.tsv");
    let query = dir.path().join("query.tsv");
    let out = dir.path().join("out.tsv");
    write_tsv(
        &target,
        "v1\tc1\ts1\tchr1\t100\tchr1\t100\tSNV\tC\tA\n\
         v2\tc2\ts1\tchr2\t200\tchr2\t200\tSNV\tC\tA\n",
    );
    write_tsv(&query, "v3\tc3\ts2\tchr1\t100\tchr1\t100\tSNV\tC\tA\n");

    let args = subtract::Args {
        io: IoArgs {
            tsv_files: vec![
                target.to_string_lossy().to_string(),
                query.to_string_lossy().to_string(),
            ],
            output_tsv_file: out.to_string_lossy().to_string(),
            num_threads: 2,
            gzip: false,
        },
        params: match_param_args(),
    };
    subtract::run(&common_args(), &args).unwrap();

    let result = tsv::read_variants_tsv(&out).unwrap();
    assert_eq!(result.size(), 1);
    assert_eq!(result.variant_ids(), vec!["v2"]);
}

#[test]
fn subtract_rejects_a_single_input_file() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target.tsv");
    let out = dir.path().join("out.tsv");
    write_tsv(&target, "v1\tc1\ts1\tchr1\t100\tchr1\t100\tSNV\tC\tA\n");

    let args = subtract::Args {
        io: IoArgs {
            tsv_files: vec![target.to_string_lossy().to_string()],
            output_tsv_file: out.to_string_lossy().to_string(),
            num_threads: 1,
            gzip: false,
        },
        params: match_param_args(),
    };
    assert!(subtract::run(&common_args(), &args).is_err());
}

#[test]
fn compare_partitions_shared_a_only_and_b_only() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.tsv");
    let b = dir.path().join("b.tsv");
    let shared = dir.path().join("shared.tsv");
    let a_only = dir.path().join("a_only.tsv");
    let b_only = dir.path().join("b_only.tsv");
    write_tsv(
        &a,
        "v1\tc1\ts1\tchr1\t100\tchr1\t100\tSNV\tC\tA\n\
         v2\tc2\ts1\tchr2\t200\tchr2\t200\tSNV\tC\tA\n",
    );
    write_tsv(
        &b,
        "v3\tc3\ts2\tchr1\t100\tchr1\t100\tSNV\tC\tA\n\
         v4\tc4\ts2\tchr3\t300\tchr3\t300\tSNV\tC\tA\n",
    );

    let args = compare::Args {
        tsv_file_a: a.to_string_lossy().to_string(),
        tsv_file_b: b.to_string_lossy().to_string(),
        output_shared_tsv_file: shared.to_string_lossy().to_string(),
        output_a_only_tsv_file: a_only.to_string_lossy().to_string(),
        output_b_only_tsv_file: b_only.to_string_lossy().to_string(),
        num_threads: 2,
        gzip: false,
        params: match_param_args(),
    };
    compare::run(&common_args(), &args).unwrap();

    assert_eq!(tsv::read_variants_tsv(&shared).unwrap().size(), 1);
    assert_eq!(tsv::read_variants_tsv(&a_only).unwrap().variant_ids(), vec!["v2"]);
    assert_eq!(tsv::read_variants_tsv(&b_only).unwrap().variant_ids(), vec!["v4"]);
}

#[test]
fn compare_rejects_identical_input_paths() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.tsv");
    write_tsv(&a, "v1\tc1\ts1\tchr1\t100\tchr1\t100\tSNV\tC\tA\n");
    let path = a.to_string_lossy().to_string();

    let args = compare::Args {
        tsv_file_a: path.clone(),
        tsv_file_b: path,
        output_shared_tsv_file: dir.path().join("shared.tsv").to_string_lossy().to_string(),
        output_a_only_tsv_file: dir.path().join("a_only.tsv").to_string_lossy().to_string(),
        output_b_only_tsv_file: dir.path().join("b_only.tsv").to_string_lossy().to_string(),
        num_threads: 1,
        gzip: false,
        params: match_param_args(),
    };
    assert!(compare::run(&common_args(), &args).is_err());
}

#[test]
fn overlap_keeps_only_calls_whose_breakpoint_falls_in_a_region() {
    let dir = tempdir().unwrap();
    let variants = dir.path().join("variants.tsv");
    let regions = dir.path().join("regions.tsv");
    let out = dir.path().join("out.tsv");
    write_tsv(
        &variants,
        "v1\tc1\ts1\tchr1\t150\tchr1\t150\tSNV\tC\tA\n\
         v2\tc2\ts1\tchr1\t900\tchr1\t900\tSNV\tC\tA\n",
    );
    std::fs::write(&regions, "chromosome\tstart\tend\nchr1\t100\t200\n").unwrap();

    let args = overlap::Args {
        tsv_file: variants.to_string_lossy().to_string(),
        regions_tsv_file: regions.to_string_lossy().to_string(),
        output_tsv_file: out.to_string_lossy().to_string(),
        padding: 0,
        num_threads: 2,
        gzip: false,
    };
    overlap::run(&common_args(), &args).unwrap();

    let result = tsv::read_variants_tsv(&out).unwrap();
    assert_eq!(result.variant_ids(), vec!["v1"]);
}

#[test]
fn gzip_flag_round_trips_through_every_writer() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.tsv");
    let out = dir.path().join("out.tsv.gz");
    write_tsv(&a, "v1\tc1\ts1\tchr1\t100\tchr1\t100\tSNV\tC\tA\n");

    let args = merge::Args {
        io: IoArgs {
            tsv_files: vec![a.to_string_lossy().to_string()],
            output_tsv_file: out.to_string_lossy().to_string(),
            num_threads: 1,
            gzip: true,
        },
        params: match_param_args(),
    };
    merge::run(&common_args(), &args).unwrap();

    let result = tsv::read_variants_tsv(&out).unwrap();
    assert_eq!(result.num_variant_calls(), 1);
    assert_eq!(result.variants[0].variant_calls[0].sample_id, "s1");
}
