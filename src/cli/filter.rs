//! `vstolib filter` sub command: predicate filtering plus the
//! excluded-region and homopolymer passes (spec.md §6, §4.5).

use clap::Args as ClapArgs;

use crate::algebra;
use crate::common;
use crate::defaults;
use crate::error::{Error, Result};
use crate::filter::{apply_filters, FilterValue, Operator, Quantifier, VariantFilter as Predicate};
use crate::model::{AttributeValue, VariantsList};
use crate::tsv;

const TAG_FAILED_FILTER: &str = "failed_filter";
const TAG_NEARBY_EXCLUDED_REGION: &str = "nearby_excluded_region";
const TAG_HOMOPOLYMER_REGION: &str = "homopolymer_region";
const TAG_PASSED: &str = "passed";

#[derive(Debug, ClapArgs)]
pub struct Args {
    /// Input variant TSV.
    #[clap(long)]
    pub tsv_file: String,
    /// Case sample ID(s); repeat for multiple.
    #[clap(long = "case-sample-id", required = true)]
    pub case_sample_ids: Vec<String>,
    /// Control sample ID(s); repeat for multiple.
    #[clap(long = "control-sample-id")]
    pub control_sample_ids: Vec<String>,

    /// Filter predicate: "{case|control} {quantifier} {attribute} {op} {value}".
    #[clap(long = "filter")]
    pub filters: Vec<String>,

    /// TSV of regions to exclude (`chromosome, start, end`).
    #[clap(long)]
    pub excluded_regions_tsv_file: Option<String>,
    /// Homopolymer run length beyond which a call's alleles are rejected.
    #[clap(long, default_value_t = defaults::FILTER_HOMOPOLYMER_LENGTH)]
    pub homopolymer_length: i64,

    #[clap(long)]
    pub output_passed_tsv_file: String,
    #[clap(long)]
    pub output_rejected_tsv_file: String,

    #[clap(long, default_value_t = defaults::NUM_THREADS)]
    pub num_threads: usize,
    #[clap(long)]
    pub gzip: bool,
}

/// Parse one `--filter` string: `"{case|control} {quantifier} {attribute} {op} {value}"`.
fn parse_predicate(raw: &str, case_ids: &[String], control_ids: &[String]) -> Result<Predicate> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let [scope, quantifier, attribute, operator, value] = tokens[..] else {
        return Err(Error::InvalidPredicate(format!(
            "expected \"{{case|control}} {{quantifier}} {{attribute}} {{op}} {{value}}\", got: {raw}"
        )));
    };

    let sample_ids = match scope {
        "case" => case_ids.to_vec(),
        "control" => control_ids.to_vec(),
        other => {
            return Err(Error::InvalidPredicate(format!(
                "unknown sample scope in filter: {other}"
            )))
        }
    };

    let quantifier = match quantifier {
        "all" => Quantifier::All,
        "any" => Quantifier::Any,
        "min" => Quantifier::Min,
        "max" => Quantifier::Max,
        "median" => Quantifier::Median,
        "average" => Quantifier::Average,
        other => {
            return Err(Error::InvalidPredicate(format!(
                "unknown quantifier in filter: {other}"
            )))
        }
    };

    let operator_parsed = match operator {
        "<" => Operator::Lt,
        "<=" => Operator::Le,
        ">" => Operator::Gt,
        ">=" => Operator::Ge,
        "==" => Operator::Eq,
        "!=" => Operator::Ne,
        "in" => Operator::In,
        other => {
            return Err(Error::InvalidPredicate(format!(
                "unknown operator in filter: {other}"
            )))
        }
    };

    let filter_value = if operator_parsed == Operator::In {
        FilterValue::List(
            value
                .trim_matches(|c| c == '[' || c == ']')
                .split(',')
                .map(|v| infer_filter_literal(v.trim()))
                .collect(),
        )
    } else {
        FilterValue::Scalar(infer_filter_literal(value))
    };

    Ok(Predicate {
        quantifier,
        attribute: attribute.to_string(),
        operator: operator_parsed,
        value: filter_value,
        sample_ids,
    })
}

fn infer_filter_literal(raw: &str) -> AttributeValue {
    let raw = raw.trim_matches('"');
    if let Ok(i) = raw.parse::<i64>() {
        return AttributeValue::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return AttributeValue::Float(f);
    }
    AttributeValue::Str(raw.to_string())
}

/// Whether any allele string is a run of a single repeated base of at
/// least `homopolymer_length`.
fn is_homopolymer(sequence: &str, homopolymer_length: i64) -> bool {
    if sequence.len() < homopolymer_length.max(1) as usize {
        return false;
    }
    let mut chars = sequence.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    chars.all(|c| c.eq_ignore_ascii_case(&first))
}

pub fn run(_common: &common::Args, args: &Args) -> Result<()> {
    let variants_list = tsv::read_variants_tsv(&args.tsv_file)?;

    let predicates: Result<Vec<Predicate>> = args
        .filters
        .iter()
        .map(|raw| parse_predicate(raw, &args.case_sample_ids, &args.control_sample_ids))
        .collect();
    let predicates = predicates?;

    let passed_by_filter = if predicates.is_empty() {
        variants_list.variant_ids().into_iter().map(String::from).collect::<std::collections::HashSet<_>>()
    } else {
        apply_filters(&variants_list, &predicates)?
            .variant_ids()
            .into_iter()
            .map(String::from)
            .collect()
    };

    let excluded_by_region: std::collections::HashSet<String> = if let Some(path) = &args.excluded_regions_tsv_file {
        let regions = tsv::read_regions_tsv(path)?;
        let hits = algebra::overlap(
            &variants_list,
            &regions,
            defaults::FILTER_EXCLUDED_REGION_PADDING,
            args.num_threads,
        );
        variants_list
            .variants
            .iter()
            .filter(|v| v.variant_calls.iter().any(|c| hits.contains_key(&c.id)))
            .map(|v| v.id.clone())
            .collect()
    } else {
        Default::default()
    };

    let mut passed = Vec::new();
    let mut rejected = Vec::new();
    for variant in &variants_list.variants {
        let mut variant = variant.clone();
        let failed_filter = !passed_by_filter.contains(&variant.id);
        let nearby_excluded_region = excluded_by_region.contains(&variant.id);
        let homopolymeric = variant
            .variant_calls
            .iter()
            .any(|c| is_homopolymer(&c.alternate_allele, args.homopolymer_length));

        if failed_filter || nearby_excluded_region || homopolymeric {
            for call in &mut variant.variant_calls {
                if failed_filter {
                    call.tags.insert(TAG_FAILED_FILTER.to_string());
                }
                if nearby_excluded_region {
                    call.tags.insert(TAG_NEARBY_EXCLUDED_REGION.to_string());
                }
                if homopolymeric {
                    call.tags.insert(TAG_HOMOPOLYMER_REGION.to_string());
                }
            }
            rejected.push(variant);
        } else {
            for call in &mut variant.variant_calls {
                call.tags.insert(TAG_PASSED.to_string());
            }
            passed.push(variant);
        }
    }

    tracing::info!(
        "filter: {} variants passed, {} rejected",
        passed.len(),
        rejected.len()
    );

    tsv::write_variants_tsv(
        &args.output_passed_tsv_file,
        &VariantsList::from_variants(passed),
        args.gzip,
    )?;
    tsv::write_variants_tsv(
        &args.output_rejected_tsv_file,
        &VariantsList::from_variants(rejected),
        args.gzip,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_case_predicate_with_comparison_operator() {
        let predicate = parse_predicate(
            "case all alternate_allele_read_count >= 3",
            &["s1".to_string()],
            &[],
        )
        .unwrap();
        assert_eq!(predicate.sample_ids, vec!["s1".to_string()]);
        assert_eq!(predicate.operator, Operator::Ge);
    }

    #[test]
    fn rejects_unknown_scope() {
        assert!(parse_predicate("somewhere all x == 1", &[], &[]).is_err());
    }

    #[test]
    fn homopolymer_detects_runs_of_repeated_bases() {
        assert!(is_homopolymer("AAAAA", 5));
        assert!(!is_homopolymer("AAAAT", 5));
        assert!(!is_homopolymer("AAAA", 5));
    }
}
