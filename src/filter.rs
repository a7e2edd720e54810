//! Filter evaluator: reduces a `VariantsList` to the variants whose
//! attached calls satisfy every predicate in an ordered list
//! (spec.md §4.5).

use std::collections::HashSet;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{AttributeValue, Variant, VariantCall, VariantsList};

/// How a predicate reduces the per-call values of its attribute to one
/// scalar before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    All,
    Any,
    Min,
    Max,
    Median,
    Average,
}

/// Comparison applied between the reduced value and the predicate's
/// literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    In,
}

/// One filter predicate: `(quantifier, attribute, operator, value, sample_ids)`.
#[derive(Debug, Clone)]
pub struct VariantFilter {
    pub quantifier: Quantifier,
    pub attribute: String,
    pub operator: Operator,
    pub value: FilterValue,
    pub sample_ids: Vec<String>,
}

/// The right-hand side of a predicate: either a scalar or, for `in`, a
/// list of scalars.
#[derive(Debug, Clone)]
pub enum FilterValue {
    Scalar(AttributeValue),
    List(Vec<AttributeValue>),
}

/// Reduce `variants` to those whose calls satisfy every predicate in
/// `filters`, in parallel with no shared mutable state.
pub fn apply_filters(variants: &VariantsList, filters: &[VariantFilter]) -> Result<VariantsList> {
    let kept: Result<Vec<Option<Variant>>> = variants
        .variants
        .par_iter()
        .map(|variant| {
            for filter in filters {
                if !evaluate(filter, variant)? {
                    return Ok(None);
                }
            }
            Ok(Some(variant.clone()))
        })
        .collect();
    Ok(VariantsList::from_variants(
        kept?.into_iter().flatten().collect(),
    ))
}

/// Evaluate one predicate against one variant, per spec.md §4.5 steps 1-6.
fn evaluate(filter: &VariantFilter, variant: &Variant) -> Result<bool> {
    let sample_ids: HashSet<&str> = filter.sample_ids.iter().map(String::as_str).collect();
    let calls: Vec<&VariantCall> = variant
        .variant_calls
        .iter()
        .filter(|c| sample_ids.is_empty() || sample_ids.contains(c.sample_id.as_str()))
        .collect();
    if calls.is_empty() {
        return Ok(false);
    }

    let values: Result<Vec<AttributeValue>> = calls
        .iter()
        .map(|c| resolve_attribute(c, &filter.attribute))
        .collect();
    let values = values?;

    match filter.quantifier {
        Quantifier::All => values
            .iter()
            .map(|v| compare(v, &filter.operator, &filter.value))
            .collect::<Result<Vec<bool>>>()
            .map(|results| results.into_iter().all(|b| b)),
        Quantifier::Any => values
            .iter()
            .map(|v| compare(v, &filter.operator, &filter.value))
            .collect::<Result<Vec<bool>>>()
            .map(|results| results.into_iter().any(|b| b)),
        Quantifier::Min | Quantifier::Max | Quantifier::Median | Quantifier::Average => {
            let reduced = reduce_numeric(&values, filter.quantifier)?;
            compare(&AttributeValue::Float(reduced), &filter.operator, &filter.value)
        }
    }
}

fn reduce_numeric(values: &[AttributeValue], quantifier: Quantifier) -> Result<f64> {
    let numeric: Result<Vec<f64>> = values
        .iter()
        .map(|v| {
            v.as_f64().ok_or_else(|| {
                Error::InvalidPredicate(format!(
                    "quantifier {quantifier:?} requires a numeric attribute, got {v:?}"
                ))
            })
        })
        .collect();
    let numeric = numeric?;
    Ok(match quantifier {
        Quantifier::Min => numeric.iter().cloned().fold(f64::INFINITY, f64::min),
        Quantifier::Max => numeric.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        Quantifier::Average => numeric.iter().sum::<f64>() / numeric.len() as f64,
        Quantifier::Median => {
            let mut sorted = numeric.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                (sorted[mid - 1] + sorted[mid]) / 2.0
            } else {
                sorted[mid]
            }
        }
        Quantifier::All | Quantifier::Any => unreachable!("handled by the caller"),
    })
}

fn compare(value: &AttributeValue, operator: &Operator, target: &FilterValue) -> Result<bool> {
    match (operator, target) {
        (Operator::In, FilterValue::List(options)) => Ok(options.contains(value)),
        (Operator::In, FilterValue::Scalar(_)) => Err(Error::InvalidPredicate(
            "`in` requires a list value".to_string(),
        )),
        (op, FilterValue::Scalar(target)) => compare_scalars(value, *op, target),
        (op, FilterValue::List(_)) => Err(Error::InvalidPredicate(format!(
            "operator {op:?} does not accept a list value"
        ))),
    }
}

fn compare_scalars(value: &AttributeValue, operator: Operator, target: &AttributeValue) -> Result<bool> {
    if matches!(operator, Operator::Eq | Operator::Ne) {
        let eq = value == target;
        return Ok(if operator == Operator::Eq { eq } else { !eq });
    }
    let (Some(a), Some(b)) = (value.as_f64(), target.as_f64()) else {
        return Err(Error::InvalidPredicate(format!(
            "operator {operator:?} requires numeric operands, got {value:?} and {target:?}"
        )));
    };
    Ok(match operator {
        Operator::Lt => a < b,
        Operator::Le => a <= b,
        Operator::Gt => a > b,
        Operator::Ge => a >= b,
        Operator::Eq | Operator::Ne | Operator::In => unreachable!("handled above"),
    })
}

/// Resolve `attribute` against a fixed vocabulary of `VariantCall`
/// fields (spec.md §4.5 step 3), falling back to the free-form
/// `attributes` map.
fn resolve_attribute(call: &VariantCall, attribute: &str) -> Result<AttributeValue> {
    Ok(match attribute {
        "chromosome_1" => AttributeValue::Str(call.chromosome_1.clone()),
        "position_1" => AttributeValue::Int(call.position_1),
        "chromosome_2" => AttributeValue::Str(call.chromosome_2.clone()),
        "position_2" => AttributeValue::Int(call.position_2),
        "variant_type" => AttributeValue::Str(call.variant_type.to_string()),
        "variant_subtype" => AttributeValue::Str(call.variant_subtype.clone()),
        "variant_size" => AttributeValue::Int(call.variant_size),
        "reference_allele_read_count" => AttributeValue::Int(call.reference_allele_read_count),
        "alternate_allele_read_count" => AttributeValue::Int(call.alternate_allele_read_count),
        "total_read_count" => AttributeValue::Int(call.total_read_count),
        "alternate_allele_fraction" => AttributeValue::Float(call.alternate_allele_fraction),
        "quality_score" => AttributeValue::Float(call.quality_score),
        "filter" => AttributeValue::Str(call.filter.clone()),
        "precise" => AttributeValue::Bool(call.precise.unwrap_or(false)),
        "sample_id" => AttributeValue::Str(call.sample_id.clone()),
        "source_id" => AttributeValue::Str(call.source_id.clone()),
        "sequencing_platform" => AttributeValue::Str(call.sequencing_platform.clone()),
        "variant_calling_method" => AttributeValue::Str(call.variant_calling_method.clone()),
        "average_alignment_score_window" => {
            AttributeValue::Int(call.average_alignment_score_window)
        }
        "position_1_average_alignment_score" => {
            AttributeValue::Float(call.position_1_average_alignment_score)
        }
        "position_2_average_alignment_score" => {
            AttributeValue::Float(call.position_2_average_alignment_score)
        }
        other => call
            .attributes
            .get(other)
            .cloned()
            .ok_or_else(|| Error::UnknownAttribute(other.to_string()))?,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::VariantType;

    fn call_with(sample_id: &str, quality_score: f64) -> VariantCall {
        let mut c = VariantCall::new(
            "vc", sample_id, "chr1", 100, "chr1", 100, VariantType::SNV, "C", "A",
        )
        .unwrap();
        c.quality_score = quality_score;
        c
    }

    fn filter(
        quantifier: Quantifier,
        attribute: &str,
        operator: Operator,
        value: FilterValue,
        sample_ids: &[&str],
    ) -> VariantFilter {
        VariantFilter {
            quantifier,
            attribute: attribute.to_string(),
            operator,
            value,
            sample_ids: sample_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_sample_restriction_fails_the_predicate() {
        let variant = Variant::with_calls("v1", vec![call_with("s1", 10.0)]);
        let f = filter(
            Quantifier::All,
            "quality_score",
            Operator::Ge,
            FilterValue::Scalar(AttributeValue::Float(5.0)),
            &["nonexistent_sample"],
        );
        assert!(!evaluate(&f, &variant).unwrap());
    }

    #[test]
    fn unknown_attribute_is_an_error() {
        let variant = Variant::with_calls("v1", vec![call_with("s1", 10.0)]);
        let f = filter(
            Quantifier::All,
            "not_a_real_field",
            Operator::Eq,
            FilterValue::Scalar(AttributeValue::Int(1)),
            &[],
        );
        assert!(matches!(
            evaluate(&f, &variant),
            Err(Error::UnknownAttribute(_))
        ));
    }

    #[test]
    fn all_requires_every_call_to_satisfy() {
        let variant = Variant::with_calls(
            "v1",
            vec![call_with("s1", 10.0), call_with("s2", 1.0)],
        );
        let f = filter(
            Quantifier::All,
            "quality_score",
            Operator::Ge,
            FilterValue::Scalar(AttributeValue::Float(5.0)),
            &[],
        );
        assert!(!evaluate(&f, &variant).unwrap());

        let f_any = filter(
            Quantifier::Any,
            "quality_score",
            Operator::Ge,
            FilterValue::Scalar(AttributeValue::Float(5.0)),
            &[],
        );
        assert!(evaluate(&f_any, &variant).unwrap());
    }

    #[test]
    fn aggregate_quantifiers_reduce_then_compare() {
        let variant = Variant::with_calls(
            "v1",
            vec![call_with("s1", 10.0), call_with("s2", 20.0)],
        );
        let f = filter(
            Quantifier::Average,
            "quality_score",
            Operator::Eq,
            FilterValue::Scalar(AttributeValue::Float(15.0)),
            &[],
        );
        assert!(evaluate(&f, &variant).unwrap());

        let f_max = filter(
            Quantifier::Max,
            "quality_score",
            Operator::Eq,
            FilterValue::Scalar(AttributeValue::Float(20.0)),
            &[],
        );
        assert!(evaluate(&f_max, &variant).unwrap());
    }

    #[test]
    fn in_operator_tests_list_membership() {
        let variant = Variant::with_calls("v1", vec![call_with("s1", 10.0)]);
        let f = filter(
            Quantifier::All,
            "sample_id",
            Operator::In,
            FilterValue::List(vec![
                AttributeValue::Str("s1".to_string()),
                AttributeValue::Str("s2".to_string()),
            ]),
            &[],
        );
        assert!(evaluate(&f, &variant).unwrap());
    }

    #[test]
    fn apply_filters_drops_failing_variants() {
        let list = VariantsList::from_variants(vec![
            Variant::with_calls("v1", vec![call_with("s1", 10.0)]),
            Variant::with_calls("v2", vec![call_with("s1", 1.0)]),
        ]);
        let f = filter(
            Quantifier::All,
            "quality_score",
            Operator::Ge,
            FilterValue::Scalar(AttributeValue::Float(5.0)),
            &[],
        );
        let result = apply_filters(&list, &[f]).unwrap();
        assert_eq!(result.variant_ids(), vec!["v1"]);
    }
}
