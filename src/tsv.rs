//! Canonical variant TSV and region TSV I/O (spec.md §6).
//!
//! Grounded on the teacher's `common::io` gzip-transparent file
//! handling, adapted to use `csv`'s `ReaderBuilder`/`WriterBuilder`
//! with a tab delimiter and header-name (rather than positional)
//! column lookup, since both mandatory and optional columns may appear
//! in any order and unrecognized columns are ignored.

use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use indexmap::IndexMap;
use itertools::izip;

use crate::common::io::{open_read_maybe_gz, open_write_maybe_gz};
use crate::error::{Error, Result};
use crate::model::annotation::VariantCallAnnotation;
use crate::model::{AttributeValue, GenomicRange, GenomicRangesList, Variant, VariantCall, VariantType, VariantsList};

const MANDATORY_COLUMNS: &[&str] = &[
    "variant_id",
    "variant_call_id",
    "sample_id",
    "chromosome_1",
    "position_1",
    "chromosome_2",
    "position_2",
    "variant_type",
    "reference_allele",
    "alternate_allele",
];

fn required(row: &HashMap<String, String>, column: &str) -> Result<String> {
    row.get(column)
        .cloned()
        .ok_or_else(|| Error::MalformedInput(format!("missing mandatory column: {column}")))
}

fn parse_i64(row: &HashMap<String, String>, column: &str) -> Result<i64> {
    required(row, column)?
        .parse()
        .map_err(|_| Error::MalformedInput(format!("unparseable position in column {column}")))
}

fn optional_i64(row: &HashMap<String, String>, column: &str, default: i64) -> i64 {
    row.get(column)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn optional_f64(row: &HashMap<String, String>, column: &str, default: f64) -> f64 {
    row.get(column)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn optional_str(row: &HashMap<String, String>, column: &str) -> String {
    row.get(column).cloned().unwrap_or_default()
}

fn split_multi(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        Vec::new()
    } else {
        raw.split(';').map(str::to_string).collect()
    }
}

fn join_multi<I: IntoIterator<Item = String>>(values: I) -> String {
    values.into_iter().collect::<Vec<_>>().join(";")
}

/// Parse a bare value into the typed [`AttributeValue`] it looks like:
/// an integer, else a float, else `true`/`false`, else a string. Used as
/// a fallback when `method` has no schema entry for `key`.
fn infer_attribute_value(raw: &str) -> AttributeValue {
    if let Ok(i) = raw.parse::<i64>() {
        return AttributeValue::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return AttributeValue::Float(f);
    }
    match raw {
        "true" => AttributeValue::Bool(true),
        "false" => AttributeValue::Bool(false),
        _ => AttributeValue::Str(raw.to_string()),
    }
}

/// Parse `key=value;key=value` attributes, typing each value via the
/// `method`-specific schema (`crate::schema::attribute_type`) where known,
/// and inferring the type from the raw string otherwise.
fn parse_attributes(raw: &str, method: &str) -> IndexMap<String, AttributeValue> {
    let mut attributes = IndexMap::new();
    for pair in split_multi(raw) {
        if let Some((key, value)) = pair.split_once('=') {
            let typed = match crate::schema::attribute_type(method, key) {
                Some(ty) => ty.parse(value),
                None => infer_attribute_value(value),
            };
            attributes.insert(key.to_string(), typed);
        }
    }
    attributes
}

fn format_attributes(attributes: &IndexMap<String, AttributeValue>) -> String {
    join_multi(
        attributes
            .iter()
            .map(|(key, value)| format!("{key}={value}")),
    )
}

fn parse_precise(raw: &str) -> Option<bool> {
    match raw {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

fn format_precise(precise: Option<bool>) -> &'static str {
    match precise {
        Some(true) => "yes",
        Some(false) => "no",
        None => "",
    }
}

/// The 18 `VariantCallAnnotation` fields, in column order. Grounded on
/// `vstolib/variant_call_annotation.py`'s field list.
const ANNOTATION_FIELDS: &[&str] = &[
    "annotator",
    "annotator_version",
    "region",
    "species",
    "gene_id",
    "gene_id_stable",
    "gene_name",
    "gene_strand",
    "gene_type",
    "gene_version",
    "transcript_id",
    "transcript_id_stable",
    "transcript_name",
    "transcript_strand",
    "transcript_type",
    "transcript_version",
    "exon_id",
    "exon_id_stable",
];

fn annotation_column(breakpoint: &str, field: &str) -> String {
    format!("{breakpoint}_annotations_{field}")
}

fn annotation_field<'a>(annotation: &'a VariantCallAnnotation, field: &str) -> &'a str {
    match field {
        "annotator" => &annotation.annotator,
        "annotator_version" => &annotation.annotator_version,
        "region" => &annotation.region,
        "species" => &annotation.species,
        "gene_id" => &annotation.gene_id,
        "gene_id_stable" => &annotation.gene_id_stable,
        "gene_name" => &annotation.gene_name,
        "gene_strand" => &annotation.gene_strand,
        "gene_type" => &annotation.gene_type,
        "gene_version" => &annotation.gene_version,
        "transcript_id" => &annotation.transcript_id,
        "transcript_id_stable" => &annotation.transcript_id_stable,
        "transcript_name" => &annotation.transcript_name,
        "transcript_strand" => &annotation.transcript_strand,
        "transcript_type" => &annotation.transcript_type,
        "transcript_version" => &annotation.transcript_version,
        "exon_id" => &annotation.exon_id,
        "exon_id_stable" => &annotation.exon_id_stable,
        other => unreachable!("not an annotation field: {other}"),
    }
}

fn annotation_field_mut<'a>(annotation: &'a mut VariantCallAnnotation, field: &str) -> &'a mut String {
    match field {
        "annotator" => &mut annotation.annotator,
        "annotator_version" => &mut annotation.annotator_version,
        "region" => &mut annotation.region,
        "species" => &mut annotation.species,
        "gene_id" => &mut annotation.gene_id,
        "gene_id_stable" => &mut annotation.gene_id_stable,
        "gene_name" => &mut annotation.gene_name,
        "gene_strand" => &mut annotation.gene_strand,
        "gene_type" => &mut annotation.gene_type,
        "gene_version" => &mut annotation.gene_version,
        "transcript_id" => &mut annotation.transcript_id,
        "transcript_id_stable" => &mut annotation.transcript_id_stable,
        "transcript_name" => &mut annotation.transcript_name,
        "transcript_strand" => &mut annotation.transcript_strand,
        "transcript_type" => &mut annotation.transcript_type,
        "transcript_version" => &mut annotation.transcript_version,
        "exon_id" => &mut annotation.exon_id,
        "exon_id_stable" => &mut annotation.exon_id_stable,
        other => unreachable!("not an annotation field: {other}"),
    }
}

/// Parse one breakpoint's annotation columns back into annotations. Each
/// of the 18 fields is its own `;`-joined column; `izip!` walks all 18
/// field columns in lockstep so the i-th element of each becomes the
/// i-th annotation (spec.md §6).
fn parse_annotations(row: &HashMap<String, String>, breakpoint: &str) -> Vec<VariantCallAnnotation> {
    let columns: Vec<Vec<String>> = ANNOTATION_FIELDS
        .iter()
        .map(|field| {
            split_multi(
                row.get(&annotation_column(breakpoint, field))
                    .map(String::as_str)
                    .unwrap_or(""),
            )
        })
        .collect();
    let count = columns.iter().map(Vec::len).max().unwrap_or(0);

    let mut annotations: Vec<VariantCallAnnotation> = (0..count).map(|_| VariantCallAnnotation::default()).collect();
    for (field, values) in izip!(ANNOTATION_FIELDS.iter(), columns.iter()) {
        for (i, annotation) in annotations.iter_mut().enumerate() {
            if let Some(value) = values.get(i) {
                *annotation_field_mut(annotation, field) = value.clone();
            }
        }
    }
    annotations
}

/// Format a breakpoint's annotations into its 18 parallel `;`-joined
/// column values.
fn format_annotations(annotations: &[VariantCallAnnotation]) -> Vec<String> {
    ANNOTATION_FIELDS
        .iter()
        .map(|field| join_multi(annotations.iter().map(|a| annotation_field(a, field).to_string())))
        .collect()
}

fn row_to_map(headers: &StringRecord, record: &StringRecord) -> HashMap<String, String> {
    headers
        .iter()
        .zip(record.iter())
        .map(|(h, v)| (h.to_string(), v.to_string()))
        .collect()
}

fn row_to_variant_call(row: &HashMap<String, String>) -> Result<(String, VariantCall)> {
    let variant_id = required(row, "variant_id")?;
    let variant_type: VariantType = required(row, "variant_type")?
        .parse()
        .map_err(|_| Error::MalformedInput(format!("unknown variant_type: {:?}", row.get("variant_type"))))?;

    let mut call = VariantCall::new(
        required(row, "variant_call_id")?,
        required(row, "sample_id")?,
        required(row, "chromosome_1")?,
        parse_i64(row, "position_1")?,
        required(row, "chromosome_2")?,
        parse_i64(row, "position_2")?,
        variant_type,
        required(row, "reference_allele")?,
        required(row, "alternate_allele")?,
    )?;

    call.variant_subtype = optional_str(row, "variant_subtype");
    call.variant_size = optional_i64(row, "variant_size", -1);
    call.reference_allele_read_count = optional_i64(row, "reference_allele_read_count", -1);
    call.alternate_allele_read_count = optional_i64(row, "alternate_allele_read_count", -1);
    call.total_read_count = optional_i64(row, "total_read_count", -1);
    call.alternate_allele_fraction = optional_f64(row, "alternate_allele_fraction", crate::model::variant_call::MISSING_FRACTION);
    call.alternate_allele_read_ids = row
        .get("alternate_allele_read_ids")
        .map(|v| split_multi(v).into_iter().collect())
        .unwrap_or_default();
    call.variant_sequences = row
        .get("variant_sequences")
        .map(|v| split_multi(v).into_iter().collect())
        .unwrap_or_default();
    call.quality_score = optional_f64(row, "quality_score", -1.0);
    call.filter = optional_str(row, "filter");
    call.precise = row.get("precise").and_then(|v| parse_precise(v));
    call.source_id = optional_str(row, "source_id");
    call.clone_id = optional_str(row, "clone_id");
    call.phase_block_id = optional_str(row, "phase_block_id");
    call.nucleic_acid = optional_str(row, "nucleic_acid");
    call.sequencing_platform = optional_str(row, "sequencing_platform");
    call.variant_calling_method = optional_str(row, "variant_calling_method");
    call.attributes = row
        .get("attributes")
        .map(|v| parse_attributes(v, &call.variant_calling_method))
        .unwrap_or_default();
    call.tags = row
        .get("tags")
        .map(|v| split_multi(v).into_iter().collect())
        .unwrap_or_default();
    call.average_alignment_score_window = optional_i64(row, "average_alignment_score_window", -1);
    call.position_1_average_alignment_score = optional_f64(row, "position_1_average_alignment_score", -1.0);
    call.position_2_average_alignment_score = optional_f64(row, "position_2_average_alignment_score", -1.0);
    call.position_1_annotations = parse_annotations(row, "position_1");
    call.position_2_annotations = parse_annotations(row, "position_2");

    call.validate()?;
    Ok((variant_id, call))
}

/// Read the canonical variant TSV at `path` into a [`VariantsList`],
/// grouping calls by their `variant_id` column.
pub fn read_variants_tsv<P: AsRef<Path>>(path: P) -> Result<VariantsList> {
    let reader = open_read_maybe_gz(&path)?;
    let mut csv_reader = ReaderBuilder::new().delimiter(b'\t').from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    for column in MANDATORY_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(Error::MalformedInput(format!(
                "missing mandatory column: {column}"
            )));
        }
    }

    let mut variants: IndexMap<String, Vec<VariantCall>> = IndexMap::new();
    for record in csv_reader.records() {
        let record = record?;
        let row = row_to_map(&headers, &record);
        let (variant_id, call) = row_to_variant_call(&row)?;
        variants.entry(variant_id).or_default().push(call);
    }

    Ok(VariantsList::from_variants(
        variants
            .into_iter()
            .map(|(id, calls)| Variant::with_calls(id, calls))
            .collect(),
    ))
}

const OPTIONAL_COLUMNS: &[&str] = &[
    "variant_subtype",
    "variant_size",
    "reference_allele_read_count",
    "alternate_allele_read_count",
    "total_read_count",
    "alternate_allele_fraction",
    "alternate_allele_read_ids",
    "variant_sequences",
    "quality_score",
    "filter",
    "precise",
    "source_id",
    "clone_id",
    "phase_block_id",
    "nucleic_acid",
    "sequencing_platform",
    "variant_calling_method",
    "attributes",
    "tags",
    "average_alignment_score_window",
    "position_1_average_alignment_score",
    "position_2_average_alignment_score",
];

fn annotation_header_columns() -> Vec<String> {
    ["position_1", "position_2"]
        .iter()
        .flat_map(|breakpoint| {
            ANNOTATION_FIELDS
                .iter()
                .map(move |field| annotation_column(breakpoint, field))
        })
        .collect()
}

/// Write `variants` as the canonical variant TSV at `path`, gzip
/// compressed when `gzip` is set.
pub fn write_variants_tsv<P: AsRef<Path>>(path: P, variants: &VariantsList, gzip: bool) -> Result<()> {
    let writer = open_write_maybe_gz(&path, gzip)?;
    let mut csv_writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);

    let mut header: Vec<String> = MANDATORY_COLUMNS.iter().map(|s| s.to_string()).collect();
    header.extend(OPTIONAL_COLUMNS.iter().map(|s| s.to_string()));
    header.extend(annotation_header_columns());
    csv_writer.write_record(&header)?;

    for variant in &variants.variants {
        for call in &variant.variant_calls {
            let fields: Vec<String> = vec![
                variant.id.clone(),
                call.id.clone(),
                call.sample_id.clone(),
                call.chromosome_1.clone(),
                call.position_1.to_string(),
                call.chromosome_2.clone(),
                call.position_2.to_string(),
                call.variant_type.to_string(),
                call.reference_allele.clone(),
                call.alternate_allele.clone(),
                call.variant_subtype.clone(),
                call.variant_size.to_string(),
                call.reference_allele_read_count.to_string(),
                call.alternate_allele_read_count.to_string(),
                call.total_read_count.to_string(),
                call.alternate_allele_fraction.to_string(),
                join_multi(call.alternate_allele_read_ids.iter().cloned()),
                join_multi(call.variant_sequences.iter().cloned()),
                call.quality_score.to_string(),
                call.filter.clone(),
                format_precise(call.precise).to_string(),
                call.source_id.clone(),
                call.clone_id.clone(),
                call.phase_block_id.clone(),
                call.nucleic_acid.clone(),
                call.sequencing_platform.clone(),
                call.variant_calling_method.clone(),
                format_attributes(&call.attributes),
                join_multi(call.tags.iter().cloned()),
                call.average_alignment_score_window.to_string(),
                call.position_1_average_alignment_score.to_string(),
                call.position_2_average_alignment_score.to_string(),
            ];
            let fields: Vec<String> = fields
                .into_iter()
                .chain(format_annotations(&call.position_1_annotations))
                .chain(format_annotations(&call.position_2_annotations))
                .collect();
            csv_writer.write_record(&fields)?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read a three-column region TSV (`chromosome, start, end`; 1-based
/// inclusive) into a [`GenomicRangesList`].
pub fn read_regions_tsv<P: AsRef<Path>>(path: P) -> Result<GenomicRangesList> {
    let reader = open_read_maybe_gz(&path)?;
    let mut csv_reader = ReaderBuilder::new().delimiter(b'\t').from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut regions = GenomicRangesList::new();
    for record in csv_reader.records() {
        let record = record?;
        let row = row_to_map(&headers, &record);
        let chromosome = required(&row, "chromosome")?;
        let start = parse_i64(&row, "start")?;
        let end = parse_i64(&row, "end")?;
        regions.add_genomic_range(GenomicRange::new(chromosome, start, end)?);
    }
    Ok(regions)
}

/// Write `regions` as a three-column region TSV at `path`.
pub fn write_regions_tsv<P: AsRef<Path>>(path: P, regions: &GenomicRangesList, gzip: bool) -> Result<()> {
    let writer = open_write_maybe_gz(&path, gzip)?;
    let mut csv_writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    csv_writer.write_record(["chromosome", "start", "end"])?;
    let mut all: Vec<&GenomicRange> = regions.genomic_ranges_map.values().flatten().collect();
    all.sort();
    for region in all {
        csv_writer.write_record([
            region.chromosome.clone(),
            region.start.to_string(),
            region.end.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_mandatory_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("variants.tsv");
        std::fs::write(
            &path,
            "variant_id\tvariant_call_id\tsample_id\tchromosome_1\tposition_1\tchromosome_2\tposition_2\tvariant_type\treference_allele\talternate_allele\n\
             v1\tc1\ts1\tchr1\t100\tchr1\t100\tSNV\tC\tA\n",
        )
        .unwrap();
        let list = read_variants_tsv(&path).unwrap();
        assert_eq!(list.num_variant_calls(), 1);
        assert_eq!(list.variant_ids(), vec!["v1"]);

        let out_path = dir.path().join("out.tsv");
        write_variants_tsv(&out_path, &list, false).unwrap();
        let round_tripped = read_variants_tsv(&out_path).unwrap();
        assert_eq!(round_tripped.num_variant_calls(), 1);
    }

    #[test]
    fn missing_mandatory_column_is_malformed_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.tsv");
        std::fs::write(&path, "variant_id\tsample_id\n v1\ts1\n").unwrap();
        assert!(matches!(
            read_variants_tsv(&path),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn multi_valued_fields_are_semicolon_joined() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("variants.tsv");
        std::fs::write(
            &path,
            "variant_id\tvariant_call_id\tsample_id\tchromosome_1\tposition_1\tchromosome_2\tposition_2\tvariant_type\treference_allele\talternate_allele\ttags\tattributes\n\
             v1\tc1\ts1\tchr1\t100\tchr1\t100\tSNV\tC\tA\tgood;low_qual\tdepth=12;caller=a\n",
        )
        .unwrap();
        let list = read_variants_tsv(&path).unwrap();
        let call = &list.variants[0].variant_calls[0];
        assert_eq!(call.tags.len(), 2);
        assert_eq!(call.attributes.get("depth"), Some(&AttributeValue::Int(12)));
    }

    #[test]
    fn attribute_types_are_resolved_from_the_caller_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("variants.tsv");
        std::fs::write(
            &path,
            "variant_id\tvariant_call_id\tsample_id\tchromosome_1\tposition_1\tchromosome_2\tposition_2\tvariant_type\treference_allele\talternate_allele\tvariant_calling_method\tattributes\n\
             v1\tc1\ts1\tchr1\t100\tchr1\t200\tDEL\t\t<DEL>\tmanta-somatic\tSVLEN=100;PRECISE=true;EVENT=MantaBND\n",
        )
        .unwrap();
        let list = read_variants_tsv(&path).unwrap();
        let call = &list.variants[0].variant_calls[0];
        assert_eq!(call.attributes.get("SVLEN"), Some(&AttributeValue::Int(100)));
        assert_eq!(call.attributes.get("PRECISE"), Some(&AttributeValue::Bool(true)));
        assert_eq!(
            call.attributes.get("EVENT"),
            Some(&AttributeValue::Str("MantaBND".to_string()))
        );
    }

    #[test]
    fn region_tsv_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("regions.tsv");
        std::fs::write(&path, "chromosome\tstart\tend\nchr1\t100\t200\n").unwrap();
        let regions = read_regions_tsv(&path).unwrap();
        assert_eq!(regions.num_genomic_regions(), 1);
    }
}
