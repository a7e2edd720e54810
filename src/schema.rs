//! Per-`variant_calling_method` attribute type schema (spec.md §9 "Dynamic
//! key→value attribute maps with per-caller type schemas"), grounded in
//! `constants.py::VariantCallingMethods.AttributeTypes`. Consulted only at
//! the TSV parse/serialize boundary ([`crate::tsv`]); the oracle and the
//! set-algebra engine never look at it.

use crate::model::AttributeType;

/// Look up the declared type of `key` for `method`, or `None` if either the
/// method or the key is unknown to the schema (the caller then falls back
/// to inferring the type from the raw string).
pub fn attribute_type(method: &str, key: &str) -> Option<AttributeType> {
    use AttributeType::*;
    let table: &[(&str, AttributeType)] = match method {
        "clairs" => &[
            ("ID", Str),
            ("H", Bool),
            ("FAU", Int),
            ("FCU", Int),
            ("FGU", Int),
            ("FTU", Int),
            ("RAU", Int),
            ("RCU", Int),
            ("RGU", Int),
            ("RTU", Int),
            ("GT", Str),
            ("GQ", Int),
            ("DP", Int),
            ("AF", Float),
            ("AD", Str),
            ("NAF", Float),
            ("NDP", Int),
            ("NAD", Int),
            ("AU", Int),
            ("CU", Int),
            ("GU", Int),
            ("TU", Int),
            ("NAU", Int),
            ("NCU", Int),
            ("NGU", Int),
            ("NTU", Int),
        ],
        "cutesv" => &[
            ("ID", Str),
            ("SVTYPE", Str),
            ("SVLEN", Int),
            ("CHR2", Str),
            ("END", Int),
            ("CIPOS", Str),
            ("CILEN", Str),
            ("RE", Int),
            ("STRAND", Str),
            ("RNAMES", Str),
            ("AF", Float),
            ("PRECISE", Bool),
            ("GT", Str),
            ("GQ", Float),
            ("PL", Str),
            ("DR", Int),
            ("DV", Int),
        ],
        "dbsnp" => &[("ID", Str)],
        "deepvariant" => &[
            ("ID", Str),
            ("END", Int),
            ("GT", Str),
            ("GQ", Int),
            ("DP", Int),
            ("MIN_DP", Int),
            ("AD", Str),
            ("VAF", Float),
            ("PL", Str),
            ("MED_DP", Int),
        ],
        "delly2-somatic" => &[
            ("ID", Str),
            ("SVTYPE", Str),
            ("SVMETHOD", Str),
            ("SVLEN", Int),
            ("END", Int),
            ("CHR2", Str),
            ("POS2", Int),
            ("PE", Int),
            ("MAPQ", Int),
            ("CT", Str),
            ("CIPOS", Str),
            ("CIEND", Str),
            ("SRMAPQ", Int),
            ("INSLEN", Int),
            ("HOMLEN", Int),
            ("SR", Int),
            ("SRQ", Int),
            ("CONSENSUS", Str),
            ("CE", Float),
            ("CONSBP", Int),
            ("RDRATIO", Float),
            ("GT", Str),
            ("GL", Str),
            ("GQ", Int),
            ("FT", Str),
            ("RC", Int),
            ("RCL", Int),
            ("RCR", Int),
            ("RDCN", Int),
            ("DR", Int),
            ("DV", Int),
            ("RR", Int),
            ("RV", Int),
            ("PRECISE", Bool),
            ("SOMATIC", Bool),
        ],
        "gatk4-mutect2" => &[
            ("ID", Str),
            ("AS_FilterStatus", Str),
            ("AS_SB_TABLE", Str),
            ("AS_UNIQ_ALT_READ_COUNT", Int),
            ("CONTQ", Float),
            ("ECNT", Int),
            ("GERMQ", Int),
            ("MBQ", Int),
            ("MFRL", Int),
            ("MMQ", Int),
            ("MPOS", Int),
            ("NALOD", Float),
            ("NCOUNT", Int),
            ("NLOD", Float),
            ("OCM", Int),
            ("PON", Bool),
            ("POPAF", Float),
            ("AF", Float),
            ("ROQ", Float),
            ("RPA", Int),
            ("RU", Str),
            ("SEQQ", Int),
            ("STR", Bool),
            ("STRANDQ", Int),
            ("STRQ", Int),
            ("TLOD", Float),
            ("AD", Str),
            ("DP", Int),
            ("F1R2", Str),
            ("F2R1", Str),
            ("FAD", Str),
            ("GQ", Float),
            ("GT", Str),
            ("PGT", Str),
            ("PID", Str),
            ("PL", Int),
            ("PS", Int),
            ("SB", Str),
        ],
        "lumpy-somatic" => &[
            ("ID", Str),
            ("SVTYPE", Str),
            ("STRANDS", Str),
            ("SVLEN", Int),
            ("END", Int),
            ("CIPOS", Str),
            ("CIEND", Str),
            ("CIPOS95", Str),
            ("CIEND95", Str),
            ("SU", Int),
            ("PE", Int),
            ("SR", Int),
            ("GT", Str),
            ("BD", Int),
            ("MATEID", Str),
            ("EVENT", Int),
            ("EV", Str),
            ("PRPOS", Str),
            ("PREND", Str),
            ("PRECISE", Bool),
            ("IMPRECISE", Bool),
            ("SECONDARY", Bool),
        ],
        "manta-somatic" => &[
            ("ID", Str),
            ("SVTYPE", Str),
            ("SVLEN", Int),
            ("END", Int),
            ("CIPOS", Str),
            ("CIEND", Str),
            ("CIGAR", Str),
            ("MATEID", Str),
            ("EVENT", Str),
            ("HOMLEN", Int),
            ("HOMSEQ", Str),
            ("SVINSLEN", Int),
            ("SVINSSEQ", Str),
            ("LEFT_SVINSSEQ", Str),
            ("RIGHT_SVINSSEQ", Str),
            ("BND_DEPTH", Int),
            ("MATE_BND_DEPTH", Int),
            ("PRECISE", Bool),
            ("IMPRECISE", Bool),
            ("SOMATIC", Bool),
            ("SOMATICSCORE", Int),
            ("JUNCTION_SOMATICSCORE", Int),
            ("PR", Str),
            ("SR", Str),
        ],
        "pbsv" => &[
            ("ID", Str),
            ("SVTYPE", Str),
            ("END", Int),
            ("SVLEN", Int),
            ("SVANN", Str),
            ("CIPOS", Str),
            ("MATEID", Str),
            ("MATEDIST", Int),
            ("PRECISE", Bool),
            ("GT", Str),
            ("DP", Int),
            ("AD", Str),
            ("SAC", Str),
            ("NotFullySpanned", Bool),
        ],
        "savana" => &[
            ("ID", Str),
            ("SVTYPE", Str),
            ("MATEID", Str),
            ("NORMAL_SUPPORT", Int),
            ("TUMOUR_SUPPORT", Int),
            ("SVLEN", Float),
            ("BP_NOTATION", Str),
            ("ORIGINATING_CLUSTER", Str),
            ("END_CLUSTER", Str),
            ("ORIGIN_STARTS_STD_DEV", Float),
            ("ORIGIN_MAPQ_MEAN", Float),
            ("ORIGIN_EVENT_SIZE_STD_DEV", Float),
            ("ORIGIN_EVENT_SIZE_MEDIAN", Float),
            ("ORIGIN_EVENT_SIZE_MEAN", Float),
            ("END_STARTS_STD_DEV", Float),
            ("END_MAPQ_MEAN", Float),
            ("END_EVENT_SIZE_STD_DEV", Float),
            ("END_EVENT_SIZE_MEDIAN", Float),
            ("END_EVENT_SIZE_MEAN", Float),
            ("TUMOUR_DP", Str),
            ("NORMAL_DP", Str),
            ("GT", Str),
            ("PRECISE", Bool),
            ("CLASS", Str),
        ],
        "severus" => &[
            ("ID", Str),
            ("SVTYPE", Str),
            ("SVLEN", Int),
            ("CHR2", Str),
            ("END", Int),
            ("STRANDS", Str),
            ("DETAILED_TYPE", Str),
            ("INSLEN", Int),
            ("MAPQ", Int),
            ("PHASESETID", Str),
            ("HP", Int),
            ("CLUSTERID", Str),
            ("INSSEQ", Str),
            ("MATE_ID", Str),
            ("INSIDE_VNTR", Str),
            ("ALINGED_POS", Str),
            ("GT", Str),
            ("GQ", Int),
            ("DR", Int),
            ("DV", Int),
            ("VAF", Float),
            ("hVAF", Str),
            ("PRECISE", Bool),
        ],
        "sniffles2" => &[
            ("ID", Str),
            ("SVLEN", Int),
            ("SVTYPE", Str),
            ("CHR2", Str),
            ("SUPPORT", Int),
            ("SUPPORT_INLINE", Int),
            ("SUPPORT_LONG", Int),
            ("END", Int),
            ("STDEV_POS", Float),
            ("STDEV_LEN", Float),
            ("COVERAGE", Str),
            ("STRAND", Str),
            ("AC", Int),
            ("SUPP_VEC", Str),
            ("CONSENSUS_SUPPORT", Int),
            ("RNAMES", Str),
            ("AF", Float),
            ("NM", Float),
            ("PHASE", Str),
            ("GT", Str),
            ("GQ", Int),
            ("DR", Int),
            ("DV", Int),
            ("PRECISE", Bool),
        ],
        "strelka2-somatic" => &[
            ("ID", Str),
            ("QSS", Int),
            ("TQSS", Int),
            ("NT", Str),
            ("QSS_NT", Int),
            ("TQSS_NT", Int),
            ("SGT", Str),
            ("MQ", Float),
            ("MQ0", Int),
            ("ReadPosRankSum", Float),
            ("PNOISE", Float),
            ("PNOISE2", Float),
            ("SomaticEVS", Float),
            ("QSI", Int),
            ("TQSI", Int),
            ("QSI_NT", Int),
            ("TQSI_NT", Int),
            ("RU", Str),
            ("RC", Int),
            ("IC", Int),
            ("IHP", Int),
            ("SOMATIC", Bool),
            ("OVERLAP", Bool),
            ("FDP", Int),
            ("SDP", Int),
            ("SUBDP", Int),
            ("AU", Str),
            ("CU", Str),
            ("GU", Str),
            ("TU", Str),
            ("DP", Int),
            ("DP2", Int),
            ("TAR", Str),
            ("TIR", Str),
            ("TOR", Str),
            ("SNVSB", Float),
            ("DP50", Float),
            ("FDP50", Float),
            ("SUBDP50", Float),
            ("BCN50", Float),
            ("END", Int),
            ("SNVHPOL", Int),
            ("CIGAR", Str),
            ("REFREP", Int),
            ("IDREP", Int),
            ("BLOCKAVG_MIN30P3A", Bool),
            ("GT", Str),
            ("GQ", Int),
            ("GQX", Int),
            ("DPF", Int),
            ("MIN_DP", Int),
            ("AD", Str),
            ("ADF", Str),
            ("ADR", Str),
            ("FT", Str),
            ("DPI", Int),
            ("PL", Int),
            ("PS", Int),
            ("SB", Float),
        ],
        "svim" => &[
            ("ID", Str),
            ("SVTYPE", Str),
            ("END", Int),
            ("SVLEN", Int),
            ("SUPPORT", Int),
            ("STD_SPAN", Float),
            ("STD_POS", Float),
            ("STD_POS1", Float),
            ("STD_POS2", Float),
            ("ZMWS", Int),
            ("SEQS", Str),
            ("READS", Str),
            ("CUTPASTE", Bool),
            ("GT", Bool),
            ("DP", Int),
            ("AD", Str),
            ("CN", Int),
        ],
        "svisionpro" => &[
            ("ID", Str),
            ("END", Int),
            ("IT", Str),
            ("SVLEN", Int),
            ("BKPS", Str),
            ("BKPSIT", Str),
            ("SVTYPE", Str),
            ("SUPPORT", Int),
            ("VAF", Float),
            ("RNAMES", Str),
            ("GT", Str),
            ("DR", Int),
            ("DV", Int),
            ("PRECISE", Bool),
        ],
        _ => return None,
    };
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, ty)| *ty)
}
