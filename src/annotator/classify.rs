//! Region classification from its set of overlapping features.

use crate::error::{Error, Result};
use crate::types::{Annotation, GenomicType, OverlapSet, Region};

/// Symbol reported for a region with no overlapping feature.
pub const NO_SYMBOL: &str = "NA";

/// Classify a region by its overlaps.
///
/// - no feature: `intergenic`, symbol `NA`;
/// - one feature: that feature's type and symbol;
/// - several features on one strand: `multiple_tx`;
/// - several features spanning both strands: `inverted_tx`.
///
/// With several features the symbol is every feature symbol joined with
/// `,` in arrival order, duplicates kept. The region is not modified, so
/// repeated calls return equal annotations.
pub fn classify(region: &Region) -> Result<Annotation> {
    match &region.overlaps {
        OverlapSet::Empty => Err(Error::NoOverlaps {
            id: region.id.clone(),
        }),
        OverlapSet::Intergenic => Ok(Annotation {
            genomic_type: GenomicType::Intergenic,
            overlap_symbol: NO_SYMBOL.to_string(),
        }),
        OverlapSet::Features(overlaps) => match overlaps.as_slice() {
            [] => Err(Error::NoOverlaps {
                id: region.id.clone(),
            }),
            [only] => Ok(Annotation {
                genomic_type: GenomicType::Feature(only.feature_type.clone()),
                overlap_symbol: only.symbol.clone(),
            }),
            [first, rest @ ..] => {
                let genomic_type = if rest.iter().any(|o| o.strand != first.strand) {
                    GenomicType::InvertedTx
                } else {
                    GenomicType::MultipleTx
                };
                let symbols: Vec<&str> = overlaps.iter().map(|o| o.symbol.as_str()).collect();

                Ok(Annotation {
                    genomic_type,
                    overlap_symbol: symbols.join(","),
                })
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Overlap, Stats, Strand};

    fn region_with(overlaps: OverlapSet) -> Region {
        let mut region = Region::new(
            "chr1".to_string(),
            100,
            200,
            "R1".to_string(),
            100,
            Stats::default(),
        );
        region.overlaps = overlaps;
        region
    }

    fn feature(strand: Strand, feature_type: &str, symbol: &str) -> Overlap {
        Overlap {
            chrom: "chr1".to_string(),
            start: 0,
            end: 1000,
            id: format!("ID_{}", symbol),
            width: 1000,
            strand,
            feature_type: feature_type.to_string(),
            symbol: symbol.to_string(),
            overlap: 100,
        }
    }

    #[test]
    fn test_intergenic() {
        let annotation = classify(&region_with(OverlapSet::Intergenic)).unwrap();
        assert_eq!(annotation.genomic_type, GenomicType::Intergenic);
        assert_eq!(annotation.overlap_symbol, "NA");
    }

    #[test]
    fn test_single_feature_takes_its_type_and_symbol() {
        let region = region_with(OverlapSet::Features(vec![feature(
            Strand::Negative,
            "snoRNA",
            "SNORD3A",
        )]));
        let annotation = classify(&region).unwrap();
        assert_eq!(
            annotation.genomic_type,
            GenomicType::Feature("snoRNA".to_string())
        );
        assert_eq!(annotation.overlap_symbol, "SNORD3A");
    }

    #[test]
    fn test_same_strand_features_are_multiple_tx() {
        let region = region_with(OverlapSet::Features(vec![
            feature(Strand::Positive, "protein_coding", "A"),
            feature(Strand::Positive, "lncRNA", "B"),
        ]));
        let annotation = classify(&region).unwrap();
        assert_eq!(annotation.genomic_type, GenomicType::MultipleTx);
        assert_eq!(annotation.overlap_symbol, "A,B");
    }

    #[test]
    fn test_opposite_strand_features_are_inverted_tx() {
        let region = region_with(OverlapSet::Features(vec![
            feature(Strand::Positive, "protein_coding", "A"),
            feature(Strand::Positive, "protein_coding", "B"),
            feature(Strand::Negative, "protein_coding", "C"),
        ]));
        let annotation = classify(&region).unwrap();
        assert_eq!(annotation.genomic_type, GenomicType::InvertedTx);
        assert_eq!(annotation.overlap_symbol, "A,B,C");
    }

    #[test]
    fn test_symbols_keep_arrival_order_and_duplicates() {
        let region = region_with(OverlapSet::Features(vec![
            feature(Strand::Negative, "protein_coding", "ZNF1"),
            feature(Strand::Negative, "protein_coding", "ABC1"),
            feature(Strand::Negative, "protein_coding", "ZNF1"),
        ]));
        assert_eq!(classify(&region).unwrap().overlap_symbol, "ZNF1,ABC1,ZNF1");
    }

    #[test]
    fn test_classification_is_idempotent() {
        let region = region_with(OverlapSet::Features(vec![
            feature(Strand::Positive, "protein_coding", "A"),
            feature(Strand::Negative, "protein_coding", "B"),
        ]));
        let first = classify(&region).unwrap();
        let second = classify(&region).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.overlap_symbol, "A,B");
    }

    #[test]
    fn test_region_without_overlaps_fails() {
        let err = classify(&region_with(OverlapSet::Empty)).unwrap_err();
        assert!(matches!(err, Error::NoOverlaps { ref id } if id == "R1"));

        let err = classify(&region_with(OverlapSet::Features(Vec::new()))).unwrap_err();
        assert!(matches!(err, Error::NoOverlaps { .. }));
    }
}
