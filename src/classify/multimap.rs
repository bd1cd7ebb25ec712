use std::collections::HashSet;

use crate::annotation::{LookupError, ReferenceLookup};
use crate::core::alignment::AlignmentRecord;

/// Count the distinct genomic loci covered by one mate's alignments.
///
/// Alignments to different transcripts that project onto the same genomic
/// interval (isoform redundancy) count once. The locus key is the genome
/// chromosome plus the projections of the transcript-5'-most and
/// transcript-3'-most aligned bases.
///
/// Returns 0 for an unmapped mate: an empty list, or a list containing an
/// unmapped record.
///
/// # Errors
///
/// Returns `LookupError::MissingReferenceMapping` if an alignment's
/// reference has no annotation.
pub fn count_genomic_loci(
    alignments: &[AlignmentRecord],
    lookup: &ReferenceLookup,
) -> Result<usize, LookupError> {
    let mut loci = HashSet::new();
    for alignment in alignments {
        let Some(tid) = alignment.tid() else {
            return Ok(0);
        };
        let first = lookup.to_genome(tid, alignment.start())?;
        let last = lookup.to_genome(tid, alignment.end() - 1)?;
        loci.insert((first.tid, first.pos, last.pos));
    }
    Ok(loci.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::{Exon, Transcript};
    use crate::core::types::{Mate, Strand};

    fn lookup() -> ReferenceLookup {
        ReferenceLookup::from_transcripts(vec![
            // TX1 and TX2 are isoforms sharing their first exon
            Transcript::new(
                "TX1",
                1,
                "chr1",
                Strand::Forward,
                vec![Exon::new(1000, 1100), Exon::new(2000, 2100)],
            ),
            Transcript::new(
                "TX2",
                1,
                "chr1",
                Strand::Forward,
                vec![Exon::new(1000, 1100), Exon::new(3000, 3100)],
            ),
            Transcript::new("TX3", 2, "chr2", Strand::Forward, vec![Exon::new(1000, 1100)]),
        ])
    }

    #[test]
    fn test_empty_is_unmapped() {
        assert_eq!(count_genomic_loci(&[], &lookup()).unwrap(), 0);
    }

    #[test]
    fn test_unmapped_record_is_unmapped() {
        let alignments = vec![
            AlignmentRecord::mapped(Mate::One, 0, 0, 50, false, 50),
            AlignmentRecord::unmapped(Mate::One),
        ];
        assert_eq!(count_genomic_loci(&alignments, &lookup()).unwrap(), 0);
    }

    #[test]
    fn test_isoforms_collapse_to_one_locus() {
        let alignments = vec![
            AlignmentRecord::mapped(Mate::One, 0, 10, 60, false, 50),
            AlignmentRecord::mapped(Mate::One, 1, 10, 60, false, 50),
        ];
        assert_eq!(count_genomic_loci(&alignments, &lookup()).unwrap(), 1);
    }

    #[test]
    fn test_spliced_alignments_to_different_exons_are_distinct() {
        // Both span the junction, but into different second exons
        let alignments = vec![
            AlignmentRecord::mapped(Mate::One, 0, 80, 130, false, 50),
            AlignmentRecord::mapped(Mate::One, 1, 80, 130, false, 50),
        ];
        assert_eq!(count_genomic_loci(&alignments, &lookup()).unwrap(), 2);
    }

    #[test]
    fn test_same_coordinates_on_different_chromosomes_are_distinct() {
        let alignments = vec![
            AlignmentRecord::mapped(Mate::One, 0, 10, 60, false, 50),
            AlignmentRecord::mapped(Mate::One, 2, 10, 60, false, 50),
        ];
        assert_eq!(count_genomic_loci(&alignments, &lookup()).unwrap(), 2);
    }

    #[test]
    fn test_missing_reference_is_fatal() {
        let alignments = vec![AlignmentRecord::mapped(Mate::One, 9, 10, 60, false, 50)];
        assert!(matches!(
            count_genomic_loci(&alignments, &lookup()),
            Err(LookupError::MissingReferenceMapping { tid: 9, .. })
        ));
    }
}
