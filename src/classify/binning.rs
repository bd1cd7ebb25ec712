use std::collections::BTreeMap;

use crate::annotation::{LookupError, ReferenceLookup};
use crate::core::alignment::AlignmentRecord;
use crate::core::fragment::Fragment;
use crate::core::transcript::ClusterId;
use crate::core::types::Mate;

/// Alignments of both mates that fall into one bucket
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MateBins<'a> {
    mates: [Vec<&'a AlignmentRecord>; 2],
}

impl<'a> MateBins<'a> {
    pub fn push(&mut self, alignment: &'a AlignmentRecord) {
        self.mates[alignment.mate().index()].push(alignment);
    }

    pub fn mate(&self, mate: Mate) -> &[&'a AlignmentRecord] {
        &self.mates[mate.index()]
    }

    /// True when both mates have at least one alignment in this bucket
    pub fn is_pairable(&self) -> bool {
        !self.mates[0].is_empty() && !self.mates[1].is_empty()
    }

    /// Every (mate 1, mate 2) combination in this bucket
    pub fn cross_product(&self) -> impl Iterator<Item = (&'a AlignmentRecord, &'a AlignmentRecord)> + '_ {
        self.mates[0]
            .iter()
            .flat_map(move |r1| self.mates[1].iter().map(move |r2| (*r1, *r2)))
    }
}

/// A fragment's alignments partitioned by reference and by transcript cluster.
///
/// Buckets are ordered by key so iteration is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Bins<'a> {
    pub by_reference: BTreeMap<usize, MateBins<'a>>,
    pub by_cluster: BTreeMap<ClusterId, MateBins<'a>>,
}

/// File every mapped alignment of a fragment into exactly one reference
/// bucket and one cluster bucket. Unmapped alignments are skipped.
///
/// # Errors
///
/// Returns `LookupError::MissingReferenceMapping` if an alignment's
/// reference has no annotation.
pub fn bin_alignments<'a>(
    fragment: &'a Fragment,
    lookup: &ReferenceLookup,
) -> Result<Bins<'a>, LookupError> {
    let mut bins = Bins::default();
    for alignment in fragment.alignments() {
        let Some(tid) = alignment.tid() else {
            continue;
        };
        let cluster_id = lookup.cluster_id(tid)?;
        bins.by_cluster.entry(cluster_id).or_default().push(alignment);
        bins.by_reference.entry(tid).or_default().push(alignment);
    }
    Ok(bins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::{Exon, Transcript};
    use crate::core::types::Strand;

    fn lookup() -> ReferenceLookup {
        let tx = |name: &str, cluster| {
            Transcript::new(name, cluster, "chr1", Strand::Forward, vec![Exon::new(0, 1000)])
        };
        ReferenceLookup::from_transcripts(vec![tx("TX1", 7), tx("TX2", 7), tx("TX3", 3)])
    }

    #[test]
    fn test_bins_by_reference_and_cluster() {
        let fragment = Fragment::from_mates(
            "frag1",
            vec![
                AlignmentRecord::mapped(Mate::One, 0, 10, 60, false, 50),
                AlignmentRecord::mapped(Mate::One, 2, 10, 60, false, 50),
            ],
            vec![
                AlignmentRecord::mapped(Mate::Two, 1, 100, 150, true, 50),
                AlignmentRecord::unmapped(Mate::Two),
            ],
        );

        let bins = bin_alignments(&fragment, &lookup()).unwrap();

        assert_eq!(bins.by_reference.len(), 3);
        assert_eq!(bins.by_reference[&0].mate(Mate::One).len(), 1);
        assert!(bins.by_reference[&0].mate(Mate::Two).is_empty());
        assert_eq!(bins.by_reference[&1].mate(Mate::Two).len(), 1);
        assert!(!bins.by_reference.values().any(MateBins::is_pairable));

        assert_eq!(bins.by_cluster.len(), 2);
        assert!(bins.by_cluster[&7].is_pairable());
        assert!(!bins.by_cluster[&3].is_pairable());

        // every mapped alignment lands in exactly one bucket of each kind
        let total: usize = bins
            .by_reference
            .values()
            .map(|b| b.mate(Mate::One).len() + b.mate(Mate::Two).len())
            .sum();
        assert_eq!(total, 3);
        let keys: Vec<_> = bins.by_cluster.keys().copied().collect();
        assert_eq!(keys, vec![3, 7]);
    }

    #[test]
    fn test_cross_product() {
        let fragment = Fragment::from_mates(
            "frag1",
            vec![
                AlignmentRecord::mapped(Mate::One, 0, 10, 60, false, 50),
                AlignmentRecord::mapped(Mate::One, 0, 20, 70, false, 40),
            ],
            vec![
                AlignmentRecord::mapped(Mate::Two, 0, 100, 150, true, 50),
                AlignmentRecord::mapped(Mate::Two, 0, 200, 250, true, 30),
                AlignmentRecord::mapped(Mate::Two, 0, 300, 350, true, 20),
            ],
        );

        let bins = bin_alignments(&fragment, &lookup()).unwrap();
        let pairs: Vec<_> = bins.by_reference[&0].cross_product().collect();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0].0.start(), 10);
        assert_eq!(pairs[0].1.start(), 100);
        assert_eq!(pairs[5].0.start(), 20);
        assert_eq!(pairs[5].1.start(), 300);
    }

    #[test]
    fn test_missing_reference_is_fatal() {
        let fragment = Fragment::from_mates(
            "frag1",
            vec![AlignmentRecord::mapped(Mate::One, 5, 10, 60, false, 50)],
            vec![AlignmentRecord::mapped(Mate::Two, 0, 10, 60, true, 50)],
        );
        assert!(bin_alignments(&fragment, &lookup()).is_err());
    }
}
