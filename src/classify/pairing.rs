use tracing::trace;

use crate::annotation::{LookupError, ReferenceLookup};
use crate::classify::binning::{bin_alignments, MateBins};
use crate::classify::selection::select_best_scoring_pairs;
use crate::core::alignment::AlignmentRecord;
use crate::core::fragment::Fragment;
use crate::core::types::{DiscordanceTag, LibraryType, Mate, Orientation};

/// A candidate pairing of one mate 1 and one mate 2 alignment.
///
/// The classification is carried by the pair, not written into the shared
/// alignment records, since one alignment can take part in several
/// candidate pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedPair<'a> {
    pub mate1: &'a AlignmentRecord,
    pub mate2: &'a AlignmentRecord,
    pub tag: DiscordanceTag,
    /// Orientation of (mate 1, mate 2); only set for cross-gene pairs
    pub orientations: Option<(Orientation, Orientation)>,
}

impl<'a> ClassifiedPair<'a> {
    pub fn new(mate1: &'a AlignmentRecord, mate2: &'a AlignmentRecord, tag: DiscordanceTag) -> Self {
        Self {
            mate1,
            mate2,
            tag,
            orientations: None,
        }
    }

    /// Sum of both mates' alignment scores
    pub fn score(&self) -> i64 {
        i64::from(self.mate1.score()) + i64::from(self.mate2.score())
    }

    /// True for a cross-gene (chimeric candidate) pair
    pub fn is_chimeric(&self) -> bool {
        self.tag == DiscordanceTag::DiscordantGene
    }
}

/// Outcome of classifying one fragment: either some pairs, or nothing and the
/// untouched fragment handed back as unpaired.
#[derive(Debug, Clone, PartialEq)]
pub enum Pairing<'a> {
    Pairs(Vec<ClassifiedPair<'a>>),
    Unpaired(&'a Fragment),
}

impl Pairing<'_> {
    pub fn pairs(&self) -> &[ClassifiedPair<'_>] {
        match self {
            Self::Pairs(pairs) => pairs,
            Self::Unpaired(_) => &[],
        }
    }

    pub fn is_unpaired(&self) -> bool {
        matches!(self, Self::Unpaired(_))
    }
}

/// Decides how the mates of a fragment can be paired.
///
/// Strategies are tried from the most to the least conservative
/// explanation:
///
/// 1. both mates on the same transcript
/// 2. both mates in the same transcript cluster (only if 1 found nothing)
/// 3. concordant pairs from 1 or 2, else strand-discordant pairs from 1 or 2
/// 4. mates on different genes, paired by opposite 5'/3' orientation and
///    reduced to the best-scoring pairs
/// 5. otherwise the fragment is unpaired
pub struct PairClassifier<'a> {
    lookup: &'a ReferenceLookup,
    library_type: LibraryType,
}

impl<'a> PairClassifier<'a> {
    pub fn new(lookup: &'a ReferenceLookup, library_type: LibraryType) -> Self {
        Self {
            lookup,
            library_type,
        }
    }

    pub fn library_type(&self) -> LibraryType {
        self.library_type
    }

    /// Classify every way the mates of `fragment` can be paired.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::MissingReferenceMapping` if any mapped
    /// alignment's reference has no annotation.
    pub fn classify<'f>(&self, fragment: &'f Fragment) -> Result<Pairing<'f>, LookupError> {
        let bins = bin_alignments(fragment, self.lookup)?;

        let (tx_concordant, tx_discordant) = self.pair_within(
            bins.by_reference.values(),
            DiscordanceTag::ConcordantTx,
            DiscordanceTag::DiscordantStrandTx,
        );

        // Cluster-level pairing only when no reference yielded any candidate
        let (gene_concordant, gene_discordant) =
            if tx_concordant.is_empty() && tx_discordant.is_empty() {
                self.pair_within(
                    bins.by_cluster.values(),
                    DiscordanceTag::ConcordantGene,
                    DiscordanceTag::DiscordantStrandGene,
                )
            } else {
                (Vec::new(), Vec::new())
            };

        for pairs in [tx_concordant, gene_concordant, tx_discordant, gene_discordant] {
            if !pairs.is_empty() {
                trace!(fragment = %fragment.name, tag = %pairs[0].tag, count = pairs.len(), "Paired within gene");
                return Ok(Pairing::Pairs(pairs));
            }
        }

        let chimeric = self.pair_across_genes(fragment);
        if !chimeric.is_empty() {
            let best = select_best_scoring_pairs(chimeric);
            trace!(fragment = %fragment.name, count = best.len(), "Paired across genes");
            return Ok(Pairing::Pairs(best));
        }

        Ok(Pairing::Unpaired(fragment))
    }

    /// Cross product of mate 1 x mate 2 within each bucket, split into
    /// strand-compatible and strand-incompatible pairs.
    fn pair_within<'f, 'b, I>(
        &self,
        buckets: I,
        concordant_tag: DiscordanceTag,
        discordant_tag: DiscordanceTag,
    ) -> (Vec<ClassifiedPair<'f>>, Vec<ClassifiedPair<'f>>)
    where
        'f: 'b,
        I: Iterator<Item = &'b MateBins<'f>>,
    {
        let same_strand = self.library_type.same_strand();
        let mut concordant = Vec::new();
        let mut discordant = Vec::new();

        for bucket in buckets.filter(|b| b.is_pairable()) {
            for (r1, r2) in bucket.cross_product() {
                if same_strand == (r1.is_reverse() == r2.is_reverse()) {
                    concordant.push(ClassifiedPair::new(r1, r2, concordant_tag));
                } else {
                    discordant.push(ClassifiedPair::new(r1, r2, discordant_tag));
                }
            }
        }

        (concordant, discordant)
    }

    /// Pair 5' alignments of one mate with 3' alignments of the other
    fn pair_across_genes<'f>(&self, fragment: &'f Fragment) -> Vec<ClassifiedPair<'f>> {
        let [r1_5p, r1_3p] = self.split_by_orientation(fragment, Mate::One);
        let [r2_5p, r2_3p] = self.split_by_orientation(fragment, Mate::Two);

        let combos = [
            (r1_5p, r2_3p, (Orientation::FivePrime, Orientation::ThreePrime)),
            (r1_3p, r2_5p, (Orientation::ThreePrime, Orientation::FivePrime)),
        ];

        let mut pairs = Vec::new();
        for (r1_list, r2_list, orientations) in combos {
            for &r1 in &r1_list {
                for &r2 in &r2_list {
                    pairs.push(ClassifiedPair {
                        mate1: r1,
                        mate2: r2,
                        tag: DiscordanceTag::DiscordantGene,
                        orientations: Some(orientations),
                    });
                }
            }
        }
        pairs
    }

    /// Mapped alignments of one mate split into [5', 3'] groups
    fn split_by_orientation<'f>(&self, fragment: &'f Fragment, mate: Mate) -> [Vec<&'f AlignmentRecord>; 2] {
        let mut five_prime = Vec::new();
        let mut three_prime = Vec::new();
        for alignment in fragment.mate(mate).iter().filter(|a| !a.is_unmapped()) {
            match self.library_type.orientation(mate, alignment.is_reverse()) {
                Orientation::FivePrime => five_prime.push(alignment),
                Orientation::ThreePrime => three_prime.push(alignment),
            }
        }
        [five_prime, three_prime]
    }
}
