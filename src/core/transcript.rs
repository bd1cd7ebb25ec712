use serde::{Deserialize, Serialize};

use crate::core::types::Strand;

/// Identifier of a group of overlapping transcripts treated as one gene
pub type ClusterId = u32;

/// A single exon in genome coordinates (0-based, half-open)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exon {
    pub start: usize,
    pub end: usize,
}

impl Exon {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// An annotated transcript that alignments were made against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub name: String,
    pub cluster_id: ClusterId,
    pub chrom: String,
    pub strand: Strand,
    /// Exons in ascending genome order
    pub exons: Vec<Exon>,
}

impl Transcript {
    pub fn new(
        name: impl Into<String>,
        cluster_id: ClusterId,
        chrom: impl Into<String>,
        strand: Strand,
        exons: Vec<Exon>,
    ) -> Self {
        Self {
            name: name.into(),
            cluster_id,
            chrom: chrom.into(),
            strand,
            exons,
        }
    }

    /// Spliced length of the transcript
    pub fn length(&self) -> usize {
        self.exons.iter().map(Exon::len).sum()
    }

    /// Project a 0-based transcript offset onto the genome.
    ///
    /// Offset 0 is the 5' end of the transcript. Offsets past either end
    /// are clamped to the nearest transcript end.
    pub fn to_genome_pos(&self, offset: usize) -> usize {
        let length = self.length();
        if length == 0 {
            return self.exons.first().map_or(0, |e| e.start);
        }
        let offset = offset.min(length - 1);

        // Walk exons in genome order using the offset from the genome-left end
        let left_offset = match self.strand {
            Strand::Forward => offset,
            Strand::Reverse => length - 1 - offset,
        };

        let mut remaining = left_offset;
        for exon in &self.exons {
            if remaining < exon.len() {
                return exon.start + remaining;
            }
            remaining -= exon.len();
        }

        // Unreachable for a consistent exon list; fall back to the last base
        self.exons.last().map_or(0, |e| e.end.saturating_sub(1))
    }
}
