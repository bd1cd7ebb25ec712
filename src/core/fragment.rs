use noodles::sam::alignment::RecordBuf;

use crate::core::alignment::AlignmentRecord;
use crate::core::types::Mate;

/// All candidate alignments of one sequenced fragment.
///
/// The two mate lists live in a fixed two-element array indexed by
/// [`Mate::index`]. Either list may be empty (mate absent from the input) or
/// hold several alignments (multimapping mate).
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub name: String,
    mates: [Vec<AlignmentRecord>; 2],
}

impl Fragment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mates: [Vec::new(), Vec::new()],
        }
    }

    /// Build a fragment from already-separated mate lists
    pub fn from_mates(
        name: impl Into<String>,
        mate1: Vec<AlignmentRecord>,
        mate2: Vec<AlignmentRecord>,
    ) -> Self {
        Self {
            name: name.into(),
            mates: [mate1, mate2],
        }
    }

    /// Append an alignment to the list of the mate it belongs to
    pub fn push(&mut self, alignment: AlignmentRecord) {
        self.mates[alignment.mate().index()].push(alignment);
    }

    pub fn mate(&self, mate: Mate) -> &[AlignmentRecord] {
        &self.mates[mate.index()]
    }

    pub fn mates(&self) -> &[Vec<AlignmentRecord>; 2] {
        &self.mates
    }

    pub fn len(&self) -> usize {
        self.mates[0].len() + self.mates[1].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All alignments, mate 1 first, each mate in input order
    pub fn alignments(&self) -> impl Iterator<Item = &AlignmentRecord> {
        self.mates.iter().flatten()
    }

    /// The underlying records, mate 1 first
    pub fn records(&self) -> Vec<RecordBuf> {
        self.alignments().map(|a| a.record().clone()).collect()
    }
}
