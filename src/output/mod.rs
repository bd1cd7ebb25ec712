//! Output channels for classified alignments.
//!
//! Every fragment ends up in exactly one of four channels:
//!
//! - **paired**: concordant and within-gene discordant pairs
//! - **discordant**: cross-gene pairs (chimeric candidates)
//! - **unpaired**: unmapped fragments and fragments with no valid pairing
//! - **multimap**: fragments with a mate mapping to too many loci
//!
//! Channels receive whole pairs or whole fragments per write, so the records
//! of one fragment are never interleaved with another's.

use std::io;

use noodles::sam::alignment::RecordBuf;

pub mod bam;

pub use bam::BamChannel;

/// A destination for alignment records
pub trait AlignmentSink {
    /// Write a group of records that belong together (a pair or a fragment)
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the records cannot be written.
    fn write_records(&mut self, records: &[RecordBuf]) -> io::Result<()>;

    /// Flush and close the sink
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the sink cannot be finalized.
    fn finish(self) -> io::Result<()>
    where
        Self: Sized;
}

/// In-memory sink keeping every write as its own group
#[derive(Debug, Clone, Default)]
pub struct MemoryChannel {
    pub writes: Vec<Vec<RecordBuf>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records written so far, in write order
    pub fn records(&self) -> impl Iterator<Item = &RecordBuf> {
        self.writes.iter().flatten()
    }

    pub fn record_count(&self) -> usize {
        self.writes.iter().map(Vec::len).sum()
    }
}

impl AlignmentSink for MemoryChannel {
    fn write_records(&mut self, records: &[RecordBuf]) -> io::Result<()> {
        self.writes.push(records.to_vec());
        Ok(())
    }

    fn finish(self) -> io::Result<()> {
        Ok(())
    }
}

/// The four output channels of a run
#[derive(Debug, Default)]
pub struct Channels<S> {
    pub paired: S,
    pub discordant: S,
    pub unpaired: S,
    pub multimap: S,
}

impl<S: AlignmentSink> Channels<S> {
    pub fn new(paired: S, discordant: S, unpaired: S, multimap: S) -> Self {
        Self {
            paired,
            discordant,
            unpaired,
            multimap,
        }
    }

    /// Finish every channel, reporting the first failure
    ///
    /// # Errors
    ///
    /// Returns the first I/O error raised while closing a channel. All
    /// channels are closed regardless.
    pub fn finish(self) -> io::Result<()> {
        let results = [
            self.paired.finish(),
            self.discordant.finish(),
            self.unpaired.finish(),
            self.multimap.finish(),
        ];
        results.into_iter().collect()
    }
}
