use std::collections::HashMap;

use noodles::sam;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::transcript::{ClusterId, Transcript};
use crate::core::types::Strand;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Reference '{name}' (tid {tid}) has no transcript annotation")]
    MissingReferenceMapping { tid: usize, name: String },
}

/// A transcript coordinate projected onto the genome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenomePosition {
    /// Dense id of the genome chromosome
    pub tid: usize,
    pub strand: Strand,
    pub pos: usize,
}

/// Read-only tables mapping alignment reference ids to transcripts and
/// transcript coordinates to genome coordinates.
///
/// Built once before the first fragment is read and shared by every
/// classification afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLookup {
    transcripts: Vec<Transcript>,
    /// Alignment reference id -> index into `transcripts`
    by_tid: Vec<Option<usize>>,
    /// Alignment reference names, used in diagnostics
    reference_names: Vec<String>,
    /// Transcript index -> genome chromosome id
    genome_tids: Vec<usize>,
    chroms: Vec<String>,
}

impl ReferenceLookup {
    /// Build the lookup for the references of an alignment header.
    ///
    /// Header references are matched to transcripts by name. References
    /// without an annotation are only reported here; they become fatal when
    /// an alignment to one of them reaches the classifier.
    pub fn new(header: &sam::Header, transcripts: Vec<Transcript>) -> Self {
        let reference_names: Vec<String> = header
            .reference_sequences()
            .keys()
            .map(ToString::to_string)
            .collect();
        Self::build(reference_names, transcripts)
    }

    /// Build a lookup where reference id `i` is the `i`-th transcript
    pub fn from_transcripts(transcripts: Vec<Transcript>) -> Self {
        let reference_names = transcripts.iter().map(|t| t.name.clone()).collect();
        Self::build(reference_names, transcripts)
    }

    fn build(reference_names: Vec<String>, transcripts: Vec<Transcript>) -> Self {
        let by_name: HashMap<&str, usize> = transcripts
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.as_str(), i))
            .collect();

        let by_tid: Vec<Option<usize>> = reference_names
            .iter()
            .map(|name| by_name.get(name.as_str()).copied())
            .collect();

        let missing: Vec<&str> = reference_names
            .iter()
            .zip(&by_tid)
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.as_str())
            .collect();
        if !missing.is_empty() {
            warn!(
                count = missing.len(),
                first = %missing[0],
                "Alignment references without a transcript annotation"
            );
        }

        // Intern chromosome names in first-seen order
        let mut chroms: Vec<String> = Vec::new();
        let mut chrom_ids: HashMap<String, usize> = HashMap::new();
        let mut genome_tids = Vec::with_capacity(transcripts.len());
        for transcript in &transcripts {
            let id = *chrom_ids
                .entry(transcript.chrom.clone())
                .or_insert_with(|| {
                    chroms.push(transcript.chrom.clone());
                    chroms.len() - 1
                });
            genome_tids.push(id);
        }

        debug!(
            references = reference_names.len(),
            transcripts = transcripts.len(),
            chromosomes = chroms.len(),
            "Built transcript lookup tables"
        );

        Self {
            transcripts,
            by_tid,
            reference_names,
            genome_tids,
            chroms,
        }
    }

    fn index(&self, tid: usize) -> Result<usize, LookupError> {
        self.by_tid
            .get(tid)
            .copied()
            .flatten()
            .ok_or_else(|| LookupError::MissingReferenceMapping {
                tid,
                name: self
                    .reference_names
                    .get(tid)
                    .cloned()
                    .unwrap_or_else(|| "?".to_string()),
            })
    }

    /// Transcript for an alignment reference id
    ///
    /// # Errors
    ///
    /// Returns `LookupError::MissingReferenceMapping` if the reference has no
    /// annotated transcript.
    pub fn transcript(&self, tid: usize) -> Result<&Transcript, LookupError> {
        self.index(tid).map(|i| &self.transcripts[i])
    }

    /// Transcript cluster of an alignment reference id
    ///
    /// # Errors
    ///
    /// Returns `LookupError::MissingReferenceMapping` if the reference has no
    /// annotated transcript.
    pub fn cluster_id(&self, tid: usize) -> Result<ClusterId, LookupError> {
        self.transcript(tid).map(|t| t.cluster_id)
    }

    /// Project a position on an alignment reference onto the genome
    ///
    /// # Errors
    ///
    /// Returns `LookupError::MissingReferenceMapping` if the reference has no
    /// annotated transcript.
    pub fn to_genome(&self, tid: usize, pos: usize) -> Result<GenomePosition, LookupError> {
        let i = self.index(tid)?;
        let transcript = &self.transcripts[i];
        Ok(GenomePosition {
            tid: self.genome_tids[i],
            strand: transcript.strand,
            pos: transcript.to_genome_pos(pos),
        })
    }

    /// Name of a genome chromosome id handed out by [`Self::to_genome`]
    pub fn chrom_name(&self, genome_tid: usize) -> Option<&str> {
        self.chroms.get(genome_tid).map(String::as_str)
    }

    /// Number of alignment references known to the lookup
    pub fn reference_count(&self) -> usize {
        self.by_tid.len()
    }

    /// Number of alignment references with an annotated transcript
    pub fn annotated_count(&self) -> usize {
        self.by_tid.iter().filter(|i| i.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Exon;
    use noodles::sam::header::record::value::map::ReferenceSequence;
    use noodles::sam::header::record::value::Map;
    use std::num::NonZeroUsize;

    fn transcripts() -> Vec<Transcript> {
        vec![
            Transcript::new("TX1", 1, "chr1", Strand::Forward, vec![Exon::new(1000, 1100)]),
            Transcript::new("TX2", 1, "chr1", Strand::Forward, vec![Exon::new(1000, 1200)]),
            Transcript::new("TX3", 2, "chr2", Strand::Reverse, vec![Exon::new(500, 600)]),
        ]
    }

    #[test]
    fn test_from_transcripts() {
        let lookup = ReferenceLookup::from_transcripts(transcripts());
        assert_eq!(lookup.reference_count(), 3);
        assert_eq!(lookup.transcript(2).unwrap().name, "TX3");
        assert_eq!(lookup.cluster_id(1).unwrap(), 1);

        let pos = lookup.to_genome(2, 0).unwrap();
        assert_eq!(lookup.chrom_name(pos.tid), Some("chr2"));
        assert_eq!(pos.strand, Strand::Reverse);
        assert_eq!(pos.pos, 599);
    }

    #[test]
    fn test_shared_chromosome_ids() {
        let lookup = ReferenceLookup::from_transcripts(transcripts());
        let a = lookup.to_genome(0, 10).unwrap();
        let b = lookup.to_genome(1, 10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_reference_is_an_error() {
        let lookup = ReferenceLookup::from_transcripts(transcripts());
        let err = lookup.transcript(7).unwrap_err();
        assert_eq!(
            err,
            LookupError::MissingReferenceMapping {
                tid: 7,
                name: "?".to_string()
            }
        );
        assert!(lookup.to_genome(7, 0).is_err());
    }

    #[test]
    fn test_new_matches_header_names() {
        let length = NonZeroUsize::try_from(5000).unwrap();
        let header = sam::Header::builder()
            .add_reference_sequence("TX3", Map::<ReferenceSequence>::new(length))
            .add_reference_sequence("UNKNOWN", Map::<ReferenceSequence>::new(length))
            .add_reference_sequence("TX1", Map::<ReferenceSequence>::new(length))
            .build();

        let lookup = ReferenceLookup::new(&header, transcripts());
        assert_eq!(lookup.reference_count(), 3);
        assert_eq!(lookup.annotated_count(), 2);
        assert_eq!(lookup.transcript(0).unwrap().name, "TX3");
        assert_eq!(lookup.transcript(2).unwrap().name, "TX1");

        match lookup.transcript(1) {
            Err(LookupError::MissingReferenceMapping { tid, name }) => {
                assert_eq!(tid, 1);
                assert_eq!(name, "UNKNOWN");
            }
            other => panic!("expected missing mapping, got {other:?}"),
        }
    }
}
