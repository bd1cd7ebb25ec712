//! # discordant-reads
//!
//! A library for classifying paired-end RNA-seq alignments made against
//! transcript sequences.
//!
//! Each read of a fragment may align to many transcripts: isoforms of the
//! same gene, paralogs, or unrelated genes. `discordant-reads` decides, for
//! every fragment, how its two mates can be explained together and routes it
//! to one output:
//!
//! - **paired**: both mates on the same transcript or transcript cluster
//! - **discordant**: mates on different genes, the evidence for gene fusions
//! - **unpaired**: a mate is unmapped, or no valid pairing exists
//! - **multimap**: a mate maps to more distinct genomic loci than allowed
//!
//! ## Example
//!
//! ```rust,no_run
//! use discordant_reads::{ClassifyConfig, Dispatcher, ReferenceLookup};
//! use discordant_reads::output::{Channels, MemoryChannel};
//! use discordant_reads::parsing::{bam, transcripts::parse_transcript_file};
//! use std::path::Path;
//!
//! let transcripts = parse_transcript_file(Path::new("transcripts.tsv")).unwrap();
//! let reader = bam::open(Path::new("aligned.bam")).unwrap();
//! let lookup = ReferenceLookup::new(reader.header(), transcripts);
//!
//! let config = ClassifyConfig::new(1000, "unstranded", 40).unwrap();
//! let mut channels = Channels::<MemoryChannel>::default();
//! let summary = Dispatcher::new(&lookup, &config)
//!     .run(reader, &mut channels)
//!     .unwrap();
//!
//! println!("{} discordant pairs", summary.discordant_pairs);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Alignments, fragments, transcripts and classification types
//! - [`annotation`]: Transcript and genome coordinate lookups
//! - [`classify`]: Multimap resolution, binning, pairing and dispatch
//! - [`output`]: Output channels
//! - [`parsing`]: Transcript table and BAM fragment readers
//! - [`cli`]: Command-line interface implementation

pub mod annotation;
pub mod classify;
pub mod cli;
pub mod core;
pub mod output;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use annotation::ReferenceLookup;
pub use classify::{ClassifiedPair, ClassifyConfig, DispatchSummary, Dispatcher, PairClassifier, Pairing};
pub use crate::core::alignment::AlignmentRecord;
pub use crate::core::fragment::Fragment;
pub use crate::core::transcript::Transcript;
pub use crate::core::types::*;
