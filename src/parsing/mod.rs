//! Parsers for the tool's inputs.
//!
//! This module provides parsers for:
//!
//! - **Transcript tables**: tab-separated transcript annotations with exons
//!   and cluster ids
//! - **BAM files**: alignment records grouped into per-fragment mate lists
//!
//! ## Example
//!
//! ```rust,no_run
//! use discordant_reads::parsing::bam;
//! use discordant_reads::parsing::transcripts::parse_transcript_file;
//! use std::path::Path;
//!
//! let transcripts = parse_transcript_file(Path::new("transcripts.tsv")).unwrap();
//! let mut reader = bam::open(Path::new("aligned.bam")).unwrap();
//!
//! while let Some(fragment) = reader.read_fragment().unwrap() {
//!     println!("{}: {} alignments", fragment.name, fragment.len());
//! }
//! ```
//!
//! ## Transcript Table Columns
//!
//! | Column | Description |
//! |--------|-------------|
//! | name | Transcript name, matches the BAM reference name |
//! | cluster_id | Integer id of the gene/transcript cluster |
//! | chrom | Genome chromosome |
//! | strand | `+` or `-` |
//! | exon_starts | Comma-separated 0-based exon starts |
//! | exon_ends | Comma-separated exon ends (exclusive) |

use thiserror::Error;

pub mod bam;
pub mod transcripts;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Record '{0}' is not part of a paired-end read")]
    UnpairedRecord(String),
}
