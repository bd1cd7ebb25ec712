//! Command-line interface for discordant-reads.
//!
//! Classifies the alignments of paired-end reads against transcript
//! sequences and writes each fragment to one of four BAM files.
//!
//! ## Usage
//!
//! ```text
//! # Classify with the default (unstranded) library type
//! discordant-reads transcripts.tsv aligned.bam paired.bam discordant.bam unpaired.bam multimap.bam
//!
//! # Stranded library, stricter multimapping ceiling
//! discordant-reads --library strand-matches-mate2 --max-multihits 10 \
//!     transcripts.tsv aligned.bam paired.bam discordant.bam unpaired.bam multimap.bam
//!
//! # JSON run summary for scripting
//! discordant-reads --format json transcripts.tsv aligned.bam p.bam d.bam u.bam m.bam
//! ```

use clap::Parser;

pub mod classify;

#[derive(Parser)]
#[command(name = "discordant-reads")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Classify paired-end transcriptome alignments into concordant and discordant pairs")]
#[command(
    long_about = "discordant-reads pairs the alignments of each paired-end fragment against transcript sequences.\n\nEach fragment is written to exactly one output:\n- paired: mates on the same transcript or transcript cluster\n- discordant: mates on different genes (chimeric candidates)\n- unpaired: a mate is unmapped or no pairing exists\n- multimap: a mate maps to too many genomic loci"
)]
pub struct Cli {
    #[command(flatten)]
    pub args: classify::ClassifyArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for the run summary
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
