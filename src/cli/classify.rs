use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use noodles::sam;
use tracing::{debug, info};

use crate::annotation::ReferenceLookup;
use crate::classify::{ClassifyConfig, DispatchSummary, Dispatcher};
use crate::cli::OutputFormat;
use crate::core::types::DiscordanceTag;
use crate::output::{BamChannel, Channels};
use crate::parsing::bam;
use crate::parsing::transcripts::parse_transcript_file;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Transcript annotation table (name, cluster_id, chrom, strand, exon_starts, exon_ends)
    pub transcripts: PathBuf,

    /// Input BAM aligned to transcript sequences, grouped by read name
    pub input_bam: PathBuf,

    /// Output BAM for concordant and within-gene pairs
    pub paired_bam: PathBuf,

    /// Output BAM for cross-gene pairs
    pub discordant_bam: PathBuf,

    /// Output BAM for unmapped and unpairable fragments
    pub unpaired_bam: PathBuf,

    /// Output BAM for fragments exceeding the multimapping ceiling
    pub multimap_bam: PathBuf,

    /// Maximum fragment length of the library
    #[arg(long, default_value = "1000", allow_negative_numbers = true)]
    pub max_fragment_length: i64,

    /// Library type (unstranded, strand-matches-mate1, strand-matches-mate2,
    /// fr-*/ff-* protocol names)
    #[arg(long, default_value = "unstranded")]
    pub library: String,

    /// Maximum number of distinct genomic loci per mate
    #[arg(long, default_value = "40", allow_negative_numbers = true)]
    pub max_multihits: i64,
}

pub fn run(args: ClassifyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = ClassifyConfig::new(args.max_fragment_length, &args.library, args.max_multihits)?;
    debug!(
        max_fragment_length = config.max_fragment_length,
        library = %config.library_type,
        max_multihits = config.max_multihits,
        "Configuration"
    );

    let transcripts = parse_transcript_file(&args.transcripts).with_context(|| {
        format!("Failed to read transcripts from {}", args.transcripts.display())
    })?;
    debug!(transcripts = transcripts.len(), path = %args.transcripts.display(), "Loaded annotation");

    let reader = bam::open(&args.input_bam)
        .with_context(|| format!("Failed to open {}", args.input_bam.display()))?;
    let lookup = ReferenceLookup::new(reader.header(), transcripts);

    let header = reader.header().clone();
    let mut channels = Channels::new(
        create_channel(&args.paired_bam, &header)?,
        create_channel(&args.discordant_bam, &header)?,
        create_channel(&args.unpaired_bam, &header)?,
        create_channel(&args.multimap_bam, &header)?,
    );

    info!(input = %args.input_bam.display(), "Classifying fragments");
    let mut dispatcher = Dispatcher::new(&lookup, &config);
    let summary = dispatcher.run(reader, &mut channels)?;
    channels.finish().context("Failed to finish output BAM files")?;

    match format {
        OutputFormat::Text => print_text_summary(&summary),
        OutputFormat::Json => print_json_summary(&summary)?,
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

fn create_channel(path: &Path, header: &sam::Header) -> anyhow::Result<BamChannel> {
    BamChannel::create(path, header).with_context(|| format!("Failed to create {}", path.display()))
}

fn tag_count(summary: &DispatchSummary, tag: DiscordanceTag) -> u64 {
    summary.pairs_by_tag.get(&tag).copied().unwrap_or(0)
}

fn print_text_summary(summary: &DispatchSummary) {
    println!("Fragments:        {}", summary.fragments);
    println!("  Unmapped:       {}", summary.unmapped);
    println!("  Multimapping:   {}", summary.multimapping);
    println!("  Unpaired:       {}", summary.unpaired);
    println!(
        "  Paired:         {} ({} pairs)",
        summary.paired_fragments, summary.paired_pairs
    );
    println!(
        "  Discordant:     {} ({} pairs)",
        summary.discordant_fragments, summary.discordant_pairs
    );

    println!("\nPairs by tag:");
    for tag in DiscordanceTag::ALL {
        println!("  {:<24}{}", tag.to_string(), tag_count(summary, tag));
    }
}

fn print_json_summary(summary: &DispatchSummary) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

fn print_tsv_summary(summary: &DispatchSummary) {
    println!("category\tcount");
    println!("fragments\t{}", summary.fragments);
    println!("unmapped\t{}", summary.unmapped);
    println!("multimapping\t{}", summary.multimapping);
    println!("unpaired\t{}", summary.unpaired);
    println!("paired_fragments\t{}", summary.paired_fragments);
    println!("discordant_fragments\t{}", summary.discordant_fragments);
    println!("paired_pairs\t{}", summary.paired_pairs);
    println!("discordant_pairs\t{}", summary.discordant_pairs);
    for tag in DiscordanceTag::ALL {
        println!("{}\t{}", tag, tag_count(summary, tag));
    }
}
