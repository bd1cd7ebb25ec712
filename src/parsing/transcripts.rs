use std::path::Path;

use crate::core::transcript::{ClusterId, Exon, Transcript};
use crate::core::types::Strand;
use crate::parsing::ParseError;

/// Parse a transcript table file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` if the content is invalid.
pub fn parse_transcript_file(path: &Path) -> Result<Vec<Transcript>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_transcript_text(&content)
}

/// Parse transcript table text with columns:
/// name, cluster_id, chrom, strand, exon_starts, exon_ends
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 6 fields,
/// invalid numbers, or inconsistent exons, or if no transcripts are found.
pub fn parse_transcript_text(text: &str) -> Result<Vec<Transcript>, ParseError> {
    let mut transcripts = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if first == "name" || first == "tx_name" || first == "transcript" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 6 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 6 fields"
            )));
        }

        let name = fields[0].to_string();
        let cluster_id: ClusterId = fields[1].parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid cluster id on line {}: '{}'",
                line_num, fields[1]
            ))
        })?;
        let chrom = fields[2].to_string();
        let strand = Strand::parse(fields[3]).ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "Invalid strand on line {}: '{}'",
                line_num, fields[3]
            ))
        })?;

        let starts = parse_coordinates(fields[4], line_num)?;
        let ends = parse_coordinates(fields[5], line_num)?;
        let exons = build_exons(&starts, &ends, line_num)?;

        transcripts.push(Transcript::new(name, cluster_id, chrom, strand, exons));
    }

    if transcripts.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No transcripts found in file".to_string(),
        ));
    }

    Ok(transcripts)
}

fn parse_coordinates(field: &str, line_num: usize) -> Result<Vec<usize>, ParseError> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|_| {
                ParseError::InvalidFormat(format!("Invalid coordinate on line {line_num}: '{s}'"))
            })
        })
        .collect()
}

fn build_exons(starts: &[usize], ends: &[usize], line_num: usize) -> Result<Vec<Exon>, ParseError> {
    if starts.is_empty() {
        return Err(ParseError::InvalidFormat(format!(
            "Line {line_num} has no exons"
        )));
    }
    if starts.len() != ends.len() {
        return Err(ParseError::InvalidFormat(format!(
            "Line {line_num} has {} exon starts but {} exon ends",
            starts.len(),
            ends.len()
        )));
    }

    let exons: Vec<Exon> = starts
        .iter()
        .zip(ends)
        .map(|(&start, &end)| Exon::new(start, end))
        .collect();

    if exons.iter().any(Exon::is_empty) {
        return Err(ParseError::InvalidFormat(format!(
            "Line {line_num} has an exon with start >= end"
        )));
    }
    if exons.windows(2).any(|w| w[1].start < w[0].end) {
        return Err(ParseError::InvalidFormat(format!(
            "Line {line_num} has overlapping or unsorted exons"
        )));
    }

    Ok(exons)
}
