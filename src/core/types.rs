use serde::{Deserialize, Serialize};

use crate::utils::validation::ConfigError;

/// One of the two reads of a paired-end fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mate {
    One,
    Two,
}

impl Mate {
    pub const BOTH: [Mate; 2] = [Mate::One, Mate::Two];

    /// Index of this mate in a fixed-size two-element container
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl std::fmt::Display for Mate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "mate1"),
            Self::Two => write!(f, "mate2"),
        }
    }
}

/// Genomic strand of a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse `+` or `-`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Forward),
            "-" => Some(Self::Reverse),
            _ => None,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

/// Relative orientation of the two mates produced by the sequencing protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MateOrientation {
    /// Mates on opposite strands (standard Illumina paired-end)
    Fr,
    /// Mates on the same strand
    Ff,
}

/// Which mate, if any, carries the strand of the originating transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strandedness {
    Unstranded,
    MatchesMate1,
    MatchesMate2,
}

/// Library preparation type
///
/// Controls whether the two mates of a concordant pair are expected on the
/// same or opposite strands, and how a gene-level alignment is assigned a
/// 5' or 3' orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryType {
    pub mates: MateOrientation,
    pub strandedness: Strandedness,
}

impl Default for LibraryType {
    fn default() -> Self {
        Self {
            mates: MateOrientation::Fr,
            strandedness: Strandedness::Unstranded,
        }
    }
}

impl LibraryType {
    /// Parse a library type name.
    ///
    /// Accepts `unstranded`, `strand-matches-mate1`, `strand-matches-mate2`
    /// as well as the protocol-prefixed `fr-*` and `ff-*` names
    /// (`unstranded`, `firststrand`, `secondstrand`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownLibraryType` for any other value.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let name = s.trim().to_lowercase();
        let (mates, strandedness) = match name.as_str() {
            "unstranded" | "fr-unstranded" => (MateOrientation::Fr, Strandedness::Unstranded),
            "strand-matches-mate1" | "fr-secondstrand" => {
                (MateOrientation::Fr, Strandedness::MatchesMate1)
            }
            "strand-matches-mate2" | "fr-firststrand" => {
                (MateOrientation::Fr, Strandedness::MatchesMate2)
            }
            "ff-unstranded" => (MateOrientation::Ff, Strandedness::Unstranded),
            "ff-secondstrand" => (MateOrientation::Ff, Strandedness::MatchesMate1),
            "ff-firststrand" => (MateOrientation::Ff, Strandedness::MatchesMate2),
            _ => return Err(ConfigError::UnknownLibraryType(s.to_string())),
        };
        Ok(Self {
            mates,
            strandedness,
        })
    }

    /// True when both mates of a concordant pair align to the same strand
    #[must_use]
    pub fn same_strand(&self) -> bool {
        self.mates == MateOrientation::Ff
    }

    /// Orientation of a gene-level alignment of `mate` on the given strand
    /// of its transcript.
    #[must_use]
    pub fn orientation(&self, mate: Mate, is_reverse: bool) -> Orientation {
        let upstream = match (self.strandedness, self.mates) {
            (Strandedness::MatchesMate1, _) => mate == Mate::One,
            (Strandedness::MatchesMate2, _) => mate == Mate::Two,
            (Strandedness::Unstranded, MateOrientation::Fr) => !is_reverse,
            (Strandedness::Unstranded, MateOrientation::Ff) => (mate == Mate::One) != is_reverse,
        };
        if upstream {
            Orientation::FivePrime
        } else {
            Orientation::ThreePrime
        }
    }
}

impl std::fmt::Display for LibraryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.mates, self.strandedness) {
            (MateOrientation::Fr, Strandedness::Unstranded) => write!(f, "unstranded"),
            (MateOrientation::Fr, Strandedness::MatchesMate1) => write!(f, "strand-matches-mate1"),
            (MateOrientation::Fr, Strandedness::MatchesMate2) => write!(f, "strand-matches-mate2"),
            (MateOrientation::Ff, Strandedness::Unstranded) => write!(f, "ff-unstranded"),
            (MateOrientation::Ff, Strandedness::MatchesMate1) => write!(f, "ff-secondstrand"),
            (MateOrientation::Ff, Strandedness::MatchesMate2) => write!(f, "ff-firststrand"),
        }
    }
}

impl std::str::FromStr for LibraryType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// How a classified pair of alignments relates to the annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscordanceTag {
    /// Both mates on the same transcript with the expected strands
    ConcordantTx,
    /// Both mates on the same transcript, strands violate the library type
    DiscordantStrandTx,
    /// Both mates in the same transcript cluster with the expected strands
    ConcordantGene,
    /// Both mates in the same transcript cluster, strands violate the library type
    DiscordantStrandGene,
    /// Mates on different genes (chimeric candidate)
    DiscordantGene,
}

impl DiscordanceTag {
    pub const ALL: [DiscordanceTag; 5] = [
        Self::ConcordantTx,
        Self::DiscordantStrandTx,
        Self::ConcordantGene,
        Self::DiscordantStrandGene,
        Self::DiscordantGene,
    ];

    /// Integer value written to the `XC` alignment tag
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::ConcordantTx => 0,
            Self::DiscordantStrandTx => 1,
            Self::ConcordantGene => 2,
            Self::DiscordantStrandGene => 3,
            Self::DiscordantGene => 4,
        }
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.code() == code)
    }

    #[must_use]
    pub fn is_concordant(self) -> bool {
        matches!(self, Self::ConcordantTx | Self::ConcordantGene)
    }
}

impl std::fmt::Display for DiscordanceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConcordantTx => write!(f, "CONCORDANT_TX"),
            Self::DiscordantStrandTx => write!(f, "DISCORDANT_STRAND_TX"),
            Self::ConcordantGene => write!(f, "CONCORDANT_GENE"),
            Self::DiscordantStrandGene => write!(f, "DISCORDANT_STRAND_GENE"),
            Self::DiscordantGene => write!(f, "DISCORDANT_GENE"),
        }
    }
}

/// Which end of a fusion a gene-level alignment supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    FivePrime,
    ThreePrime,
}

impl Orientation {
    /// Integer value written to the `XO` alignment tag
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::FivePrime => 0,
            Self::ThreePrime => 1,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::FivePrime => Self::ThreePrime,
            Self::ThreePrime => Self::FivePrime,
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FivePrime => write!(f, "5'"),
            Self::ThreePrime => write!(f, "3'"),
        }
    }
}
