//! Core data types for fragment classification.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`AlignmentRecord`]: One candidate placement of one mate
//! - [`Fragment`]: Both mates of a sequenced fragment with all their alignments
//! - [`Transcript`]: An annotated transcript with its exons and cluster
//! - [`LibraryType`]: Strand expectations of the sequencing protocol
//! - [`DiscordanceTag`], [`Orientation`]: Classification results
//!
//! ## Discordance Tags
//!
//! | Tag | Meaning | Output |
//! |-----|---------|--------|
//! | `CONCORDANT_TX` | same transcript, expected strands | paired |
//! | `DISCORDANT_STRAND_TX` | same transcript, wrong strands | paired |
//! | `CONCORDANT_GENE` | same cluster, expected strands | paired |
//! | `DISCORDANT_STRAND_GENE` | same cluster, wrong strands | paired |
//! | `DISCORDANT_GENE` | different genes | discordant |

pub mod alignment;
pub mod fragment;
pub mod transcript;
pub mod types;

pub use alignment::AlignmentRecord;
pub use fragment::Fragment;
pub use transcript::{ClusterId, Exon, Transcript};
pub use types::{DiscordanceTag, LibraryType, Mate, Orientation, Strand};
