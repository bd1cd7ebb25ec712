//! Transcript annotation lookup tables.
//!
//! Alignments are made against transcript sequences, so every alignment
//! reference id corresponds to one annotated [`Transcript`](crate::core::Transcript).
//! [`ReferenceLookup`] answers the two questions the classifier asks:
//!
//! - which transcript (and therefore which cluster) a reference id belongs to
//! - where a position on that transcript lies on the genome
//!
//! A reference id without an annotation is a fatal
//! [`LookupError::MissingReferenceMapping`].

pub mod lookup;

pub use lookup::{GenomePosition, LookupError, ReferenceLookup};
