use std::collections::BTreeMap;
use std::io;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::annotation::{LookupError, ReferenceLookup};
use crate::classify::multimap::count_genomic_loci;
use crate::classify::pairing::{PairClassifier, Pairing};
use crate::classify::ClassifyConfig;
use crate::core::fragment::Fragment;
use crate::core::types::{DiscordanceTag, Mate};
use crate::output::{AlignmentSink, Channels};
use crate::parsing::ParseError;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Fragment '{fragment}': {source}")]
    Lookup {
        fragment: String,
        #[source]
        source: LookupError,
    },

    #[error("Failed to read fragments: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Where a fragment was sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// A mate had no alignment; written whole to the unpaired channel
    Unmapped,
    /// A mate mapped to too many loci; written whole to the multimap channel
    Multimapping,
    /// Pairs written to the paired channel
    Paired(usize),
    /// Cross-gene pairs written to the discordant channel
    Discordant(usize),
    /// No valid pairing; written whole to the unpaired channel
    Unpaired,
}

/// Counts of where fragments and pairs were routed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub fragments: u64,
    pub unmapped: u64,
    pub multimapping: u64,
    pub unpaired: u64,
    pub paired_fragments: u64,
    pub discordant_fragments: u64,
    pub paired_pairs: u64,
    pub discordant_pairs: u64,
    pub pairs_by_tag: BTreeMap<DiscordanceTag, u64>,
}

impl DispatchSummary {
    fn record(&mut self, route: Route) {
        self.fragments += 1;
        match route {
            Route::Unmapped => self.unmapped += 1,
            Route::Multimapping => self.multimapping += 1,
            Route::Unpaired => self.unpaired += 1,
            Route::Paired(n) => {
                self.paired_fragments += 1;
                self.paired_pairs += n as u64;
            }
            Route::Discordant(n) => {
                self.discordant_fragments += 1;
                self.discordant_pairs += n as u64;
            }
        }
    }
}

/// Drives per-fragment classification and output routing
pub struct Dispatcher<'a> {
    lookup: &'a ReferenceLookup,
    classifier: PairClassifier<'a>,
    max_multihits: usize,
    summary: DispatchSummary,
}

impl<'a> Dispatcher<'a> {
    pub fn new(lookup: &'a ReferenceLookup, config: &ClassifyConfig) -> Self {
        Self {
            lookup,
            classifier: PairClassifier::new(lookup, config.library_type),
            max_multihits: config.max_multihits,
            summary: DispatchSummary::default(),
        }
    }

    pub fn summary(&self) -> &DispatchSummary {
        &self.summary
    }

    /// Classify one fragment and write it to exactly one set of channels
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Lookup` if an alignment references an
    /// unannotated reference, or `DispatchError::Io` if a write fails.
    pub fn dispatch<S: AlignmentSink>(
        &mut self,
        fragment: &Fragment,
        channels: &mut Channels<S>,
    ) -> Result<Route, DispatchError> {
        let route = self.route(fragment, channels)?;
        self.summary.record(route);
        Ok(route)
    }

    fn route<S: AlignmentSink>(
        &mut self,
        fragment: &Fragment,
        channels: &mut Channels<S>,
    ) -> Result<Route, DispatchError> {
        let with_context = |source| DispatchError::Lookup {
            fragment: fragment.name.clone(),
            source,
        };

        let mut hits = [0usize; 2];
        for mate in Mate::BOTH {
            hits[mate.index()] =
                count_genomic_loci(fragment.mate(mate), self.lookup).map_err(with_context)?;
        }

        if hits.contains(&0) {
            channels.unpaired.write_records(&fragment.records())?;
            return Ok(Route::Unmapped);
        }
        if hits.iter().any(|&h| h > self.max_multihits) {
            channels.multimap.write_records(&fragment.records())?;
            return Ok(Route::Multimapping);
        }

        let pairs = match self.classifier.classify(fragment).map_err(with_context)? {
            Pairing::Pairs(pairs) => pairs,
            Pairing::Unpaired(residual) => {
                channels.unpaired.write_records(&residual.records())?;
                return Ok(Route::Unpaired);
            }
        };

        let mut paired = 0;
        let mut discordant = 0;
        for pair in &pairs {
            *self.summary.pairs_by_tag.entry(pair.tag).or_default() += 1;
            let records = pair.to_records();
            if pair.is_chimeric() {
                channels.discordant.write_records(&records)?;
                discordant += 1;
            } else {
                channels.paired.write_records(&records)?;
                paired += 1;
            }
        }

        // cross-gene pairs never share a fragment with transcript or cluster pairs
        if discordant > 0 {
            Ok(Route::Discordant(discordant))
        } else {
            Ok(Route::Paired(paired))
        }
    }

    /// Dispatch every fragment of a stream
    ///
    /// # Errors
    ///
    /// Stops at the first read, lookup, or write failure.
    pub fn run<S, I>(
        &mut self,
        fragments: I,
        channels: &mut Channels<S>,
    ) -> Result<DispatchSummary, DispatchError>
    where
        S: AlignmentSink,
        I: IntoIterator<Item = Result<Fragment, ParseError>>,
    {
        info!("Finding discordant read pair combinations");
        for fragment in fragments {
            let fragment = fragment?;
            let route = self.dispatch(&fragment, channels)?;
            debug!(fragment = %fragment.name, ?route, "Dispatched fragment");
        }
        info!(
            fragments = self.summary.fragments,
            paired = self.summary.paired_pairs,
            discordant = self.summary.discordant_pairs,
            "Finished pairing reads"
        );
        Ok(self.summary.clone())
    }
}
