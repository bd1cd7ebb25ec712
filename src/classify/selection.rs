use crate::classify::pairing::ClassifiedPair;

/// Keep the pairs whose summed alignment score is the maximum.
///
/// Ties are all retained, in their original order.
pub fn select_best_scoring_pairs(pairs: Vec<ClassifiedPair<'_>>) -> Vec<ClassifiedPair<'_>> {
    let Some(best) = pairs.iter().map(ClassifiedPair::score).max() else {
        return pairs;
    };
    pairs.into_iter().filter(|p| p.score() == best).collect()
}
