//! Single-slot reservoir sampling over a stream of candidate coordinates.

use rand::Rng;

use crate::region::Coordinate;

/// Fold state for picking one coordinate uniformly from a stream of matches.
///
/// After `n` matches every one of them is the current choice with
/// probability `1/n`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    matches: u64,
    chosen: Option<Coordinate>,
}

impl SearchState {
    /// Offers one matching coordinate to the reservoir.
    ///
    /// The first match is always taken; the `n`th replaces the current
    /// choice with probability `1/n`.
    pub fn offer<R: Rng + ?Sized>(mut self, candidate: Coordinate, rng: &mut R) -> Self {
        self.matches += 1;
        if self.chosen.is_none() || rng.random_range(0..self.matches) == 0 {
            self.chosen = Some(candidate);
        }
        self
    }

    /// Number of matches offered so far.
    pub fn matches(&self) -> u64 {
        self.matches
    }

    /// Current choice; `None` until the first match.
    pub fn chosen(&self) -> Option<Coordinate> {
        self.chosen
    }
}

/// Picks one element of `candidates` uniformly at random in a single pass.
pub fn sample_one<I, R>(candidates: I, rng: &mut R) -> SearchState
where
    I: IntoIterator<Item = Coordinate>,
    R: Rng + ?Sized,
{
    candidates
        .into_iter()
        .fold(SearchState::default(), |state, candidate| state.offer(candidate, rng))
}
