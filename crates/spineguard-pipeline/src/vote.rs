//! Majority-vote label smoothing.
//!
//! A short ring of raw classifier labels suppresses single-tick flips:
//! the debounced output is the label with the strictly greatest count in
//! the ring. Ties resolve to the most recently appended of the tied
//! labels, which keeps the output deterministic regardless of how the
//! ring happens to be ordered.

use std::collections::VecDeque;

use spineguard_core::PostureLabel;

/// Fixed-capacity majority-vote ring over raw classifier labels.
pub struct VoteSmoother {
    ring: VecDeque<PostureLabel>,
    capacity: usize,
}

impl VoteSmoother {
    /// Create a smoother holding the most recent `capacity` votes
    /// (clamped to at least 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ring: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a raw label and return the debounced label.
    ///
    /// The oldest vote is evicted once the ring is at capacity. The
    /// debounced output is computed over whatever the ring currently
    /// holds, so the very first vote passes through unchanged.
    pub fn push(&mut self, label: PostureLabel) -> PostureLabel {
        if self.ring.len() == self.capacity {
            self.ring.pop_front();
        }
        self.ring.push_back(label);
        self.majority()
    }

    /// The current majority label, most-recent-wins on an exact tie.
    fn majority(&self) -> PostureLabel {
        let mut good = (0_usize, 0_usize); // (count, last index)
        let mut bad = (0_usize, 0_usize);
        for (i, label) in self.ring.iter().enumerate() {
            match label {
                PostureLabel::Good => good = (good.0 + 1, i),
                PostureLabel::Bad => bad = (bad.0 + 1, i),
            }
        }
        // Lexicographic (count, last index): a strict majority wins on
        // count; a tie falls through to whichever label arrived last.
        if good > bad {
            PostureLabel::Good
        } else {
            PostureLabel::Bad
        }
    }

    /// Number of votes currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Whether the ring holds no votes yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Ring capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Discard all votes.
    pub fn reset(&mut self) {
        self.ring.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PostureLabel::{Bad, Good};

    #[test]
    fn first_vote_passes_through() {
        let mut votes = VoteSmoother::new(3);
        assert_eq!(votes.push(Bad), Bad);
        assert_eq!(votes.len(), 1);
    }

    #[test]
    fn strict_majority_wins() {
        let mut votes = VoteSmoother::new(3);
        votes.push(Good);
        votes.push(Bad);
        assert_eq!(votes.push(Good), Good, "2 good vs 1 bad");
    }

    #[test]
    fn tie_prefers_most_recent() {
        let mut votes = VoteSmoother::new(4);
        votes.push(Good);
        votes.push(Good);
        votes.push(Bad);
        assert_eq!(votes.push(Bad), Bad, "2-2 tie, bad appended last");

        let mut votes = VoteSmoother::new(4);
        votes.push(Bad);
        votes.push(Bad);
        votes.push(Good);
        assert_eq!(votes.push(Good), Good, "2-2 tie, good appended last");
    }

    #[test]
    fn eviction_keeps_only_newest() {
        let mut votes = VoteSmoother::new(3);
        votes.push(Bad);
        votes.push(Bad);
        votes.push(Bad);
        // Three goods push out the bads one by one.
        assert_eq!(votes.push(Good), Bad, "1 good vs 2 bad");
        assert_eq!(votes.push(Good), Good, "2 good vs 1 bad");
        assert_eq!(votes.push(Good), Good);
        assert_eq!(votes.len(), 3);
    }

    #[test]
    fn single_flip_is_suppressed() {
        let mut votes = VoteSmoother::new(3);
        votes.push(Good);
        votes.push(Good);
        // One bad tick among goods does not flip the output.
        assert_eq!(votes.push(Bad), Good);
    }

    #[test]
    fn matches_naive_recount() {
        // Cross-check the incremental ring against a from-scratch count
        // over the same trailing window.
        let sequence = [
            Good, Bad, Bad, Good, Bad, Good, Good, Bad, Bad, Bad, Good, Good,
        ];
        let capacity = 3;
        let mut votes = VoteSmoother::new(capacity);
        let mut history: Vec<PostureLabel> = Vec::new();

        for &label in &sequence {
            let debounced = votes.push(label);
            history.push(label);

            let window = &history[history.len().saturating_sub(capacity)..];
            let good = window.iter().filter(|&&l| l == Good).count();
            let bad = window.len() - good;
            let expected = if good > bad {
                Good
            } else if bad > good {
                Bad
            } else {
                *window.last().unwrap()
            };
            assert_eq!(debounced, expected, "window {window:?}");
        }
    }

    #[test]
    fn reset_clears_votes() {
        let mut votes = VoteSmoother::new(3);
        votes.push(Bad);
        votes.push(Bad);
        votes.reset();
        assert!(votes.is_empty());
        assert_eq!(votes.push(Good), Good);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut votes = VoteSmoother::new(0);
        assert_eq!(votes.capacity(), 1);
        assert_eq!(votes.push(Bad), Bad);
        assert_eq!(votes.push(Good), Good);
    }
}
