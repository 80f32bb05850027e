//! Greedy-forward slicer.
//!
//! For every chunk the largest prefix of the remaining items that fits is
//! found with an expanding/contracting search: start with the whole remainder,
//! halve the step after each measurement, grow the window on a fit and shrink
//! it otherwise. The search can stop one or two items short of the true
//! boundary, so the result is then settled upward while the next prefix still
//! fits. Fit is monotone in the prefix length, so the settled prefix is maximal.
//!
//! Each item is encoded exactly once. A prefix of `w` items encodes as a list
//! of `2 + Σlen + (w - 1)` characters (`2` when empty), which is what
//! `encode(Tag::List(prefix))` would produce.

use std::vec::IntoIter;

use tracing::debug;

use crate::errors::{CombinerError, Result};
use crate::nbt::{encoded_len, Tag};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Character budget shared by every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkBudget {
    /// Hard upper bound on a chunk's measured length.
    pub limit: usize,
    /// Fixed characters surrounding the chunk's list in the final output.
    pub overhead: usize,
}

/// One packed group: source items followed by the shared suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    tags: Vec<Tag>,
    source_count: usize,
    measured_len: usize,
}

impl Chunk {
    /// The source items placed in this chunk, in input order.
    pub fn source_items(&self) -> &[Tag] {
        &self.tags[..self.source_count]
    }

    pub fn suffix(&self) -> &[Tag] {
        &self.tags[self.source_count..]
    }

    pub fn source_count(&self) -> usize {
        self.source_count
    }

    /// `overhead + len(encode(suffix)) + len(encode(source_items))`, an upper
    /// bound on the chunk's rendered size.
    pub fn measured_len(&self) -> usize {
        self.measured_len
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Source items followed by the suffix.
    pub fn into_tags(self) -> Vec<Tag> {
        self.tags
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Chunker
// ────────────────────────────────────────────────────────────────────────────

/// Lazy, forward-only sequence of chunks. Consumes its input.
///
/// Yields `Err(OverBudgetItem)` once if the next item cannot fit even alone,
/// then ends.
#[derive(Debug)]
pub struct Chunker {
    items: IntoIter<Tag>,
    /// `prefix[i]` is the summed encoded length of items `0..i`.
    prefix: Vec<usize>,
    consumed: usize,
    suffix: Vec<Tag>,
    fixed_len: usize,
    budget: ChunkBudget,
    finished: bool,
}

impl Chunker {
    /// Encodes every item and the suffix once; encoding failures surface here.
    pub fn new(items: Vec<Tag>, budget: ChunkBudget, suffix: Vec<Tag>) -> Result<Self> {
        let mut prefix = Vec::with_capacity(items.len() + 1);
        prefix.push(0);
        let mut total = 0;
        for item in &items {
            total += encoded_len(item)?;
            prefix.push(total);
        }

        let suffix_len = encoded_len(&Tag::List(suffix.clone()))?;

        Ok(Self {
            items: items.into_iter(),
            prefix,
            consumed: 0,
            suffix,
            fixed_len: budget.overhead + suffix_len,
            budget,
            finished: false,
        })
    }

    fn remaining(&self) -> usize {
        self.prefix.len() - 1 - self.consumed
    }

    /// Encoded length of a list holding the next `window` items.
    fn list_len(&self, window: usize) -> usize {
        if window == 0 {
            return 2;
        }
        let start = self.consumed;
        2 + self.prefix[start + window] - self.prefix[start] + (window - 1)
    }

    fn measure(&self, window: usize) -> usize {
        self.fixed_len + self.list_len(window)
    }

    fn fits(&self, window: usize) -> bool {
        self.measure(window) <= self.budget.limit
    }

    /// Largest fitting prefix of the remaining items.
    fn best_window(&self) -> usize {
        let remaining = self.remaining();
        let mut step = remaining;
        let mut window = remaining;
        let mut best = 0;

        while step > 0 && window <= remaining {
            let fits = self.fits(window);
            step /= 2;
            if fits {
                best = window;
                window += step;
            } else {
                window = window.saturating_sub(step);
            }
        }

        while best < remaining && self.fits(best + 1) {
            best += 1;
        }
        best
    }

    fn over_budget(&self) -> CombinerError {
        let index = self.consumed;
        CombinerError::OverBudgetItem {
            index,
            encoded_len: self.prefix[index + 1] - self.prefix[index],
            budget: self.budget.limit.saturating_sub(self.fixed_len + 2),
        }
    }
}

impl Iterator for Chunker {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Result<Chunk>> {
        if self.finished || self.remaining() == 0 {
            return None;
        }

        let window = self.best_window();
        if window == 0 {
            self.finished = true;
            return Some(Err(self.over_budget()));
        }

        let measured_len = self.measure(window);
        let mut tags: Vec<Tag> = self.items.by_ref().take(window).collect();
        tags.extend(self.suffix.iter().cloned());

        debug!(
            first_item = self.consumed,
            items = window,
            measured_len,
            limit = self.budget.limit,
            "Packed chunk"
        );
        self.consumed += window;

        Some(Ok(Chunk {
            tags,
            source_count: window,
            measured_len,
        }))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nbt::encode;
    use proptest::prelude::*;

    fn words(lens: &[usize]) -> Vec<Tag> {
        lens.iter().map(|n| Tag::text("a".repeat(*n))).collect()
    }

    fn collect(chunks: impl Iterator<Item = Result<Chunk>>) -> Vec<Chunk> {
        chunks.map(|c| c.expect("chunk fits")).collect()
    }

    // ── measurement ─────────────────────────────────────────────────────────

    #[test]
    fn test_list_len_matches_encoder() {
        let items = words(&[3, 1, 4, 1, 5]);
        let chunker = Chunker::new(
            items.clone(),
            ChunkBudget {
                limit: 1000,
                overhead: 0,
            },
            vec![],
        )
        .unwrap();
        for w in 0..=items.len() {
            let expected = encode(&Tag::List(items[..w].to_vec())).unwrap().len();
            assert_eq!(chunker.list_len(w), expected, "window {w}");
        }
    }

    // ── packing ─────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input_yields_nothing() {
        let chunker = Chunker::new(
            vec![],
            ChunkBudget {
                limit: 10,
                overhead: 0,
            },
            words(&[2]),
        )
        .unwrap();
        assert_eq!(chunker.count(), 0);
    }

    #[test]
    fn test_everything_fits_in_one_chunk() {
        let chunks = collect(
            Chunker::new(
                words(&[1, 1, 1]),
                ChunkBudget {
                    limit: 100,
                    overhead: 10,
                },
                words(&[2]),
            )
            .unwrap(),
        );
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].source_count(), 3);
        assert_eq!(chunks[0].suffix(), words(&[2]).as_slice());
        // overhead 10 + "[aa]" 4 + "[a,a,a]" 7
        assert_eq!(chunks[0].measured_len(), 21);
    }

    #[test]
    fn test_splits_at_predicted_boundaries() {
        // Each item is 4 chars. With no suffix ("[]" = 2) and overhead 3, a
        // window of w items measures 3 + 2 + 2 + 4w + (w - 1) = 6 + 5w.
        // limit 21 admits w = 3.
        let chunks = collect(
            Chunker::new(
                words(&[4; 7]),
                ChunkBudget {
                    limit: 21,
                    overhead: 3,
                },
                vec![],
            )
            .unwrap(),
        );
        let counts: Vec<usize> = chunks.iter().map(Chunk::source_count).collect();
        assert_eq!(counts, vec![3, 3, 1]);
        assert!(chunks.iter().all(|c| c.measured_len() <= 21));
    }

    #[test]
    fn test_search_undershoot_is_settled() {
        // Three one-char items; one measures 5, two measure 7. The halving
        // search alone measures windows 3 and 2, then stops with nothing
        // recorded.
        let chunks = collect(
            Chunker::new(
                words(&[1, 1, 1]),
                ChunkBudget {
                    limit: 5,
                    overhead: 0,
                },
                vec![],
            )
            .unwrap()
            .take(1),
        );
        assert_eq!(chunks[0].source_count(), 1);
    }

    #[test]
    fn test_over_budget_item_fails_then_ends() {
        let mut chunker = Chunker::new(
            words(&[2, 50, 2]),
            ChunkBudget {
                limit: 20,
                overhead: 5,
            },
            vec![],
        )
        .unwrap();

        let first = chunker.next().unwrap().unwrap();
        assert_eq!(first.source_count(), 1);

        let err = chunker.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            CombinerError::OverBudgetItem {
                index: 1,
                encoded_len: 50,
                budget: 11
            }
        ));
        assert!(chunker.next().is_none());
    }

    #[test]
    fn test_encoding_failure_surfaces_at_construction() {
        let items = vec![Tag::Integer(300, crate::nbt::IntWidth::Byte)];
        let result = Chunker::new(
            items,
            ChunkBudget {
                limit: 100,
                overhead: 0,
            },
            vec![],
        );
        assert!(matches!(result, Err(CombinerError::EncodingRange { .. })));
    }

    proptest! {
        #[test]
        fn prop_chunks_are_complete_bounded_and_maximal(
            lens in proptest::collection::vec(1usize..20, 0..40),
            suffix_lens in proptest::collection::vec(1usize..6, 0..3),
            overhead in 0usize..10,
            limit in 20usize..120,
        ) {
            let items = words(&lens);
            let suffix = words(&suffix_lens);
            let budget = ChunkBudget { limit, overhead };
            let chunker = Chunker::new(items.clone(), budget, suffix.clone()).unwrap();

            let mut rebuilt = Vec::new();
            for result in chunker {
                match result {
                    Ok(chunk) => {
                        prop_assert!(chunk.source_count() > 0);
                        prop_assert!(chunk.measured_len() <= limit);
                        let rendered = encode(&Tag::List(chunk.tags().to_vec())).unwrap();
                        prop_assert!(overhead + rendered.len() <= limit);
                        prop_assert_eq!(chunk.suffix(), suffix.as_slice());

                        // Maximal: one more item would not have fit.
                        let next = rebuilt.len() + chunk.source_count();
                        if next < items.len() {
                            let mut grown = chunk.source_items().to_vec();
                            grown.push(items[next].clone());
                            let grown_len = overhead
                                + encode(&Tag::List(suffix.clone())).unwrap().len()
                                + encode(&Tag::List(grown)).unwrap().len();
                            prop_assert!(grown_len > limit);
                        }
                        rebuilt.extend_from_slice(chunk.source_items());
                    }
                    Err(CombinerError::OverBudgetItem { index, .. }) => {
                        prop_assert_eq!(index, rebuilt.len());
                        let alone = overhead
                            + encode(&Tag::List(suffix.clone())).unwrap().len()
                            + lens[index] + 2;
                        prop_assert!(alone > limit);
                        return Ok(());
                    }
                    Err(other) => prop_assert!(false, "unexpected error {other}"),
                }
            }
            prop_assert_eq!(rebuilt, items);
        }
    }
}
