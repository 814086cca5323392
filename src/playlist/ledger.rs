use std::collections::{BinaryHeap, HashMap};

/// Play counts per title for the current session.
#[derive(Debug, Default)]
pub struct PlayLedger {
    counts: HashMap<String, u32>,
}

impl PlayLedger {
    /// Count one successful play of `title` and return the new total.
    pub fn record_play(&mut self, title: &str) -> u32 {
        let count = self.counts.entry(title.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Plays so far, or `None` if `title` never started playing.
    pub fn count(&self, title: &str) -> Option<u32> {
        self.counts.get(title).copied()
    }

    /// Up to `k` titles with the highest counts, highest first.
    ///
    /// The relative order of titles with equal counts is not guaranteed.
    pub fn top_k(&self, k: usize) -> Vec<(String, u32)> {
        let mut heap: BinaryHeap<(u32, &str)> = self
            .counts
            .iter()
            .map(|(title, &count)| (count, title.as_str()))
            .collect();

        let mut ranked = Vec::with_capacity(k.min(heap.len()));
        while ranked.len() < k {
            let Some((count, title)) = heap.pop() else {
                break;
            };
            ranked.push((title.to_string(), count));
        }
        ranked
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
