use std::collections::HashMap;

use tracing::debug;

use super::sequence::{NodeId, Sequence};

/// Resolves a title to its node in the current sequence.
///
/// Titles are assumed unique. When two files share a title the later one in
/// sequence order wins; the earlier node stays in the sequence but can no
/// longer be reached by title.
#[derive(Debug, Default)]
pub struct TrackRegistry {
    by_title: HashMap<String, NodeId>,
}

impl TrackRegistry {
    pub fn from_sequence(sequence: &Sequence) -> Self {
        let mut by_title = HashMap::with_capacity(sequence.len());
        for (id, track) in sequence.iter() {
            if by_title.insert(track.title.clone(), id).is_some() {
                debug!(title = %track.title, "duplicate title, keeping the later file");
            }
        }
        Self { by_title }
    }

    pub fn lookup(&self, title: &str) -> Option<NodeId> {
        self.by_title.get(title).copied()
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }
}
