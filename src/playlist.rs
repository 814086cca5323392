//! The in-memory playlist index.
//!
//! A folder load produces one [`PlaylistIndex`]: the linked [`Sequence`] of
//! tracks, the [`TrackRegistry`] that resolves titles to nodes and the
//! [`TitleIndex`] trie for prefix search. The back-navigation [`History`] and
//! the [`PlayLedger`] live alongside it in the player and are cleared when a
//! new index is installed.

mod history;
mod ledger;
mod registry;
mod sequence;
mod title_index;

pub use history::History;
pub use ledger::PlayLedger;
pub use registry::TrackRegistry;
pub use sequence::{NodeId, Sequence};
pub use title_index::TitleIndex;

use crate::library::Track;

/// The three structures that are always rebuilt together from one folder.
#[derive(Debug, Default)]
pub struct PlaylistIndex {
    pub sequence: Sequence,
    pub registry: TrackRegistry,
    pub titles: TitleIndex,
}

impl PlaylistIndex {
    /// Build from tracks that are already sorted by title.
    pub fn build(tracks: Vec<Track>) -> Self {
        let sequence = Sequence::build(tracks);
        let registry = TrackRegistry::from_sequence(&sequence);
        let mut titles = TitleIndex::new();
        for (_, track) in sequence.iter() {
            titles.insert(&track.title);
        }

        Self {
            sequence,
            registry,
            titles,
        }
    }
}
