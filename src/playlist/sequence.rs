//! Doubly-linked track order backed by an arena.
//!
//! Nodes live in a `Vec` and link to each other by index, so there are no
//! ownership cycles. The sequence is immutable once built; a new folder load
//! builds a new one.

use crate::library::Track;

/// Handle to a node of the [`Sequence`] it came from.
///
/// Ids are only meaningful for the sequence that produced them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    track: Track,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug, Default)]
pub struct Sequence {
    nodes: Vec<Node>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl Sequence {
    /// Link `tracks` in the given order. Empty input gives an empty sequence.
    pub fn build(tracks: Vec<Track>) -> Self {
        let mut seq = Self {
            nodes: Vec::with_capacity(tracks.len()),
            head: None,
            tail: None,
        };
        for track in tracks {
            seq.append(track);
        }
        seq
    }

    fn append(&mut self, track: Track) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            track,
            prev: self.tail,
            next: None,
        });

        match self.tail.and_then(|t| self.nodes.get_mut(t.0)) {
            Some(tail) => tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    /// The node after `id`, or `None` at the tail.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.next)
    }

    /// The node before `id`, or `None` at the head.
    pub fn previous(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.prev)
    }

    pub fn get(&self, id: NodeId) -> Option<&Track> {
        self.nodes.get(id.0).map(|n| &n.track)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Zero-based position of `id` from the head.
    ///
    /// Nodes are appended in link order and never relinked, so the arena
    /// slot is the position.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        (id.0 < self.nodes.len()).then_some(id.0)
    }

    /// The node at zero-based `position` from the head.
    pub fn node_at(&self, position: usize) -> Option<NodeId> {
        (position < self.nodes.len()).then_some(NodeId(position))
    }

    /// Walk the links from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            seq: self,
            cursor: self.head,
        }
    }

    /// All node ids in link order.
    pub fn to_ordered_list(&self) -> Vec<NodeId> {
        self.iter().map(|(id, _)| id).collect()
    }
}

pub struct Iter<'a> {
    seq: &'a Sequence,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeId, &'a Track);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.seq.nodes.get(id.0)?;
        self.cursor = node.next;
        Some((id, &node.track))
    }
}
