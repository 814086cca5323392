use super::sequence::NodeId;

/// Where the user came from: a stack of previously current tracks.
///
/// Independent of sequence order, and unbounded for the session.
#[derive(Debug, Default)]
pub struct History {
    stack: Vec<NodeId>,
}

impl History {
    pub fn push(&mut self, id: NodeId) {
        self.stack.push(id);
    }

    /// The most recently pushed track, or `None` when there is nowhere to go back to.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.stack.pop()
    }

    pub fn peek(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}
