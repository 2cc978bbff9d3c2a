//! Ancestors of the node currently being searched, for repetition detection.

/// Stack of the positions on the path from the search root to the current node.
/// Its depth never exceeds the search depth plus one.
#[derive(Debug, Clone)]
pub struct PositionHistory<P> {
    stack: Vec<P>,
}

impl<P: PartialEq> Default for PositionHistory<P> {
    fn default() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<P: PartialEq> PositionHistory<P> {
    pub fn with_capacity(max_plies: usize) -> Self {
        Self {
            stack: Vec::with_capacity(max_plies),
        }
    }

    pub fn push(&mut self, position: P) {
        self.stack.push(position);
    }

    pub fn pop(&mut self) -> Option<P> {
        self.stack.pop()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Whether `position` already occurred an even number of plies above the
    /// node about to be searched, that is with the same side to move. The last
    /// pushed position is the parent, one ply up.
    pub fn is_repetition(&self, position: &P) -> bool {
        self.stack
            .iter()
            .rev()
            .skip(1)
            .step_by(2)
            .any(|ancestor| ancestor == position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_even_distances_repeat() {
        let mut history = PositionHistory::default();
        history.push('a');
        history.push('b');
        history.push('c');
        // parent is 'c', grandparent 'b', great-grandparent 'a'
        assert!(history.is_repetition(&'b'));
        assert!(!history.is_repetition(&'c'));
        assert!(!history.is_repetition(&'a'));

        history.push('d');
        assert!(history.is_repetition(&'a'));
        assert!(history.is_repetition(&'c'));
        assert!(!history.is_repetition(&'b'));
    }

    #[test]
    fn test_empty_history_never_repeats() {
        let history: PositionHistory<u8> = PositionHistory::with_capacity(4);
        assert!(history.is_empty());
        assert!(!history.is_repetition(&0));
    }
}
