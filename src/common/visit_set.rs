use fixedbitset::FixedBitSet;

pub trait VisitSet<I> {
    /// Marks the item as visited. Returns `true` if it was not visited
    /// before.
    fn visit(&mut self, item: I) -> bool;
    fn is_visited(&self, item: &I) -> bool;
    fn visited_count(&self) -> usize;
    fn reset_visited(&mut self);
}

impl VisitSet<usize> for FixedBitSet {
    fn visit(&mut self, index: usize) -> bool {
        if index >= self.len() {
            self.grow(index + 1);
        }
        !self.put(index)
    }

    fn is_visited(&self, index: &usize) -> bool {
        self.contains(*index)
    }

    fn visited_count(&self) -> usize {
        self.count_ones(..)
    }

    fn reset_visited(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_bit_set_grows() {
        let mut visited = FixedBitSet::with_capacity(2);

        assert!(visited.visit(1));
        assert!(!visited.visit(1));
        assert!(visited.visit(10));
        assert!(visited.is_visited(&10));
        assert!(!visited.is_visited(&3));
        assert_eq!(visited.visited_count(), 2);

        visited.reset_visited();
        assert_eq!(visited.visited_count(), 0);
        assert!(!visited.is_visited(&1));
    }
}
