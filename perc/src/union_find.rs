use crate::error::{Error, Result};

////////////////////////////////////////////////////////////////////////////////

/// Weighted quick-union forest with path compression.
///
/// Elements are `0..len`, each starting in its own set. Sets only ever
/// merge; there is no way to split them again.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            count: n,
        }
    }

    /// Returns the number of elements in the universe.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the number of disjoint sets.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the root of the set containing `node`.
    ///
    /// Every node on the path from `node` to the root is repointed directly
    /// at the root.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `node >= len()`.
    pub fn find(&mut self, node: usize) -> Result<usize> {
        self.validate(node)?;
        Ok(self.root(node))
    }

    /// Returns `true` if `a` and `b` belong to the same set.
    pub fn connected(&mut self, a: usize, b: usize) -> Result<bool> {
        self.validate(a)?;
        self.validate(b)?;
        Ok(self.root(a) == self.root(b))
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// The smaller tree goes under the larger one; on a tie `b`'s root goes
    /// under `a`'s root.
    pub fn union(&mut self, a: usize, b: usize) -> Result<()> {
        self.validate(a)?;
        self.validate(b)?;

        let (left, right) = (self.root(a), self.root(b));
        if left == right {
            return Ok(());
        }

        let (big, small) = if self.size[left] < self.size[right] {
            (right, left)
        } else {
            (left, right)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.count -= 1;
        Ok(())
    }

    fn root(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    fn validate(&self, node: usize) -> Result<()> {
        if node >= self.len() {
            return Err(Error::IndexOutOfRange {
                index: node,
                min: 0,
                max: self.len().saturating_sub(1),
            });
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons() {
        let mut set = DisjointSet::new(4);
        assert_eq!(set.len(), 4);
        assert_eq!(set.count(), 4);
        for i in 0..4 {
            assert_eq!(set.find(i).unwrap(), i);
            for j in 0..4 {
                assert_eq!(set.connected(i, j).unwrap(), i == j);
            }
        }
    }

    #[test]
    fn union_is_transitive() {
        let mut set = DisjointSet::new(6);
        set.union(0, 1).unwrap();
        set.union(2, 3).unwrap();
        assert!(!set.connected(1, 2).unwrap());

        set.union(1, 3).unwrap();
        assert!(set.connected(0, 2).unwrap());
        assert!(set.connected(3, 0).unwrap());
        assert!(!set.connected(0, 4).unwrap());
        assert_eq!(set.count(), 3);
    }

    #[test]
    fn repeated_union_is_noop() {
        let mut set = DisjointSet::new(3);
        set.union(0, 1).unwrap();
        set.union(1, 0).unwrap();
        set.union(0, 0).unwrap();
        assert_eq!(set.count(), 2);
        let root = set.root(0);
        assert_eq!(set.size[root], 2);
    }

    #[test]
    fn tie_attaches_second_under_first() {
        let mut set = DisjointSet::new(2);
        set.union(0, 1).unwrap();
        assert_eq!(set.find(1).unwrap(), 0);
    }

    #[test]
    fn smaller_goes_under_larger() {
        let mut set = DisjointSet::new(4);
        set.union(1, 2).unwrap();
        set.union(1, 3).unwrap();
        set.union(0, 1).unwrap();
        assert_eq!(set.find(0).unwrap(), 1);
    }

    #[test]
    fn find_compresses_path() {
        let mut set = DisjointSet::new(4);
        // Build the chain 3 -> 2 -> 1 -> 0 by hand.
        set.parent = vec![0, 0, 1, 2];
        set.size = vec![4, 3, 2, 1];
        set.count = 1;

        assert_eq!(set.find(3).unwrap(), 0);
        assert_eq!(set.parent, vec![0, 0, 0, 0]);
    }

    #[test]
    fn out_of_range() {
        let mut set = DisjointSet::new(3);
        assert!(set.find(3).unwrap_err().is_out_of_range());
        assert!(set.union(0, 3).unwrap_err().is_out_of_range());
        assert!(set.connected(5, 0).unwrap_err().is_out_of_range());
        assert_eq!(set.count(), 3);

        let mut empty = DisjointSet::new(0);
        assert!(empty.is_empty());
        assert!(empty.find(0).unwrap_err().is_out_of_range());
    }
}
