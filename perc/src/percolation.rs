use std::fmt::Display;

use crate::{
    error::{check_positive, Result},
    grid::SiteGrid,
    union_find::DisjointSet,
};

////////////////////////////////////////////////////////////////////////////////

const TOP: usize = 0;

/// The operations the experiment driver needs from a grid.
pub trait PercolationGrid {
    fn size(&self) -> usize;
    fn open(&mut self, row: usize, col: usize) -> Result<()>;
    fn is_open(&self, row: usize, col: usize) -> Result<bool>;
    fn percolates(&mut self) -> bool;
}

////////////////////////////////////////////////////////////////////////////////

/// An `n`-by-`n` grid of sites backed by two union-find forests.
///
/// Both forests share the virtual top at index `0` and the sites at
/// `1..=n*n`. Only `percolation` has the virtual bottom at `n*n + 1`.
/// Fullness must be answered from `fullness` alone: once the bottom is
/// reachable from the top, every component touching the bottom row would
/// otherwise look full (backwash). Do not merge the two forests.
pub struct Percolation {
    grid: SiteGrid,
    fullness: DisjointSet,
    percolation: DisjointSet,
    open_sites: usize,
}

impl Percolation {
    /// Creates a grid with every site blocked.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        check_positive("grid size", size)?;
        let sites = size * size;
        Ok(Self {
            grid: SiteGrid::new(size),
            fullness: DisjointSet::new(sites + 1),
            percolation: DisjointSet::new(sites + 2),
            open_sites: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn number_of_open_sites(&self) -> usize {
        self.open_sites
    }

    fn bottom(&self) -> usize {
        self.percolation.len() - 1
    }

    /// Opens the site at `(row, col)` if it is not open already.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `row` or `col` is outside `[1, size]`. Nothing is
    /// modified in that case.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        self.grid.validate(row, col)?;
        if !self.grid.open(row, col) {
            return Ok(());
        }
        self.open_sites += 1;

        let site = self.grid.index(row, col);
        let neighbours = self
            .grid
            .open_neighbours(row, col)
            .map(|(r, c)| self.grid.index(r, c))
            .collect::<Vec<_>>();
        for other in neighbours {
            self.link(site, other)?;
        }

        if row == 1 {
            self.link(site, TOP)?;
        }
        if row == self.size() {
            // Bottom linkage goes into the percolation forest only.
            let bottom = self.bottom();
            self.percolation.union(site, bottom)?;
        }
        Ok(())
    }

    fn link(&mut self, a: usize, b: usize) -> Result<()> {
        self.fullness.union(a, b)?;
        self.percolation.union(a, b)
    }

    /// # Errors
    ///
    /// `IndexOutOfRange` if `row` or `col` is outside `[1, size]`.
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        self.grid.validate(row, col)?;
        Ok(self.grid.is_open(row, col))
    }

    /// Returns `true` if the site is open and connected to the top row
    /// through open sites.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `row` or `col` is outside `[1, size]`.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool> {
        self.grid.validate(row, col)?;
        let site = self.grid.index(row, col);
        self.fullness.connected(TOP, site)
    }

    /// Returns `true` if some open path joins the top row to the bottom row.
    pub fn percolates(&mut self) -> bool {
        let bottom = self.bottom();
        // Both indices exist for any size >= 1.
        self.percolation.connected(TOP, bottom).unwrap_or(false)
    }
}

impl PercolationGrid for Percolation {
    fn size(&self) -> usize {
        Percolation::size(self)
    }

    fn open(&mut self, row: usize, col: usize) -> Result<()> {
        Percolation::open(self, row, col)
    }

    fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        Percolation::is_open(self, row, col)
    }

    fn percolates(&mut self) -> bool {
        Percolation::percolates(self)
    }
}

impl Display for Percolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.grid.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forest_sizes() {
        let perc = Percolation::new(3).unwrap();
        assert_eq!(perc.fullness.len(), 10);
        assert_eq!(perc.percolation.len(), 11);
        assert_eq!(perc.bottom(), 10);
    }

    #[test]
    fn bottom_row_stays_out_of_fullness_forest() {
        let mut perc = Percolation::new(2).unwrap();
        perc.open(2, 1).unwrap();
        perc.open(2, 2).unwrap();
        // Only the bottom links were added, so the fullness forest just joined the row.
        assert_eq!(perc.fullness.count(), 4);
        assert_eq!(perc.percolation.count(), 4);
    }
}
