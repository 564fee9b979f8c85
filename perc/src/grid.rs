use std::fmt::Display;

use crate::error::{check_range, Result};

////////////////////////////////////////////////////////////////////////////////

/// 1-indexed `(row, col)` coordinate of a site.
pub type Site = (usize, usize);

/// Open/blocked states of an `n`-by-`n` square of sites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteGrid {
    size: usize,
    data: Vec<bool>,
}

impl SiteGrid {
    /// Creates a grid with every site blocked.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![false; size * size],
        }
    }

    /// Returns the side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks that `row` and `col` both lie in `[1, size]`.
    pub fn validate(&self, row: usize, col: usize) -> Result<()> {
        check_range(row, 1, self.size)?;
        check_range(col, 1, self.size)
    }

    /// Maps a site onto `[1, size * size]`, leaving `0` free for the
    /// virtual top.
    ///
    /// The caller must ensure that `row` and `col` are valid.
    pub fn index(&self, row: usize, col: usize) -> usize {
        (row - 1) * self.size + col
    }

    /// The caller must ensure that `row` and `col` are valid.
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.data[self.index(row, col) - 1]
    }

    /// Marks the site open. Returns `false` if it already was.
    ///
    /// The caller must ensure that `row` and `col` are valid.
    pub fn open(&mut self, row: usize, col: usize) -> bool {
        let idx = self.index(row, col) - 1;
        !std::mem::replace(&mut self.data[idx], true)
    }

    /// Iterates over the open axis-neighbours of a site.
    pub fn open_neighbours(&self, row: usize, col: usize) -> impl Iterator<Item = Site> + '_ {
        [(-1, 0), (0, -1), (0, 1), (1, 0)]
            .iter()
            .filter_map(move |(dr, dc)| {
                let r = row as isize + dr;
                let c = col as isize + dc;

                if r >= 1
                    && r <= self.size as isize
                    && c >= 1
                    && c <= self.size as isize
                    && self.is_open(r as usize, c as usize)
                {
                    return Some((r as usize, c as usize));
                }
                None
            })
    }
}

impl Display for SiteGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 1..=self.size {
            for col in 1..=self.size {
                if self.is_open(row, col) {
                    write!(f, ".")?;
                } else {
                    write!(f, "#")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
