use crate::tile::Tile;

/// Per-cell iteration counts for a full frame, row-major.
///
/// This is the raw output of the builder before any glyph or color mapping.
/// A value equal to `max_iterations` is the "did not escape" sentinel;
/// every escaped count is strictly smaller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationGrid {
    pub rows: u32,
    pub cols: u32,
    pub max_iterations: u32,
    pub data: Vec<u32>,
}

impl IterationGrid {
    /// A grid with every cell set to the sentinel.
    pub fn new(rows: u32, cols: u32, max_iterations: u32) -> Self {
        let size = rows as usize * cols as usize;
        Self {
            rows,
            cols,
            max_iterations,
            data: vec![max_iterations; size],
        }
    }

    /// Iteration count at `(row, col)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Option<u32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[flat_index(self.cols, row, col)])
    }

    /// `true` when the cell holds the sentinel.
    #[inline]
    pub fn is_interior(&self, row: u32, col: u32) -> bool {
        self.get(row, col) == Some(self.max_iterations)
    }

    /// Iterate over rows as slices.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[u32]> {
        // `chunks_exact(0)` panics.
        self.data.chunks_exact(self.cols.max(1) as usize)
    }

    /// Copy tile data into the matching region of the grid.
    pub fn blit_tile(&mut self, tile: &Tile, tile_data: &[u32]) {
        for tr in 0..tile.rows {
            let row = tile.row + tr;
            if row >= self.rows {
                break;
            }
            let dst_start = flat_index(self.cols, row, tile.col);
            let src_start = (tr * tile.cols) as usize;
            let copy_w = tile.cols.min(self.cols - tile.col) as usize;
            self.data[dst_start..dst_start + copy_w]
                .copy_from_slice(&tile_data[src_start..src_start + copy_w]);
        }
    }
}

/// Row-major offset, computed in `usize` so large grids cannot wrap.
#[inline]
fn flat_index(cols: u32, row: u32, col: u32) -> usize {
    row as usize * cols as usize + col as usize
}
