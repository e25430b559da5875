/// Tile edge length in cells.
///
/// Terminal grids are small (a few thousand cells), so tiles are kept
/// short enough that even an 80×24 grid splits into a dozen work items.
pub const TILE_SIZE: u32 = 16;

/// A rectangular block of cells within the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Row of the top-left cell.
    pub row: u32,
    /// Column of the top-left cell.
    pub col: u32,
    /// Height in cells (may be smaller at the bottom edge).
    pub rows: u32,
    /// Width in cells (may be smaller at the right edge).
    pub cols: u32,
}

impl Tile {
    /// Number of cells in this tile.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// Partition a `rows × cols` grid into tiles, row-major.
pub fn build_tile_grid(rows: u32, cols: u32) -> Vec<Tile> {
    let mut tiles = Vec::new();
    let mut row = 0;
    while row < rows {
        let th = TILE_SIZE.min(rows - row);
        let mut col = 0;
        while col < cols {
            let tw = TILE_SIZE.min(cols - col);
            tiles.push(Tile {
                row,
                col,
                rows: th,
                cols: tw,
            });
            col += tw;
        }
        row += th;
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_grid_covers_grid() {
        let tiles = build_tile_grid(37, 101);
        let total: usize = tiles.iter().map(|t| t.cell_count()).sum();
        assert_eq!(total, 37 * 101);
    }

    #[test]
    fn tile_grid_no_overlap() {
        let (rows, cols) = (37, 101);
        let tiles = build_tile_grid(rows, cols);
        let mut covered = vec![false; (rows * cols) as usize];
        for tile in &tiles {
            for r in tile.row..tile.row + tile.rows {
                for c in tile.col..tile.col + tile.cols {
                    let idx = (r * cols + c) as usize;
                    assert!(!covered[idx], "cell ({r}, {c}) covered twice");
                    covered[idx] = true;
                }
            }
        }
        assert!(covered.iter().all(|&c| c), "all cells must be covered");
    }

    #[test]
    fn tile_size_respects_constant() {
        for tile in build_tile_grid(64, 200) {
            assert!(tile.rows <= TILE_SIZE);
            assert!(tile.cols <= TILE_SIZE);
        }
    }

    #[test]
    fn single_cell_grid() {
        assert_eq!(
            build_tile_grid(1, 1),
            vec![Tile {
                row: 0,
                col: 0,
                rows: 1,
                cols: 1
            }]
        );
    }

    #[test]
    fn empty_grid_has_no_tiles() {
        assert!(build_tile_grid(0, 10).is_empty());
    }
}
