use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use termbrot_core::{Fractal, FractalMode, Julia, Mandelbrot, ViewState, Viewport};

use crate::grid::IterationGrid;
use crate::tile::{build_tile_grid, Tile};

/// The result of a full-grid build.
#[derive(Debug)]
pub struct BuildResult {
    pub grid: IterationGrid,
    pub elapsed: Duration,
    pub tiles: usize,
}

/// Compute one tile's cells, row-major within the tile.
fn compute_tile<F: Fractal>(fractal: &F, viewport: &Viewport, tile: &Tile) -> Vec<u32> {
    let mut data = Vec::with_capacity(tile.cell_count());
    for r in 0..tile.rows {
        for c in 0..tile.cols {
            let point = viewport.cell_to_complex(tile.row + r, tile.col + c);
            data.push(fractal.iterate(point));
        }
    }
    data
}

/// Build a full grid using the tiled, multithreaded pipeline.
///
/// The builder is generic over the fractal type for static dispatch.
/// Tiles are computed in parallel via Rayon; each worker owns its tile's
/// buffer, and the tiles are blitted into a fresh grid afterwards. The
/// returned grid is never shared with anyone until the caller swaps it in.
pub fn build_grid<F: Fractal + Sync>(fractal: &F, viewport: &Viewport) -> BuildResult {
    let start = Instant::now();

    let tiles = build_tile_grid(viewport.rows(), viewport.cols());
    debug!(
        tile_count = tiles.len(),
        rows = viewport.rows(),
        cols = viewport.cols(),
        "Starting tiled grid build"
    );

    let tile_data: Vec<Vec<u32>> = tiles
        .par_iter()
        .map(|tile| compute_tile(fractal, viewport, tile))
        .collect();

    let mut grid = IterationGrid::new(viewport.rows(), viewport.cols(), fractal.max_iterations());
    for (tile, data) in tiles.iter().zip(tile_data.iter()) {
        grid.blit_tile(tile, data);
    }

    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        tiles = tiles.len(),
        max_iterations = fractal.max_iterations(),
        "Grid build complete"
    );

    BuildResult {
        grid,
        elapsed,
        tiles: tiles.len(),
    }
}

/// Build the grid for `state`, picking the kernel from its mode.
pub fn build_for_state(state: &ViewState) -> BuildResult {
    let max = state.max_iterations();
    match state.mode() {
        FractalMode::Mandelbrot => build_grid(&Mandelbrot::new(max), state.viewport()),
        FractalMode::Julia => build_grid(&Julia::with_default_seed(max), state.viewport()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termbrot_core::{escape_time, Complex};

    #[test]
    fn basic_build_produces_iteration_data() {
        let viewport = Viewport::default_mandelbrot(24, 80);
        let result = build_grid(&Mandelbrot::new(100), &viewport);

        assert_eq!(result.grid.data.len(), 24 * 80);
        assert_eq!(result.grid.max_iterations, 100);
        assert!(result.tiles > 1);
    }

    #[test]
    fn parallel_matches_serial() {
        let viewport = Viewport::new(Complex::new(-0.75, 0.1), 12.0, 37, 91).unwrap();
        let result = build_grid(&Mandelbrot::new(300), &viewport);
        for row in 0..viewport.rows() {
            for col in 0..viewport.cols() {
                let expected =
                    escape_time(viewport.cell_to_complex(row, col), 300, FractalMode::Mandelbrot);
                assert_eq!(result.grid.get(row, col), Some(expected), "cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn far_region_escapes_everywhere() {
        let viewport = Viewport::new(Complex::new(5.0, 5.0), 50.0, 20, 20).unwrap();
        let result = build_grid(&Mandelbrot::new(256), &viewport);
        assert!(result.grid.data.iter().all(|&n| n == 0));
    }

    #[test]
    fn state_mode_selects_kernel() {
        let state = ViewState::default();
        let m = build_for_state(&state);
        let j = build_for_state(&state.with_mode(FractalMode::Julia));
        assert_ne!(m.grid, j.grid);
        assert_eq!(m.grid.data.len(), j.grid.data.len());
    }
}
