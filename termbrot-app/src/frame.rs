//! Plain-text frame output: iteration counts to glyphs.

use termbrot_core::{ViewState, COLOR_SCHEME_COUNT};
use termbrot_render::IterationGrid;

/// Glyphs for one color scheme. `escape` runs from fastest to slowest
/// escape; `interior` marks the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRamp {
    pub escape: &'static [u8],
    pub interior: u8,
}

const RAMPS: [GlyphRamp; COLOR_SCHEME_COUNT as usize] = [
    GlyphRamp {
        escape: b" .:-=+*#%",
        interior: b'@',
    },
    GlyphRamp {
        escape: b" .,;ox%",
        interior: b'#',
    },
    GlyphRamp {
        escape: b"@%#*+=-:.",
        interior: b' ',
    },
    GlyphRamp {
        escape: b" 123456789",
        interior: b'0',
    },
    GlyphRamp {
        escape: b" ~",
        interior: b'M',
    },
];

impl GlyphRamp {
    pub fn for_scheme(scheme: u8) -> Self {
        RAMPS[scheme as usize % RAMPS.len()]
    }

    /// Glyph for one cell. Escaped counts map linearly onto the ramp.
    pub fn glyph(&self, iterations: u32, max_iterations: u32) -> u8 {
        if iterations >= max_iterations {
            return self.interior;
        }
        let t = iterations as f64 / max_iterations as f64;
        let idx = (t * self.escape.len() as f64) as usize;
        self.escape[idx.min(self.escape.len() - 1)]
    }
}

/// Render the whole grid, one line per row.
pub fn render_frame(grid: &IterationGrid, ramp: &GlyphRamp) -> String {
    let mut out = String::with_capacity(grid.data.len() + grid.rows as usize);
    for row in grid.rows_iter() {
        out.extend(row.iter().map(|&n| ramp.glyph(n, grid.max_iterations) as char));
        out.push('\n');
    }
    out
}

/// One-line summary of the view below the frame.
pub fn status_line(state: &ViewState) -> String {
    let vp = state.viewport();
    format!(
        "{} | center {} | zoom {:.4e} | iter {} | scheme {} | {}×{}",
        state.mode().label(),
        vp.center,
        vp.zoom(),
        state.max_iterations(),
        state.color_scheme(),
        vp.rows(),
        vp.cols(),
    )
}
