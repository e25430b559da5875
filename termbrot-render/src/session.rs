use std::sync::Arc;

use tracing::{debug, warn};

use termbrot_core::{
    Command, FractalMode, IterationLimits, Preset, PresetCatalog, ViewState, Viewport,
};

use crate::cache::GridCache;
use crate::grid::IterationGrid;

/// One viewer session: view state, preset catalog and the grid cache.
///
/// Mutators only touch the state; the grid follows on the next
/// [`recompute`](Self::recompute). Mutation takes `&mut self`, so commands
/// are serialized by construction. Readers on other threads can hold a
/// [`cache_handle`](Self::cache_handle) and will only ever observe
/// complete grids.
#[derive(Debug)]
pub struct Session {
    state: ViewState,
    catalog: PresetCatalog,
    cache: Arc<GridCache>,
}

impl Session {
    pub fn new(state: ViewState, catalog: PresetCatalog) -> Self {
        let cache = Arc::new(GridCache::new(&state));
        Self {
            state,
            catalog,
            cache,
        }
    }

    /// A session on the default view with the built-in presets.
    pub fn with_resolution(rows: u32, cols: u32) -> crate::Result<Self> {
        let viewport = Viewport::new(Viewport::DEFAULT_CENTER, Viewport::DEFAULT_ZOOM, rows, cols)?;
        Ok(Self::new(
            ViewState::new(viewport, IterationLimits::default()),
            PresetCatalog::builtin(),
        ))
    }

    // -- Commands --

    /// Apply `command` through the state reducer. On error the state is
    /// unchanged.
    pub fn apply(&mut self, command: Command) -> crate::Result<()> {
        match self.state.apply(command, &self.catalog) {
            Ok(next) => {
                self.state = next;
                Ok(())
            }
            Err(e) => {
                warn!(?command, "Rejected command: {e}");
                Err(e.into())
            }
        }
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.state.pan(dx, dy);
    }

    pub fn zoom_in(&mut self, factor: f64) {
        self.state.zoom_in(factor);
    }

    pub fn zoom_out(&mut self, factor: f64) {
        self.state.zoom_out(factor);
    }

    pub fn set_center(&mut self, re: f64, im: f64) -> crate::Result<()> {
        self.apply(Command::SetCenter { re, im })
    }

    pub fn set_zoom(&mut self, zoom: f64) -> crate::Result<()> {
        self.apply(Command::SetZoom(zoom))
    }

    pub fn reset(&mut self, rows: u32, cols: u32) -> crate::Result<()> {
        self.apply(Command::Reset { rows, cols })
    }

    pub fn resize(&mut self, rows: u32, cols: u32) -> crate::Result<()> {
        self.apply(Command::Resize { rows, cols })
    }

    pub fn toggle_mode(&mut self) {
        self.state.toggle_mode();
    }

    pub fn set_mode(&mut self, mode: FractalMode) {
        self.state.set_mode(mode);
    }

    pub fn set_color_scheme(&mut self, scheme: usize) {
        self.state.set_color_scheme(scheme);
    }

    pub fn cycle_color_scheme(&mut self) {
        self.state.cycle_color_scheme();
    }

    pub fn set_max_iterations(&mut self, n: u32) {
        self.state.set_max_iterations(n);
    }

    /// Move to the next preset. Returns it, or `None` on an empty
    /// catalog (state unchanged).
    pub fn next_preset(&mut self) -> crate::Result<Option<&Preset>> {
        Ok(self.state.next_preset(&self.catalog)?)
    }

    pub fn prev_preset(&mut self) -> crate::Result<Option<&Preset>> {
        Ok(self.state.prev_preset(&self.catalog)?)
    }

    // -- Grid --

    /// Bring the grid up to date with the current state and return it.
    ///
    /// Skips the build when nothing the grid depends on has changed.
    pub fn recompute(&self) -> Arc<IterationGrid> {
        if self.cache.refresh(&self.state) {
            debug!("Grid recomputed");
        }
        self.cache.grid()
    }

    /// The last complete grid. May lag the state until
    /// [`recompute`](Self::recompute) is called.
    pub fn grid(&self) -> Arc<IterationGrid> {
        self.cache.grid()
    }

    pub fn is_stale(&self) -> bool {
        self.cache.is_stale(&self.state)
    }

    pub fn is_calculating(&self) -> bool {
        self.cache.is_calculating()
    }

    /// Shared handle for readers on other threads.
    pub fn cache_handle(&self) -> Arc<GridCache> {
        Arc::clone(&self.cache)
    }

    // -- Accessors --

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn max_iterations(&self) -> u32 {
        self.state.max_iterations()
    }

    pub fn color_scheme(&self) -> u8 {
        self.state.color_scheme()
    }

    pub fn mode(&self) -> FractalMode {
        self.state.mode()
    }

    pub fn interesting_points(&self) -> &[Preset] {
        self.catalog.as_slice()
    }
}
