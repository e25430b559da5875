use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use termbrot_core::{FractalMode, ViewState, Viewport};

use crate::builder::build_for_state;
use crate::grid::IterationGrid;

/// The inputs a grid depends on. Color scheme and preset cursor are not
/// part of it: changing them never forces a recompute.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GridKey {
    viewport: Viewport,
    max_iterations: u32,
    mode: FractalMode,
}

impl GridKey {
    fn of(state: &ViewState) -> Self {
        Self {
            viewport: *state.viewport(),
            max_iterations: state.max_iterations(),
            mode: state.mode(),
        }
    }
}

/// Last fully computed grid, swapped atomically on rebuild.
///
/// A rebuild fills a freshly allocated buffer outside any lock and only
/// takes the write lock to replace the `Arc`. Readers clone the `Arc`, so
/// they see either the previous grid or the new one, never a mix.
#[derive(Debug)]
pub struct GridCache {
    current: RwLock<Arc<IterationGrid>>,
    key: Mutex<GridKey>,
    calculating: AtomicBool,
    builds: AtomicU64,
}

impl GridCache {
    /// Build the first grid for `state` eagerly so readers always have one.
    pub fn new(state: &ViewState) -> Self {
        let result = build_for_state(state);
        Self {
            current: RwLock::new(Arc::new(result.grid)),
            key: Mutex::new(GridKey::of(state)),
            calculating: AtomicBool::new(false),
            builds: AtomicU64::new(1),
        }
    }

    /// The most recent complete grid.
    pub fn grid(&self) -> Arc<IterationGrid> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// `true` while a rebuild is running.
    pub fn is_calculating(&self) -> bool {
        self.calculating.load(Ordering::Acquire)
    }

    /// `true` when the stored grid was built for different parameters.
    pub fn is_stale(&self, state: &ViewState) -> bool {
        *self.key.lock().unwrap_or_else(PoisonError::into_inner) != GridKey::of(state)
    }

    /// Total number of builds, including the initial one.
    pub fn build_count(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }

    /// Rebuild if `state` differs from what the stored grid was built for.
    ///
    /// Returns `true` when a new grid was swapped in. Callers serialize
    /// refreshes; the key lock is held across the build so two concurrent
    /// refreshes cannot interleave their swaps.
    pub fn refresh(&self, state: &ViewState) -> bool {
        let wanted = GridKey::of(state);
        let mut key = self.key.lock().unwrap_or_else(PoisonError::into_inner);
        if *key == wanted {
            debug!("Grid up to date, skipping rebuild");
            return false;
        }

        self.calculating.store(true, Ordering::Release);
        let result = build_for_state(state);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(result.grid);
        *key = wanted;
        self.builds.fetch_add(1, Ordering::Relaxed);
        self.calculating.store(false, Ordering::Release);
        true
    }
}
