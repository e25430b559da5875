use serde::{Deserialize, Serialize};

use crate::complex::Complex;

/// A named `(center, zoom)` pair pointing at a visually notable region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub center: Complex,
    pub zoom: f64,
}

impl Preset {
    pub fn new(name: impl Into<String>, re: f64, im: f64, zoom: f64) -> Self {
        Self {
            name: name.into(),
            center: Complex::new(re, im),
            zoom,
        }
    }
}

/// Immutable, ordered list of presets fixed at construction.
///
/// Navigation wraps modulo the catalog length. An empty catalog is valid:
/// [`next`](Self::next) and [`prev`](Self::prev) return `None` and the
/// caller keeps its state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// The built-in tour of the set.
    pub fn builtin() -> Self {
        Self::new(vec![
            Preset::new("overview", -0.5, 0.0, 1.0),
            Preset::new("seahorse-valley", -0.743_643_887, 0.131_825_904, 120.0),
            Preset::new("elephant-valley", 0.281_717_922, 0.577_105_284, 80.0),
            Preset::new("triple-spiral", -0.088, 0.654, 40.0),
            Preset::new("mini-mandelbrot", -1.768_778_833, -0.001_738_996, 900.0),
            Preset::new("scepter-valley", -1.36, 0.005, 25.0),
            Preset::new("double-spiral", -0.761_574, -0.084_759_6, 1500.0),
            Preset::new("lightning", -0.170_337, -1.065_060, 60.0),
        ])
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn as_slice(&self) -> &[Preset] {
        &self.presets
    }

    /// The preset after `current`, wrapping, and its index.
    pub fn next(&self, current: usize) -> Option<(&Preset, usize)> {
        if self.presets.is_empty() {
            return None;
        }
        let index = (current % self.presets.len() + 1) % self.presets.len();
        Some((&self.presets[index], index))
    }

    /// The preset before `current`, wrapping, and its index.
    pub fn prev(&self, current: usize) -> Option<(&Preset, usize)> {
        if self.presets.is_empty() {
            return None;
        }
        let len = self.presets.len();
        let index = (current % len + len - 1) % len;
        Some((&self.presets[index], index))
    }
}
