use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;
use crate::julia::Julia;
use crate::mandelbrot::Mandelbrot;

/// Squared escape radius. `|z| > 2` guarantees divergence of `z² + c`.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Which iteration rule the kernel runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalMode {
    /// `z₀ = 0`, `z ← z² + c` with `c` the cell's plane point.
    #[default]
    Mandelbrot,
    /// `z₀` is the cell's plane point, `z ← z² + k` with a fixed seed `k`.
    Julia,
}

impl FractalMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Mandelbrot => Self::Julia,
            Self::Julia => Self::Mandelbrot,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
        }
    }
}

/// Trait implemented by every iteration rule.
///
/// Designed for **static dispatch**: the grid builder is generic over
/// `F: Fractal` so the compiler can inline the hot loop.
pub trait Fractal {
    /// Iterate a single plane point.
    ///
    /// Returns the loop index at which `|z|² > 4` first held, which is
    /// always `< max_iterations()`, or exactly `max_iterations()` when the
    /// orbit never escaped.
    fn iterate(&self, point: Complex) -> u32;

    /// The iteration cap, which doubles as the "interior" sentinel.
    fn max_iterations(&self) -> u32;
}

/// Iterate `c` under `mode` without constructing a kernel by hand.
pub fn escape_time(c: Complex, max_iterations: u32, mode: FractalMode) -> u32 {
    match mode {
        FractalMode::Mandelbrot => Mandelbrot::new(max_iterations).iterate(c),
        FractalMode::Julia => Julia::with_default_seed(max_iterations).iterate(c),
    }
}

/// Allowed range for the user-adjustable iteration cap.
///
/// Deserialization goes through [`IterationLimits::new`] so a config file
/// can never produce an empty or zero-based range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IterationLimits {
    min: u32,
    max: u32,
}

impl<'de> Deserialize<'de> for IterationLimits {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            min: u32,
            max: u32,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.min, raw.max).map_err(serde::de::Error::custom)
    }
}

impl IterationLimits {
    pub const DEFAULT_MIN: u32 = 10;
    pub const DEFAULT_MAX: u32 = 5000;
    pub const DEFAULT_ITERATIONS: u32 = 100;

    pub fn new(min: u32, max: u32) -> crate::Result<Self> {
        if min < 1 || min > max {
            return Err(CoreError::InvalidIterationLimits { min, max });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    pub fn clamp(&self, n: u32) -> u32 {
        n.clamp(self.min, self.max)
    }
}

impl Default for IterationLimits {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}
