pub mod complex;
pub mod error;
pub mod fractal;
pub mod julia;
pub mod mandelbrot;
pub mod preset;
pub mod state;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{escape_time, Fractal, FractalMode, IterationLimits, ESCAPE_RADIUS_SQ};
pub use julia::Julia;
pub use mandelbrot::Mandelbrot;
pub use preset::{Preset, PresetCatalog};
pub use state::{Command, ViewState, COLOR_SCHEME_COUNT};
pub use viewport::Viewport;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
