pub mod builder;
pub mod cache;
pub mod error;
pub mod grid;
pub mod session;
pub mod tile;

pub use builder::{build_for_state, build_grid, BuildResult};
pub use cache::GridCache;
pub use error::RenderError;
pub use grid::IterationGrid;
pub use session::Session;
pub use tile::TILE_SIZE;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
