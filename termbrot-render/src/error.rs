use thiserror::Error;

/// Errors surfaced by the session layer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Core(#[from] termbrot_core::CoreError),
}
