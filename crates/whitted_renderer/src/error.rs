//! Error types for scene configuration and rendering.

use thiserror::Error;

/// Errors raised while freezing a [`SceneBuilder`](crate::SceneBuilder).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Camera must be configured before the scene can be rendered")]
    MissingCamera,

    #[error("Camera basis is degenerate: towards and up vectors must be non-zero and not parallel")]
    DegenerateCamera,

    #[error("Anti-aliasing factor must be 1, 2 or 3, got {0}")]
    InvalidAntiAliasingFactor(u32),

    #[error("Max recursion level must be at least 1")]
    InvalidRecursionLevel,
}

/// Errors that abort a render. A render never returns a partial image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("View plane width must be positive and finite, got {0}")]
    InvalidViewPlane(f32),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Render interrupted")]
    Interrupted,

    #[error("Non-finite color computed for pixel ({x}, {y})")]
    NonFiniteColor { x: u32, y: u32 },

    #[error("Pixel task ({x}, {y}) panicked: {message}")]
    TaskPanicked { x: u32, y: u32, message: String },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
