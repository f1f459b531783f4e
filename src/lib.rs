//! # mapview
//!
//! A pan/zoom viewport engine for image-backed game maps.
//!
//! The engine keeps one transform between screen, image, and world
//! coordinates, anchors wheel zoom at the cursor, and keeps markers a
//! constant on-screen size. Image loading, remote polling, and widgets are
//! collaborators that talk to it through small traits and events.

pub mod background;
pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{ViewportConfig, ZoomProfile},
    geo::{Point, Size, WorldBounds},
    viewport::{Transform, Viewport, ZoomDirection},
};

pub use crate::data::{conversion::CoordinateMapping, formats::MapDefinition};

pub use crate::layers::{
    image::{ImageRefresh, ImageSource, StaticImageSource},
    manager::{MarkerPlacement, MarkerStore},
    marker::{Marker, MarkerCategory},
};

pub use crate::input::{
    events::{InputEvent, ViewEvent},
    handler::ViewportEngine,
};

pub use crate::rendering::surface::{RecordingSurface, RenderSurface};

pub use crate::background::tasks::RefreshSource;

#[cfg(feature = "tokio-runtime")]
pub use crate::background::tasks::RefreshTask;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Invalid marker: {0}")]
    InvalidMarker(String),

    #[error("Source error: {0}")]
    Source(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger`, defaulting to `info` when `RUST_LOG` is unset
#[cfg(feature = "debug")]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    // A logger may already be installed by the host
    let _ = env_logger::Builder::from_env(env).try_init();
}
