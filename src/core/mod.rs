pub mod config;
pub mod constants;
pub mod geo;
pub mod viewport;

pub use config::{ViewportConfig, ZoomProfile};
pub use geo::{Point, Size, WorldBounds};
pub use viewport::{Transform, Viewport, ZoomDirection};
