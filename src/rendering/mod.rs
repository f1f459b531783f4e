pub mod surface;

// Re-export main types
pub use surface::{
    css_transform, marker_css_transform, render_frame, MarkerElement, RecordingSurface,
    RenderSurface,
};
