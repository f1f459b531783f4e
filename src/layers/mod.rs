pub mod image;
pub mod manager;
pub mod marker;

pub use image::{ImageFrame, ImageRefresh, ImageSource, StaticImageSource};
pub use manager::{MarkerPlacement, MarkerStore};
pub use marker::{Marker, MarkerCategory};
