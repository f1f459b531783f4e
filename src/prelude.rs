//! Prelude module for common mapview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapview::prelude::*;`

pub use crate::core::{
    config::{ViewportConfig, ZoomProfile},
    geo::{Point, Size, WorldBounds},
    viewport::{Transform, Viewport, ZoomDirection},
};

pub use crate::data::{
    conversion::{CoordinateMapping, MappingConfig},
    formats::{ImageDescriptor, MapDefinition, MarkerRecord},
};

pub use crate::layers::{
    image::{ImageFrame, ImageRefresh, ImageSource, StaticImageSource},
    manager::{MarkerPlacement, MarkerStore},
    marker::{Marker, MarkerCategory},
};

pub use crate::input::{
    events::{InputEvent, ViewEvent},
    handler::{EventManager, ViewportEngine},
};

pub use crate::rendering::surface::{RecordingSurface, RenderSurface};

pub use crate::background::tasks::{refresh_channel, RefreshSource};

#[cfg(feature = "tokio-runtime")]
pub use crate::background::tasks::RefreshTask;

pub use crate::{Error as MapError, Result};

pub use std::{
    collections::VecDeque,
    sync::Arc,
    time::Duration,
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
