use crate::core::geo::{Point, Size, WorldBounds};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// How marker source coordinates map onto image pixels
///
/// One mapping is active per marker set; categories never mix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CoordinateMapping {
    /// Game units over a known world rectangle: `image = world - (xMin, yMin)`.
    /// With `flip_y` the image y axis runs down from `yMax` instead.
    World { bounds: WorldBounds, flip_y: bool },
    /// Fractions of the image: `image = fraction * image_size`
    Fractional,
}

impl CoordinateMapping {
    pub fn world(bounds: WorldBounds) -> Self {
        Self::World {
            bounds,
            flip_y: false,
        }
    }

    /// Converts a source coordinate into image pixels
    pub fn world_to_image(&self, world_pos: &Point, image_size: &Size) -> Point {
        match self {
            Self::World { bounds, flip_y } => {
                let offset = world_pos.subtract(&bounds.origin());
                if *flip_y {
                    Point::new(offset.x, bounds.y_max - world_pos.y)
                } else {
                    offset
                }
            }
            Self::Fractional => Point::new(
                world_pos.x * image_size.width,
                world_pos.y * image_size.height,
            ),
        }
    }

    pub fn is_fractional(&self) -> bool {
        matches!(self, Self::Fractional)
    }
}

/// Mapping as written in a map definition file
///
/// Exactly one of `world` or `fractional: true` must be given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingConfig {
    #[serde(default)]
    pub world: Option<WorldMappingConfig>,
    #[serde(default)]
    pub fractional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldMappingConfig {
    #[serde(flatten)]
    pub bounds: WorldBounds,
    #[serde(default)]
    pub flip_y: bool,
}

impl TryFrom<MappingConfig> for CoordinateMapping {
    type Error = MapError;

    fn try_from(config: MappingConfig) -> Result<Self> {
        match (config.world, config.fractional) {
            (Some(_), true) => Err(MapError::Configuration(
                "mapping specifies both world bounds and fractional coordinates".into(),
            )),
            (None, false) => Err(MapError::Configuration(
                "mapping specifies neither world bounds nor fractional coordinates".into(),
            )),
            (Some(world), false) => {
                if !world.bounds.is_valid() {
                    return Err(MapError::Configuration(format!(
                        "invalid world bounds {:?}",
                        world.bounds
                    )));
                }
                Ok(Self::World {
                    bounds: world.bounds,
                    flip_y: world.flip_y,
                })
            }
            (None, true) => Ok(Self::Fractional),
        }
    }
}
