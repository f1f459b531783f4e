use crate::prelude::HashMap;
use crate::{
    core::{
        config::ViewportConfig,
        geo::{Point, Size},
    },
    data::conversion::{CoordinateMapping, MappingConfig},
    layers::marker::{Marker, MarkerCategory},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One marker literal: `{ "x": 0.48, "y": 0.43, "name": "Dragon" }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub x: f64,
    pub y: f64,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl MarkerRecord {
    pub fn into_marker(self, category: MarkerCategory) -> Result<Marker> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(MapError::InvalidMarker(format!(
                "{category} marker '{}' has non-finite position ({}, {})",
                self.name, self.x, self.y
            )));
        }
        let marker = Marker::new(category, Point::new(self.x, self.y), self.name);
        Ok(match self.icon {
            Some(icon) => marker.with_icon(icon),
            None => marker,
        })
    }
}

/// Background image reference with its natural size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub path: String,
    pub width: f64,
    pub height: f64,
}

impl ImageDescriptor {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A complete map definition as loaded from JSON
///
/// ```json
/// {
///   "viewport": { "minZoom": 0.1, "maxZoom": 50 },
///   "mapping": { "fractional": true },
///   "image": { "path": "map.png", "width": 2000, "height": 1000 },
///   "markers": {
///     "bosses": [{ "x": 0.48, "y": 0.43, "name": "Boss1" }],
///     "players": [{ "x": 0.58, "y": 0.45, "name": "Marker 1" }]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDefinition {
    #[serde(default)]
    pub viewport: ViewportConfig,
    pub mapping: MappingConfig,
    #[serde(default)]
    pub image: Option<ImageDescriptor>,
    #[serde(default)]
    pub markers: HashMap<String, Vec<MarkerRecord>>,
}

impl MapDefinition {
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Validated mapping; fails when both or neither mode is configured
    pub fn coordinate_mapping(&self) -> Result<CoordinateMapping> {
        CoordinateMapping::try_from(self.mapping.clone())
    }

    /// All markers, validated and ordered by category then file order
    pub fn markers(&self) -> Result<Vec<Marker>> {
        let mut groups = self
            .markers
            .iter()
            .map(|(key, records)| Ok((key.parse::<MarkerCategory>()?, records)))
            .collect::<Result<Vec<_>>>()?;
        groups.sort_by_key(|(category, _)| *category);

        let mut markers = Vec::new();
        for (category, records) in groups {
            for record in records {
                markers.push(record.clone().into_marker(category)?);
            }
        }
        Ok(markers)
    }
}
