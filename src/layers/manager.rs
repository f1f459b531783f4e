use crate::{
    core::{
        geo::{Point, Size},
        viewport::Viewport,
    },
    data::{conversion::CoordinateMapping, formats::MapDefinition},
    layers::marker::{Marker, MarkerCategory},
    MapError, Result,
};

use crate::prelude::{HashMap, HashSet};

/// Where one marker lands for the current transform
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPlacement {
    pub category: MarkerCategory,
    pub label: String,
    pub icon_ref: Option<String>,
    /// Position inside the unscaled image (overlay coordinates)
    pub image_pos: Point,
    /// Position inside the container
    pub screen_pos: Point,
    /// Counter-scale keeping the marker a fixed on-screen size
    pub display_scale: f64,
}

/// Holds the markers of one map, grouped by category, under a single
/// coordinate mapping
#[derive(Debug, Clone)]
pub struct MarkerStore {
    mapping: CoordinateMapping,
    groups: HashMap<MarkerCategory, Vec<Marker>>,
    hidden: HashSet<MarkerCategory>,
}

impl MarkerStore {
    pub fn new(mapping: CoordinateMapping) -> Self {
        Self {
            mapping,
            groups: HashMap::default(),
            hidden: HashSet::default(),
        }
    }

    pub fn from_definition(definition: &MapDefinition) -> Result<Self> {
        let mut store = Self::new(definition.coordinate_mapping()?);
        for marker in definition.markers()? {
            store.add(marker)?;
        }
        log::debug!(
            "loaded {} markers ({} boss, {} orb, {} player)",
            store.len(),
            store.markers(MarkerCategory::Boss).len(),
            store.markers(MarkerCategory::Orb).len(),
            store.markers(MarkerCategory::Player).len()
        );
        Ok(store)
    }

    pub fn mapping(&self) -> &CoordinateMapping {
        &self.mapping
    }

    /// Adds a marker, rejecting non-finite positions
    pub fn add(&mut self, marker: Marker) -> Result<()> {
        Self::check_marker(&marker)?;
        self.groups.entry(marker.category()).or_default().push(marker);
        Ok(())
    }

    /// Swaps out every marker of one category, e.g. on a player position
    /// refresh. Nothing changes if any replacement is invalid.
    pub fn replace_category(&mut self, category: MarkerCategory, markers: Vec<Marker>) -> Result<()> {
        for marker in &markers {
            if marker.category() != category {
                return Err(MapError::InvalidMarker(format!(
                    "{} marker '{}' supplied as {category}",
                    marker.category(),
                    marker.label()
                )));
            }
            Self::check_marker(marker)?;
        }
        self.groups.insert(category, markers);
        Ok(())
    }

    fn check_marker(marker: &Marker) -> Result<()> {
        if !marker.world_pos().is_finite() {
            return Err(MapError::InvalidMarker(format!(
                "{} marker '{}' has non-finite position",
                marker.category(),
                marker.label()
            )));
        }
        Ok(())
    }

    pub fn markers(&self, category: MarkerCategory) -> &[Marker] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All markers in category order
    pub fn iter(&self) -> impl Iterator<Item = &Marker> + '_ {
        MarkerCategory::ALL
            .into_iter()
            .flat_map(move |category| self.markers(category).iter())
    }

    pub fn set_visible(&mut self, category: MarkerCategory, visible: bool) {
        if visible {
            self.hidden.remove(&category);
        } else {
            self.hidden.insert(category);
        }
    }

    pub fn is_visible(&self, category: MarkerCategory) -> bool {
        !self.hidden.contains(&category)
    }

    /// Overlays cover the natural image so markers share its coordinates
    pub fn overlay_size(&self, image_size: Size) -> Size {
        image_size
    }

    /// Image and screen positions of every visible marker
    pub fn placements(&self, viewport: &Viewport) -> Vec<MarkerPlacement> {
        let image_size = viewport.image_size();
        let display_scale = viewport.marker_display_scale();

        self.iter()
            .filter(|marker| self.is_visible(marker.category()))
            .map(|marker| {
                let image_pos = self.mapping.world_to_image(&marker.world_pos(), &image_size);
                MarkerPlacement {
                    category: marker.category(),
                    label: marker.label().to_string(),
                    icon_ref: marker.icon_ref().map(str::to_string),
                    image_pos,
                    screen_pos: viewport.image_to_screen(&image_pos),
                    display_scale,
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::ViewportConfig, geo::WorldBounds};

    fn fitted_viewport() -> Viewport {
        let mut viewport = Viewport::new(ViewportConfig::default()).unwrap();
        viewport
            .initialize(Size::new(1000.0, 800.0), Size::new(2000.0, 1000.0))
            .unwrap();
        viewport
    }

    #[test]
    fn test_fractional_placements() {
        let mut store = MarkerStore::new(CoordinateMapping::Fractional);
        store
            .add(Marker::new(MarkerCategory::Orb, Point::new(0.5, 0.5), "Orb 1"))
            .unwrap();

        let placements = store.placements(&fitted_viewport());
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].image_pos, Point::new(1000.0, 500.0));
        // 1000 * 0.45 + 50, 500 * 0.45 + 175
        assert!((placements[0].screen_pos.x - 500.0).abs() < 1e-9);
        assert!((placements[0].screen_pos.y - 400.0).abs() < 1e-9);
        assert!((placements[0].display_scale - 1.0 / 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_world_placements() {
        let bounds = WorldBounds::new(-1000.0, 1000.0, -500.0, 500.0);
        let mut store = MarkerStore::new(CoordinateMapping::world(bounds));
        store
            .add(Marker::new(MarkerCategory::Boss, Point::new(-1000.0, -500.0), "Corner"))
            .unwrap();

        let placements = store.placements(&fitted_viewport());
        assert_eq!(placements[0].image_pos, Point::new(0.0, 0.0));
        assert!((placements[0].screen_pos.x - 50.0).abs() < 1e-9);
        assert!((placements[0].screen_pos.y - 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_visibility_toggles_filter_placements() {
        let mut store = MarkerStore::new(CoordinateMapping::Fractional);
        store
            .add(Marker::new(MarkerCategory::Boss, Point::new(0.1, 0.1), "Boss1"))
            .unwrap();
        store
            .add(Marker::new(MarkerCategory::Player, Point::new(0.2, 0.2), "Marker 1"))
            .unwrap();

        assert!(store.is_visible(MarkerCategory::Boss));
        store.set_visible(MarkerCategory::Boss, false);
        let placements = store.placements(&fitted_viewport());
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].category, MarkerCategory::Player);

        store.set_visible(MarkerCategory::Boss, true);
        assert_eq!(store.placements(&fitted_viewport()).len(), 2);
    }

    #[test]
    fn test_replace_category() {
        let mut store = MarkerStore::new(CoordinateMapping::Fractional);
        store
            .add(Marker::new(MarkerCategory::Player, Point::new(0.2, 0.2), "Old"))
            .unwrap();

        store
            .replace_category(
                MarkerCategory::Player,
                vec![Marker::new(MarkerCategory::Player, Point::new(0.3, 0.3), "New")],
            )
            .unwrap();
        assert_eq!(store.markers(MarkerCategory::Player)[0].label(), "New");

        let mismatched = vec![Marker::new(MarkerCategory::Orb, Point::new(0.3, 0.3), "Orb")];
        assert!(store
            .replace_category(MarkerCategory::Player, mismatched)
            .is_err());
        assert_eq!(store.markers(MarkerCategory::Player)[0].label(), "New");
    }

    #[test]
    fn test_rejects_non_finite_marker() {
        let mut store = MarkerStore::new(CoordinateMapping::Fractional);
        let marker = Marker::new(MarkerCategory::Orb, Point::new(f64::INFINITY, 0.0), "Bad");
        assert!(matches!(store.add(marker), Err(MapError::InvalidMarker(_))));
        assert!(store.is_empty());
    }
}
