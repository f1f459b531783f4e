use crate::{
    core::{geo::Size, viewport::Transform, viewport::Viewport},
    layers::{
        manager::{MarkerPlacement, MarkerStore},
        marker::MarkerCategory,
    },
};

/// Output side of the viewer: something that can show the transformed image
/// and its marker overlays (a DOM tree, a canvas, a test recorder)
pub trait RenderSurface {
    /// Applies the map transform; `zoom_percent` is for the zoom readout
    fn apply_transform(&mut self, transform: &Transform, zoom_percent: u32);

    /// Sizes the marker overlays to the natural image
    fn set_overlay_size(&mut self, size: Size);

    fn set_overlay_visible(&mut self, category: MarkerCategory, visible: bool);

    /// Replaces the drawn markers
    fn draw_markers(&mut self, placements: &[MarkerPlacement]);
}

/// `translate(Xpx, Ypx) scale(S)` for the map wrapper element
pub fn css_transform(transform: &Transform) -> String {
    format!(
        "translate({}px, {}px) scale({})",
        transform.translate.x, transform.translate.y, transform.scale
    )
}

/// Centers a marker on its anchor and cancels out the map scale
pub fn marker_css_transform(display_scale: f64) -> String {
    format!("translate(-50%, -50%) scale({display_scale})")
}

/// Pushes one complete frame to `surface`
pub fn render_frame(viewport: &Viewport, markers: &MarkerStore, surface: &mut dyn RenderSurface) {
    surface.apply_transform(&viewport.transform(), viewport.zoom_percent());
    surface.set_overlay_size(markers.overlay_size(viewport.image_size()));
    for category in MarkerCategory::ALL {
        surface.set_overlay_visible(category, markers.is_visible(category));
    }
    surface.draw_markers(&markers.placements(viewport));
}

/// A drawn marker as a DOM-like surface would hold it
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerElement {
    pub class: String,
    pub label: String,
    /// `left`/`top` inside the overlay, in image pixels
    pub left: f64,
    pub top: f64,
    pub transform: String,
}

/// Keeps the last frame as CSS-style strings
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub wrapper_transform: String,
    pub zoom_label: String,
    pub overlay_size: Option<Size>,
    pub hidden_overlays: Vec<MarkerCategory>,
    pub markers: Vec<MarkerElement>,
    pub frames: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for RecordingSurface {
    fn apply_transform(&mut self, transform: &Transform, zoom_percent: u32) {
        self.wrapper_transform = css_transform(transform);
        self.zoom_label = format!("{zoom_percent}%");
        self.frames += 1;
    }

    fn set_overlay_size(&mut self, size: Size) {
        self.overlay_size = Some(size);
    }

    fn set_overlay_visible(&mut self, category: MarkerCategory, visible: bool) {
        self.hidden_overlays.retain(|c| *c != category);
        if !visible {
            self.hidden_overlays.push(category);
        }
    }

    fn draw_markers(&mut self, placements: &[MarkerPlacement]) {
        self.markers = placements
            .iter()
            .map(|p| MarkerElement {
                class: format!("marker {}", p.category.css_class()),
                label: p.label.clone(),
                left: p.image_pos.x,
                top: p.image_pos.y,
                transform: marker_css_transform(p.display_scale),
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;
    use crate::data::conversion::CoordinateMapping;
    use crate::layers::marker::Marker;

    #[test]
    fn test_css_strings() {
        let transform = Transform::new(Point::new(50.0, 175.0), 0.5);
        assert_eq!(css_transform(&transform), "translate(50px, 175px) scale(0.5)");
        assert_eq!(marker_css_transform(2.0), "translate(-50%, -50%) scale(2)");
    }

    #[test]
    fn test_render_frame_records_everything() {
        let mut viewport = Viewport::default();
        viewport
            .initialize(Size::new(1000.0, 800.0), Size::new(2000.0, 1000.0))
            .unwrap();

        let mut store = MarkerStore::new(CoordinateMapping::Fractional);
        store
            .add(Marker::new(MarkerCategory::Boss, Point::new(0.25, 0.5), "Dragon"))
            .unwrap();
        store
            .add(Marker::new(MarkerCategory::Orb, Point::new(0.1, 0.1), "Orb 1"))
            .unwrap();
        store.set_visible(MarkerCategory::Orb, false);

        let mut surface = RecordingSurface::new();
        render_frame(&viewport, &store, &mut surface);

        assert_eq!(surface.zoom_label, "45%");
        assert_eq!(surface.overlay_size, Some(Size::new(2000.0, 1000.0)));
        assert_eq!(surface.hidden_overlays, vec![MarkerCategory::Orb]);
        assert_eq!(surface.markers.len(), 1);
        assert_eq!(surface.markers[0].class, "marker boss-marker");
        assert_eq!(surface.markers[0].left, 500.0);
        assert_eq!(surface.markers[0].top, 500.0);
        assert_eq!(surface.frames, 1);
    }
}
