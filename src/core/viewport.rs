use crate::core::{
    config::ViewportConfig,
    constants::INITIAL_SCALE,
    geo::{Point, Size},
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Current pan/zoom transform (CSS-style: translate, then scale about the origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Screen-space offset of the image origin in pixels
    pub translate: Point,
    /// Image pixels to screen pixels (1.0 = natural size)
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Point::new(0.0, 0.0),
            scale: INITIAL_SCALE,
        }
    }
}

impl Transform {
    pub fn new(translate: Point, scale: f64) -> Self {
        Self { translate, scale }
    }

    pub fn apply(&self, image_pos: &Point) -> Point {
        image_pos.multiply(self.scale).add(&self.translate)
    }

    pub fn invert(&self, screen_pos: &Point) -> Point {
        screen_pos.subtract(&self.translate).multiply(1.0 / self.scale)
    }
}

/// Wheel direction, reduced to its sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Positive wheel delta (scrolling towards the user) zooms out; anything
    /// else zooms in.
    pub fn from_wheel_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Out
        } else {
            Self::In
        }
    }
}

/// Pan/zoom state of one image viewport
///
/// Every mutation is a plain `&mut self` call processed to completion; the
/// viewport has no I/O and never blocks. Notification of the render surface is
/// left to [`crate::input::handler::ViewportEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    config: ViewportConfig,
    transform: Transform,
    /// Last known container size in screen pixels
    container_size: Size,
    /// Natural dimensions of the current background image
    image_size: Size,
    is_dragging: bool,
    /// Cursor position minus translate at drag start
    drag_anchor: Point,
    /// Last cursor position seen by the active drag
    drag_cursor: Point,
    /// Set once the first fit-to-container has run
    initialized: bool,
}

impl Viewport {
    /// Creates a viewport at `translate = (0, 0)` and scale 1, or the
    /// nearest zoom limit when 1 is outside the configured range
    pub fn new(config: ViewportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: ViewportConfig) -> Self {
        let transform = Transform::new(Point::default(), config.clamp_scale(INITIAL_SCALE));
        Self {
            config,
            transform,
            container_size: Size::default(),
            image_size: Size::default(),
            is_dragging: false,
            drag_anchor: Point::default(),
            drag_cursor: Point::default(),
            initialized: false,
        }
    }

    /// Fits the image into the container with padding and centers it.
    ///
    /// The scale never exceeds `initial_scale_cap` and is kept within the
    /// configured zoom range. Inputs are validated before anything is written,
    /// so an error leaves the previous transform in place.
    pub fn initialize(&mut self, container_size: Size, image_size: Size) -> Result<()> {
        if !container_size.is_finite() || !image_size.is_finite() {
            return Err(MapError::Configuration(format!(
                "non-finite size at initialize: container {}x{}, image {}x{}",
                container_size.width, container_size.height, image_size.width, image_size.height
            )));
        }
        if container_size.is_degenerate() {
            return Err(MapError::DegenerateInput(format!(
                "container has no area: {}x{}",
                container_size.width, container_size.height
            )));
        }
        if image_size.is_degenerate() {
            return Err(MapError::DegenerateInput(format!(
                "image has no area: {}x{}",
                image_size.width, image_size.height
            )));
        }

        let padding = self.config.fit_padding_fraction;
        let fit_x = container_size.width * padding / image_size.width;
        let fit_y = container_size.height * padding / image_size.height;
        let fitted = fit_x.min(fit_y).min(self.config.initial_scale_cap);
        let scale = self.config.clamp_scale(fitted);
        if scale != fitted {
            log::debug!(
                "fit scale {:.4} outside zoom range, clamped to {:.4}",
                fitted,
                scale
            );
        }

        let scaled = image_size.scaled(scale);
        let translate = Point::new(
            (container_size.width - scaled.width) / 2.0,
            (container_size.height - scaled.height) / 2.0,
        );

        self.container_size = container_size;
        self.image_size = image_size;
        self.transform = Transform::new(translate, scale);
        self.initialized = true;

        log::info!(
            "fitted {}x{} image into {}x{} container: scale {:.4}, translate ({:.1}, {:.1})",
            image_size.width,
            image_size.height,
            container_size.width,
            container_size.height,
            scale,
            translate.x,
            translate.y
        );
        Ok(())
    }

    /// Handles a new background image.
    ///
    /// Only an initial load re-fits the view; refreshed content keeps the
    /// user's pan and zoom. Returns whether a fit was performed.
    pub fn image_ready(&mut self, image_size: Size, is_initial_load: bool) -> Result<bool> {
        if is_initial_load {
            self.initialize(self.container_size, image_size)?;
            return Ok(true);
        }

        if !image_size.is_finite() || image_size.is_degenerate() {
            return Err(MapError::DegenerateInput(format!(
                "refreshed image has unusable size {}x{}",
                image_size.width, image_size.height
            )));
        }
        self.image_size = image_size;
        Ok(false)
    }

    /// Records a new container size; the transform is left as is
    pub fn resize(&mut self, container_size: Size) {
        self.container_size = container_size;
    }

    pub fn on_drag_start(&mut self, cursor: Point) {
        self.is_dragging = true;
        self.drag_cursor = cursor;
        self.drag_anchor = cursor.subtract(&self.transform.translate);
    }

    /// Moves the image so the point grabbed at drag start sits under `cursor`.
    /// Returns false (and does nothing) when no drag is active.
    pub fn on_drag_move(&mut self, cursor: Point) -> bool {
        if !self.is_dragging {
            return false;
        }
        self.drag_cursor = cursor;
        self.transform.translate = cursor.subtract(&self.drag_anchor);
        true
    }

    pub fn on_drag_end(&mut self) {
        self.is_dragging = false;
    }

    /// Zooms one step about `cursor`, keeping the image point under it fixed.
    /// Returns the new scale.
    pub fn on_zoom(&mut self, cursor: Point, direction: ZoomDirection) -> f64 {
        let factor = match direction {
            ZoomDirection::Out => self.config.zoom_out_factor,
            ZoomDirection::In => self.config.zoom_step_factor,
        };
        let old_scale = self.transform.scale;
        let new_scale = self.config.clamp_scale(old_scale * factor);
        self.zoom_about(cursor, new_scale);

        // The image point now under the drag cursor becomes the grabbed
        // point, so the next move continues from where the image is shown
        if self.is_dragging {
            self.drag_anchor = self.drag_cursor.subtract(&self.transform.translate);
        }
        new_scale
    }

    fn zoom_about(&mut self, focus: Point, new_scale: f64) {
        // Pinned at a zoom limit
        if new_scale == self.transform.scale {
            return;
        }
        let scale_change = new_scale / self.transform.scale;
        let offset = focus.subtract(&self.transform.translate).multiply(scale_change);
        self.transform.translate = focus.subtract(&offset);
        self.transform.scale = new_scale;
    }

    /// Sets the zoom limits, re-clamping the current scale about the
    /// container center
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) -> Result<()> {
        let config = ViewportConfig {
            min_zoom,
            max_zoom,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;

        let clamped = self.config.clamp_scale(self.transform.scale);
        if clamped != self.transform.scale {
            let center = self.container_size.as_point().multiply(0.5);
            self.zoom_about(center, clamped);
        }
        Ok(())
    }

    /// Image pixel to screen pixel under the current transform
    pub fn image_to_screen(&self, image_pos: &Point) -> Point {
        self.transform.apply(image_pos)
    }

    /// Screen pixel to image pixel under the current transform
    pub fn screen_to_image(&self, screen_pos: &Point) -> Point {
        self.transform.invert(screen_pos)
    }

    /// Counter-scale that keeps markers a constant on-screen size
    pub fn marker_display_scale(&self) -> f64 {
        1.0 / self.transform.scale
    }

    /// Scale as a rounded percentage, e.g. `45` for a scale of 0.45
    pub fn zoom_percent(&self) -> u32 {
        (self.transform.scale * 100.0).round() as u32
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn translate(&self) -> Point {
        self.transform.translate
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn drag_anchor(&self) -> Option<Point> {
        self.is_dragging.then_some(self.drag_anchor)
    }

    pub fn container_size(&self) -> Size {
        self.container_size
    }

    pub fn image_size(&self) -> Size {
        self.image_size
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::with_valid_config(ViewportConfig::default())
    }
}
