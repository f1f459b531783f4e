use crate::core::{
    geo::{Point, Size},
    viewport::{Transform, ZoomDirection},
};
use serde::{Deserialize, Serialize};

/// Input events delivered by the host, in the order they occurred
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Primary button pressed over the container
    DragStart { position: Point },
    /// Pointer moved; ignored unless a drag is active
    DragMove { position: Point },
    /// Primary button released anywhere
    DragEnd,
    /// One wheel notch at a container-relative position
    Zoom {
        position: Point,
        direction: ZoomDirection,
    },
    /// Container resized
    Resize { size: Size },
    /// A background image finished loading
    ImageReady { size: Size, is_initial_load: bool },
}

impl InputEvent {
    /// Builds a zoom event from a raw wheel delta
    pub fn wheel(position: Point, delta: f64) -> Self {
        InputEvent::Zoom {
            position,
            direction: ZoomDirection::from_wheel_delta(delta),
        }
    }
}

/// Events emitted towards the render collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// Fired after every mutating operation
    TransformChanged { scale: f64, translate: Point },
}

impl ViewEvent {
    pub fn transform_changed(transform: &Transform) -> Self {
        ViewEvent::TransformChanged {
            scale: transform.scale,
            translate: transform.translate,
        }
    }

    /// Listener key for this event
    pub fn event_type(&self) -> &'static str {
        match self {
            ViewEvent::TransformChanged { .. } => "transformchanged",
        }
    }

    /// Counter-scale for markers at this event's scale
    pub fn marker_display_scale(&self) -> f64 {
        match self {
            ViewEvent::TransformChanged { scale, .. } => 1.0 / scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_delta_sign() {
        assert_eq!(
            InputEvent::wheel(Point::new(0.0, 0.0), 120.0),
            InputEvent::Zoom {
                position: Point::new(0.0, 0.0),
                direction: ZoomDirection::Out,
            }
        );
        assert_eq!(
            InputEvent::wheel(Point::new(0.0, 0.0), -3.0),
            InputEvent::Zoom {
                position: Point::new(0.0, 0.0),
                direction: ZoomDirection::In,
            }
        );
    }

    #[test]
    fn test_view_event_counter_scale() {
        let event = ViewEvent::transform_changed(&Transform::new(Point::new(1.0, 2.0), 4.0));
        assert_eq!(event.event_type(), "transformchanged");
        assert_eq!(event.marker_display_scale(), 0.25);
    }
}
