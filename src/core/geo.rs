use serde::{Deserialize, Serialize};

/// Represents a point in screen, image, or world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Width and height in pixels (container or natural image dimensions)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    /// True when either side is zero or negative
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn scaled(&self, factor: f64) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }

    pub fn as_point(&self) -> Point {
        Point::new(self.width, self.height)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// The rectangle of world (game) units covered by the background image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl WorldBounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// The world coordinate that lands on image pixel (0, 0)
    pub fn origin(&self) -> Point {
        Point::new(self.x_min, self.y_min)
    }

    pub fn is_valid(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
            && self.x_min < self.x_max
            && self.y_min < self.y_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_operations() {
        let p1 = Point::new(10.0, 20.0);
        let p2 = Point::new(5.0, 15.0);

        assert_eq!(p1.add(&p2), Point::new(15.0, 35.0));
        assert_eq!(p1.subtract(&p2), Point::new(5.0, 5.0));
        assert_eq!(p1.multiply(2.0), Point::new(20.0, 40.0));
    }

    #[test]
    fn test_size_degenerate() {
        assert!(Size::new(0.0, 100.0).is_degenerate());
        assert!(Size::new(100.0, -1.0).is_degenerate());
        assert!(!Size::new(1.0, 1.0).is_degenerate());
        assert!(!Size::new(f64::NAN, 1.0).is_finite());
    }

    #[test]
    fn test_world_bounds() {
        let bounds = WorldBounds::new(-100.0, 300.0, 50.0, 250.0);
        assert_eq!(bounds.origin(), Point::new(-100.0, 50.0));
        assert!(bounds.is_valid());
        assert!(!WorldBounds::new(1.0, 0.0, 0.0, 1.0).is_valid());
    }
}
