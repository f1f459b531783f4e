use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerCategory {
    Boss,
    Orb,
    Player,
}

impl MarkerCategory {
    pub const ALL: [MarkerCategory; 3] = [Self::Boss, Self::Orb, Self::Player];

    /// CSS-style class used for the marker element
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Boss => "boss-marker",
            Self::Orb => "orb-marker",
            Self::Player => "player-marker",
        }
    }
}

impl std::fmt::Display for MarkerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boss => write!(f, "boss"),
            Self::Orb => write!(f, "orb"),
            Self::Player => write!(f, "player"),
        }
    }
}

impl std::str::FromStr for MarkerCategory {
    type Err = crate::MapError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "boss" | "bosses" => Ok(Self::Boss),
            "orb" | "orbs" => Ok(Self::Orb),
            "player" | "players" => Ok(Self::Player),
            other => Err(crate::MapError::InvalidMarker(format!(
                "unknown marker category '{other}'"
            ))),
        }
    }
}

/// A labelled point of interest in source coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    category: MarkerCategory,
    world_pos: Point,
    label: String,
    icon_ref: Option<String>,
}

impl Marker {
    pub fn new(category: MarkerCategory, world_pos: Point, label: impl Into<String>) -> Self {
        Self {
            category,
            world_pos,
            label: label.into(),
            icon_ref: None,
        }
    }

    pub fn with_icon(mut self, icon_ref: impl Into<String>) -> Self {
        self.icon_ref = Some(icon_ref.into());
        self
    }

    pub fn category(&self) -> MarkerCategory {
        self.category
    }

    pub fn world_pos(&self) -> Point {
        self.world_pos
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon_ref(&self) -> Option<&str> {
        self.icon_ref.as_deref()
    }
}
