//! Geographic and screen-space primitives.
//!
//! # Coordinate System
//!
//! - Geographic points are `(latitude, longitude)` in degrees
//! - A bounding box is stored unrotated, as its south-west and north-east corners
//! - Screen points are pixels in the host's overlay layer; the y axis may point
//!   either way, so nothing here assumes an orientation
//!
//! At the JavaScript boundary a point is `[lat, lng]` and a box is
//! `[[south, west], [north, east]]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Component-wise offset of `other` relative to `self`.
    pub fn delta_to(&self, other: LatLng) -> (f64, f64) {
        (other.lat - self.lat, other.lng - self.lng)
    }

    /// Shift by a latitude/longitude delta.
    pub fn offset(&self, d_lat: f64, d_lng: f64) -> LatLng {
        LatLng::new(self.lat + d_lat, self.lng + d_lng)
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        LatLng::new(lat, lng)
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(p: LatLng) -> Self {
        [p.lat, p.lng]
    }
}

/// One of the four corners of a bounding box, used by the resize handles.
///
/// Serialized and displayed by its short name (`"sw"`, `"nw"`, `"ne"`,
/// `"se"`); the long snake_case names are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    #[serde(rename = "sw", alias = "south_west")]
    SouthWest,
    #[serde(rename = "nw", alias = "north_west")]
    NorthWest,
    #[serde(rename = "ne", alias = "north_east")]
    NorthEast,
    #[serde(rename = "se", alias = "south_east")]
    SouthEast,
}

impl Corner {
    /// All corners, counter-clockwise from south-west.
    pub const ALL: [Corner; 4] = [
        Corner::SouthWest,
        Corner::SouthEast,
        Corner::NorthEast,
        Corner::NorthWest,
    ];

    /// The corner diagonally across the box, which stays fixed during a resize.
    pub fn opposite(self) -> Corner {
        match self {
            Corner::SouthWest => Corner::NorthEast,
            Corner::NorthWest => Corner::SouthEast,
            Corner::NorthEast => Corner::SouthWest,
            Corner::SouthEast => Corner::NorthWest,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Corner::SouthWest => "sw",
            Corner::NorthWest => "nw",
            Corner::NorthEast => "ne",
            Corner::SouthEast => "se",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Corner {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sw" | "south_west" | "southwest" => Ok(Corner::SouthWest),
            "nw" | "north_west" | "northwest" => Ok(Corner::NorthWest),
            "ne" | "north_east" | "northeast" => Ok(Corner::NorthEast),
            "se" | "south_east" | "southeast" => Ok(Corner::SouthEast),
            _ => Err(OverlayError::UnknownCorner(s.to_string())),
        }
    }
}

/// An unrotated geographic bounding box.
///
/// Rotation is a separate, purely visual property of the overlay and is
/// never folded into these values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Build a box from its corners without validation.
    ///
    /// A degenerate or inverted box renders as a zero-size element rather
    /// than failing; use [`LatLngBounds::try_new`] to reject it up front.
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Build a box, requiring finite coordinates with south < north and west < east.
    pub fn try_new(south_west: LatLng, north_east: LatLng) -> Result<Self, OverlayError> {
        let bounds = Self::new(south_west, north_east);
        bounds.validate()?;
        Ok(bounds)
    }

    /// Convenience constructor from the four edge values.
    pub fn from_edges(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    /// Arithmetic midpoint of the unrotated box.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south() + self.north()) / 2.0,
            (self.west() + self.east()) / 2.0,
        )
    }

    /// Half the latitude span.
    pub fn half_height(&self) -> f64 {
        (self.north() - self.south()) / 2.0
    }

    /// Position of a corner in the unrotated frame.
    pub fn corner(&self, corner: Corner) -> LatLng {
        match corner {
            Corner::SouthWest => self.south_west,
            Corner::NorthWest => LatLng::new(self.north(), self.west()),
            Corner::NorthEast => self.north_east,
            Corner::SouthEast => LatLng::new(self.south(), self.east()),
        }
    }

    /// Both corners shifted by the same delta.
    pub fn translate(&self, d_lat: f64, d_lng: f64) -> LatLngBounds {
        LatLngBounds::new(
            self.south_west.offset(d_lat, d_lng),
            self.north_east.offset(d_lat, d_lng),
        )
    }

    /// Replace one corner, keeping the opposite corner fixed.
    ///
    /// Exactly one latitude and one longitude change; the other two values
    /// are copied through untouched. No reordering happens if the new point
    /// crosses the fixed corner.
    pub fn with_corner(&self, corner: Corner, point: LatLng) -> LatLngBounds {
        let (mut south, mut west, mut north, mut east) =
            (self.south(), self.west(), self.north(), self.east());
        match corner {
            Corner::SouthWest => {
                south = point.lat;
                west = point.lng;
            }
            Corner::NorthWest => {
                north = point.lat;
                west = point.lng;
            }
            Corner::NorthEast => {
                north = point.lat;
                east = point.lng;
            }
            Corner::SouthEast => {
                south = point.lat;
                east = point.lng;
            }
        }
        LatLngBounds::from_edges(south, west, north, east)
    }

    /// Check finiteness and the south < north, west < east ordering.
    pub fn validate(&self) -> Result<(), OverlayError> {
        for value in [self.south(), self.west(), self.north(), self.east()] {
            if !value.is_finite() {
                return Err(OverlayError::NonFiniteCoordinate(value));
            }
        }
        if self.south() >= self.north() || self.west() >= self.east() {
            return Err(OverlayError::InvalidBounds {
                south: self.south(),
                west: self.west(),
                north: self.north(),
                east: self.east(),
            });
        }
        Ok(())
    }
}

impl TryFrom<[[f64; 2]; 2]> for LatLngBounds {
    type Error = OverlayError;

    /// Boundary parsing only rejects non-finite numbers; ordering is left to
    /// [`LatLngBounds::validate`].
    fn try_from([sw, ne]: [[f64; 2]; 2]) -> Result<Self, Self::Error> {
        for value in sw.iter().chain(ne.iter()) {
            if !value.is_finite() {
                return Err(OverlayError::NonFiniteCoordinate(*value));
            }
        }
        Ok(LatLngBounds::new(sw.into(), ne.into()))
    }
}

impl From<LatLngBounds> for [[f64; 2]; 2] {
    fn from(b: LatLngBounds) -> Self {
        [b.south_west.into(), b.north_east.into()]
    }
}

/// A point in the host's overlay-layer pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned pixel rectangle: the unrotated frame of an overlay element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Rectangle spanned by two opposite corners in any orientation.
    ///
    /// Uses the component-wise minimum as the top-left corner and absolute
    /// differences as the size, so a y axis pointing down (while latitude
    /// points up) is handled the same as one pointing up.
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }
}
