//! Error types for overlay construction and boundary parsing.
//!
//! The render path never fails: a missing projection or a detached overlay is
//! a silent no-op. These errors only surface where callers hand us data that
//! they want checked, such as opt-in bounds validation or options parsed from
//! JavaScript.

use thiserror::Error;

/// Errors reported by overlay constructors and parsers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlayError {
    /// The box is empty or inverted in its unrotated frame.
    #[error(
        "Invalid bounds: south ({south}) must be below north ({north}) and west ({west}) below east ({east})"
    )]
    InvalidBounds {
        south: f64,
        west: f64,
        north: f64,
        east: f64,
    },

    /// A latitude or longitude was NaN or infinite.
    #[error("Non-finite coordinate: {0}")]
    NonFiniteCoordinate(f64),

    /// A corner handle name that is not one of sw/nw/ne/se.
    #[error("Unknown corner: {0}")]
    UnknownCorner(String),

    /// Options object could not be deserialized.
    #[error("Invalid overlay options: {0}")]
    InvalidOptions(String),
}
