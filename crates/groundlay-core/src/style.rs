//! CSS value formatting shared by every host.
//!
//! Hosts that are not the DOM still receive these strings so that the values
//! an overlay reports are the same everywhere.

/// `transform-origin` for overlay containers: the element's own center.
pub const TRANSFORM_ORIGIN: &str = "50% 50%";

/// Rotation transform, e.g. `rotate(45deg)`.
pub fn rotate(angle_degrees: f64) -> String {
    format!("rotate({}deg)", angle_degrees)
}

/// Opacity value, e.g. `0.7`.
pub fn opacity(value: f64) -> String {
    format!("{}", value)
}

/// Pixel length, e.g. `12.5px`.
pub fn px(value: f64) -> String {
    format!("{}px", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_whole_degrees() {
        assert_eq!(rotate(0.0), "rotate(0deg)");
        assert_eq!(rotate(45.0), "rotate(45deg)");
    }

    #[test]
    fn test_rotate_fractional() {
        assert_eq!(rotate(12.5), "rotate(12.5deg)");
    }

    #[test]
    fn test_opacity() {
        assert_eq!(opacity(0.7), "0.7");
        assert_eq!(opacity(1.0), "1");
    }

    #[test]
    fn test_px() {
        assert_eq!(px(10.0), "10px");
        assert_eq!(px(-3.25), "-3.25px");
    }
}
