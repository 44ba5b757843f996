//! Viewport and coordinate transformation for pin placement.
//!
//! Handles conversion between pointer coordinates (screen space) and
//! percentage coordinates (floor-image space). The rendered image's bounding
//! box changes with viewport size and zoom; percentages do not, so they are
//! the only form that gets persisted.

use std::fmt;

use campusmap_core::PercentPoint;

/// The on-screen bounding box of the rendered floor image.
///
/// Updated by the shell whenever the image is (re)laid out. All pointer
/// math goes through this box; while no image is laid out the mapper
/// answers `None` and the caller treats it as a precondition failure.
#[derive(Debug, Clone, Default)]
pub struct ImageViewport {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl ImageViewport {
    /// Creates a viewport from the image's bounding box.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Records the image's bounding box after a layout pass.
    pub fn set_bounds(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.left = left;
        self.top = top;
        self.width = width;
        self.height = height;
    }

    /// Gets the current rendered width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Gets the current rendered height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// True once a non-degenerate bounding box has been recorded.
    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// True when the pointer position falls inside the image box.
    pub fn contains(&self, pointer_x: f64, pointer_y: f64) -> bool {
        self.is_laid_out()
            && pointer_x >= self.left
            && pointer_x <= self.left + self.width
            && pointer_y >= self.top
            && pointer_y <= self.top + self.height
    }

    /// Converts a pointer position to percentage coordinates.
    ///
    /// Formula:
    /// ```text
    /// x% = (pointer_x - left) / width  * 100
    /// y% = (pointer_y - top)  / height * 100
    /// ```
    ///
    /// The result is clamped to 0–100; clicks land on the image element
    /// itself, so out-of-bounds input only occurs from stale layout data.
    /// Returns `None` while the image has no layout.
    pub fn pointer_to_percent(&self, pointer_x: f64, pointer_y: f64) -> Option<PercentPoint> {
        if !self.is_laid_out() {
            return None;
        }
        let x = (pointer_x - self.left) / self.width * 100.0;
        let y = (pointer_y - self.top) / self.height * 100.0;
        Some(PercentPoint::clamped(x, y))
    }

    /// Converts percentage coordinates back to a pointer position against
    /// the current rendered size.
    ///
    /// Formula:
    /// ```text
    /// pointer_x = x / 100 * width  + left
    /// pointer_y = y / 100 * height + top
    /// ```
    ///
    /// Used to scroll a non-visible pin into view. Returns `None` while the
    /// image has no layout.
    pub fn percent_to_pixel(&self, point: &PercentPoint) -> Option<(f64, f64)> {
        if !self.is_laid_out() {
            return None;
        }
        let pointer_x = point.x / 100.0 * self.width + self.left;
        let pointer_y = point.y / 100.0 * self.height + self.top;
        Some((pointer_x, pointer_y))
    }
}

impl fmt::Display for ImageViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Image box: {:.1}x{:.1} at ({:.1}, {:.1})",
            self.width, self.height, self.left, self.top
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_corners_to_percent_extremes() {
        let vp = ImageViewport::new(40.0, 10.0, 1280.0, 720.0);
        let origin = vp.pointer_to_percent(40.0, 10.0).unwrap();
        assert_eq!(origin, PercentPoint::new(0.0, 0.0));

        let far = vp.pointer_to_percent(1320.0, 730.0).unwrap();
        assert_eq!(far, PercentPoint::new(100.0, 100.0));
    }

    #[test]
    fn clamps_stale_out_of_bounds_input() {
        let vp = ImageViewport::new(0.0, 0.0, 100.0, 100.0);
        let p = vp.pointer_to_percent(150.0, -20.0).unwrap();
        assert_eq!(p, PercentPoint::new(100.0, 0.0));
    }

    #[test]
    fn inverse_mapping_tracks_current_size() {
        let mut vp = ImageViewport::new(0.0, 0.0, 1000.0, 500.0);
        let p = PercentPoint::new(25.0, 50.0);
        assert_eq!(vp.percent_to_pixel(&p), Some((250.0, 250.0)));

        // Same percentages, different rendered size.
        vp.set_bounds(0.0, 0.0, 400.0, 200.0);
        assert_eq!(vp.percent_to_pixel(&p), Some((100.0, 100.0)));
    }

    #[test]
    fn degenerate_box_yields_none() {
        let vp = ImageViewport::default();
        assert!(!vp.is_laid_out());
        assert!(vp.pointer_to_percent(10.0, 10.0).is_none());
        assert!(vp.percent_to_pixel(&PercentPoint::new(50.0, 50.0)).is_none());
    }
}
