//! Property test: mapping a percent point to pixels and back is the
//! identity for any laid-out image box.

use proptest::prelude::*;

use campusmap_core::PercentPoint;
use campusmap_editor::ImageViewport;

proptest! {
    #[test]
    fn percent_survives_a_pixel_round_trip(
        x in 0.0f64..=100.0,
        y in 0.0f64..=100.0,
        left in -5_000.0f64..5_000.0,
        top in -5_000.0f64..5_000.0,
        width in 1.0f64..10_000.0,
        height in 1.0f64..10_000.0,
    ) {
        let mut viewport = ImageViewport::default();
        viewport.set_bounds(left, top, width, height);

        let point = PercentPoint::new(x, y);
        let (px, py) = viewport.percent_to_pixel(&point).unwrap();
        let back = viewport.pointer_to_percent(px, py).unwrap();

        prop_assert!((back.x - point.x).abs() < 1e-6, "x drifted: {} vs {}", back.x, point.x);
        prop_assert!((back.y - point.y).abs() < 1e-6, "y drifted: {} vs {}", back.y, point.y);
    }

    #[test]
    fn mapped_pointer_is_always_in_range(
        px in -20_000.0f64..20_000.0,
        py in -20_000.0f64..20_000.0,
        width in 1.0f64..10_000.0,
        height in 1.0f64..10_000.0,
    ) {
        let mut viewport = ImageViewport::default();
        viewport.set_bounds(0.0, 0.0, width, height);

        if let Some(point) = viewport.pointer_to_percent(px, py) {
            prop_assert!(point.in_bounds());
        }
    }
}
