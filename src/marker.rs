use kurbo::{BezPath, Circle, Point, Shape};

/// Circle outline centered on `center`, `size` across.
pub(crate) fn circle(center: Point, size: f64) -> BezPath {
  Circle::new(center, size / 2.0).to_path(1e-3)
}
