use kurbo::{Affine, BezPath, Point, Stroke};
use peniko::Brush;
use polars::prelude::*;

use crate::{Bounds, marker, render::Render};

/// A polyline through the points in their original order, optionally with a
/// circle marker at every point.
pub struct LineAxes {
  points:  Vec<Point>,
  options: LineOptions,
}

pub struct LineOptions {
  pub width:   f64,
  pub color:   Brush,
  pub markers: Option<MarkerOptions>,
}

pub struct MarkerOptions {
  /// Diameter in logical pixels.
  pub size: f64,
}

impl LineOptions {
  fn new(color: Brush) -> Self { LineOptions { width: 1.5, color, markers: None } }
}

impl LineAxes {
  /// Missing values become gaps in the line.
  pub(crate) fn new(x: &Column, y: &Column, color: Brush) -> PolarsResult<Self> {
    polars_ensure!(
      x.len() == y.len(),
      ShapeMismatch: "x has {} values but y has {}", x.len(), y.len()
    );

    let x = x.cast(&DataType::Float64)?;
    let y = y.cast(&DataType::Float64)?;
    let points = x
      .as_materialized_series()
      .f64()?
      .into_iter()
      .zip(y.as_materialized_series().f64()?.into_iter())
      .map(|(x, y)| Point::new(x.unwrap_or(f64::NAN), y.unwrap_or(f64::NAN)))
      .collect();

    Ok(LineAxes { points, options: LineOptions::new(color) })
  }

  pub fn width(&mut self, width: f64) -> &mut Self {
    self.options.width = width;
    self
  }

  pub fn markers(&mut self, size: f64) -> &mut Self {
    self.options.markers = Some(MarkerOptions { size });
    self
  }

  pub fn points(&self) -> &[Point] { &self.points }
  pub fn options(&self) -> &LineOptions { &self.options }

  pub(crate) fn data_bounds(&self) -> Option<Bounds> { Bounds::from_points(&self.points) }

  /// Builds the line in viewport space, starting a new segment after every
  /// non-finite point.
  pub(crate) fn path(&self, transform: Affine) -> BezPath {
    let mut shape = BezPath::new();
    let mut pen_down = false;

    for point in &self.points {
      if !(point.x.is_finite() && point.y.is_finite()) {
        pen_down = false;
        continue;
      }

      let point = transform * *point;
      if pen_down {
        shape.line_to(point);
      } else {
        shape.move_to(point);
        pen_down = true;
      }
    }

    shape
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    let stroke = Stroke::new(self.options.width);
    render.stroke(&self.path(transform), Affine::IDENTITY, &self.options.color, &stroke);

    if let Some(markers) = &self.options.markers {
      for point in self.points.iter().filter(|p| p.x.is_finite() && p.y.is_finite()) {
        let outline = marker::circle(transform * *point, markers.size);
        render.fill(&outline, Affine::IDENTITY, &self.options.color);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use kurbo::PathEl;
  use peniko::Color;

  use super::*;

  fn line(x: &[f64], y: &[f64]) -> LineAxes {
    let x = Column::new("x".into(), x);
    let y = Column::new("y".into(), y);
    LineAxes::new(&x, &y, Brush::Solid(Color::BLACK)).unwrap()
  }

  #[test]
  fn keeps_file_order() {
    let axes = line(&[3.0, 1.0, 2.0], &[0.0, 1.0, 4.0]);
    let xs: Vec<f64> = axes.points().iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![3.0, 1.0, 2.0]);
  }

  #[test]
  fn nan_breaks_the_line() {
    let axes = line(&[0.0, 1.0, 2.0, 3.0], &[0.0, f64::NAN, 2.0, 3.0]);
    let path = axes.path(Affine::IDENTITY);
    let moves = path.elements().iter().filter(|el| matches!(el, PathEl::MoveTo(_))).count();
    let lines = path.elements().iter().filter(|el| matches!(el, PathEl::LineTo(_))).count();
    assert_eq!(moves, 2);
    assert_eq!(lines, 1);
  }

  #[test]
  fn bounds_ignore_missing_points() {
    let axes = line(&[0.0, 5.0, f64::NAN], &[-1.0, 1.0, 100.0]);
    let bounds = axes.data_bounds().unwrap();
    assert_eq!((bounds.x.min, bounds.x.max), (0.0, 5.0));
    assert_eq!((bounds.y.min, bounds.y.max), (-1.0, 1.0));
  }

  #[test]
  fn mismatched_columns_are_rejected() {
    let x = Column::new("x".into(), &[1.0, 2.0]);
    let y = Column::new("y".into(), &[1.0]);
    assert!(LineAxes::new(&x, &y, Brush::Solid(Color::BLACK)).is_err());
  }
}
