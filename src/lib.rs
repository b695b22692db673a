//! Line plots of headerless `x,y` CSV files, shown one window at a time.
//!
//! ```no_run
//! use plotdir::{RunConfig, Runner, Viewer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut runner = Runner::new(RunConfig::default(), Viewer::new());
//! runner.run()?;
//! # Ok(())
//! # }
//! ```

use kurbo::{Line, Point, Rect, Size, Stroke};
use parley::FontWeight;

use crate::render::{Align, DrawText, Render};

mod axes;
mod bounds;
pub mod config;
pub mod dataset;
pub mod error;
mod marker;
mod render;
pub mod runner;
mod theme;

pub use axes::{Axis, LineAxes, LineOptions, MarkerOptions};
pub use bounds::{Bounds, NiceTicksIter, Range};
pub use config::{FigureStyle, RunConfig};
pub use dataset::Dataset;
pub use error::{ConfigError, DisplayError, Error, LoadError, Result};
pub use render::Viewer;
pub use runner::{Presenter, RunSummary, Runner};

/// A single figure: a titled, labeled plot area holding line series.
pub struct Plot {
  title: Option<String>,
  pub x: Axis,
  pub y: Axis,
  grid:  bool,
  size:  Size,

  lines: Vec<LineAxes>,
}

impl Default for Plot {
  fn default() -> Self {
    Plot {
      title: None,
      x:     Axis::default(),
      y:     Axis::default(),
      grid:  false,
      size:  Size::new(640.0, 480.0),
      lines: vec![],
    }
  }
}

impl Plot {
  pub fn new() -> Plot { Plot::default() }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn grid(&mut self, grid: bool) -> &mut Self {
    self.grid = grid;
    self
  }

  /// Initial window size in logical pixels.
  pub fn size(&mut self, width: f64, height: f64) -> &mut Self {
    self.size = Size::new(width, height);
    self
  }

  pub fn title_text(&self) -> Option<&str> { self.title.as_deref() }
  pub fn has_grid(&self) -> bool { self.grid }
  pub fn figure_size(&self) -> Size { self.size }
  pub fn lines(&self) -> &[LineAxes] { &self.lines }

  /// The data rectangle shown in the plot area: every series plus a 5%
  /// margin on each side.
  pub fn view_bounds(&self) -> Bounds {
    self
      .lines
      .iter()
      .filter_map(LineAxes::data_bounds)
      .reduce(|a, b| a.union(b))
      .unwrap_or(Bounds::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0)))
      .nonsingular()
      .expand_by(0.05)
  }
}

impl Plot {
  pub(crate) fn draw(&self, render: &mut Render, size: Size) {
    const MARGIN_LEFT: f64 = 80.0;
    const MARGIN_RIGHT: f64 = 30.0;
    const MARGIN_TOP: f64 = 50.0;
    const MARGIN_BOTTOM: f64 = 60.0;
    const TICKS: u32 = 10;
    const TICK_LENGTH: f64 = 6.0;

    let viewport = Bounds::new(
      Range::new(MARGIN_LEFT, size.width - MARGIN_RIGHT),
      Range::new(size.height - MARGIN_BOTTOM, MARGIN_TOP),
    );
    let plot_area = Rect::new(viewport.x.min, viewport.y.max, viewport.x.max, viewport.y.min);

    let data_bounds = self.view_bounds();
    let transform = data_bounds.transform_to(viewport);

    let grid_stroke = Stroke::new(1.0);
    let tick_stroke = Stroke::new(1.0);

    let iter = data_bounds.x.nice_ticks(TICKS);
    let precision = iter.precision();
    for (x, vx) in iter
      .map(|v| (v, (transform * Point::new(v, 0.0)).x))
      .filter(|(_, vx)| viewport.x.contains(vx))
    {
      if self.grid {
        render.stroke(
          &Line::new((vx, plot_area.y0), (vx, plot_area.y1)),
          kurbo::Affine::IDENTITY,
          theme::GRID,
          &grid_stroke,
        );
      }
      render.stroke(
        &Line::new((vx, viewport.y.min), (vx, viewport.y.min + TICK_LENGTH)),
        kurbo::Affine::IDENTITY,
        theme::AXIS,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{x:.precision$}"),
        size: 12.0,
        position: Point::new(vx, viewport.y.min + TICK_LENGTH + 3.0),
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    let iter = data_bounds.y.nice_ticks(TICKS);
    let precision = iter.precision();
    for (y, vy) in iter
      .map(|v| (v, (transform * Point::new(0.0, v)).y))
      .filter(|(_, vy)| viewport.y.contains(vy))
    {
      if self.grid {
        render.stroke(
          &Line::new((plot_area.x0, vy), (plot_area.x1, vy)),
          kurbo::Affine::IDENTITY,
          theme::GRID,
          &grid_stroke,
        );
      }
      render.stroke(
        &Line::new((viewport.x.min, vy), (viewport.x.min - TICK_LENGTH, vy)),
        kurbo::Affine::IDENTITY,
        theme::AXIS,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{y:.precision$}"),
        size: 12.0,
        position: Point::new(viewport.x.min - TICK_LENGTH - 3.0, vy),
        horizontal_align: Align::End,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    for line in &self.lines {
      line.draw(render, transform);
    }

    render.stroke(&plot_area, kurbo::Affine::IDENTITY, theme::AXIS, &Stroke::new(1.0));

    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title,
        size: 20.0,
        weight: FontWeight::BOLD,
        position: Point::new(plot_area.center().x, plot_area.y0 - 12.0),
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    if let Some(label) = self.x.title_text() {
      render.draw_text(DrawText {
        text: label,
        size: 16.0,
        position: Point::new(plot_area.center().x, size.height - 10.0),
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    if let Some(label) = self.y.title_text() {
      render.draw_text(DrawText {
        text: label,
        size: 16.0,
        position: Point::new(12.0, plot_area.center().y),
        transform: kurbo::Affine::rotate(-std::f64::consts::FRAC_PI_2),
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }
  }
}

#[cfg(test)]
mod tests {
  use peniko::Brush;
  use polars::prelude::Column;

  use super::*;

  fn columns(x: &[f64], y: &[f64]) -> (Column, Column) {
    (Column::new("x".into(), x), Column::new("y".into(), y))
  }

  #[test]
  fn view_bounds_add_a_margin() {
    let (x, y) = columns(&[0.0, 10.0], &[0.0, 100.0]);
    let mut plot = Plot::new();
    plot.line(&x, &y).unwrap();

    let bounds = plot.view_bounds();
    assert!((bounds.x.min + 0.5).abs() < 1e-9 && (bounds.x.max - 10.5).abs() < 1e-9);
    assert!((bounds.y.min + 5.0).abs() < 1e-9 && (bounds.y.max - 105.0).abs() < 1e-9);
  }

  #[test]
  fn single_point_still_has_an_area() {
    let (x, y) = columns(&[2.0], &[0.0]);
    let mut plot = Plot::new();
    plot.line(&x, &y).unwrap();

    let bounds = plot.view_bounds();
    assert!(bounds.x.size() > 0.0);
    assert!(bounds.y.size() > 0.0);
  }

  #[test]
  fn empty_plot_uses_unit_bounds() {
    let bounds = Plot::new().view_bounds();
    assert!(bounds.x.contains(&0.5));
    assert!(bounds.y.contains(&0.5));
  }

  #[test]
  fn series_take_successive_colors() {
    let (x, y) = columns(&[0.0, 1.0], &[0.0, 1.0]);
    let mut plot = Plot::new();
    plot.line(&x, &y).unwrap();
    plot.line(&x, &y).unwrap();

    let colors: Vec<_> = plot
      .lines()
      .iter()
      .map(|l| match &l.options().color {
        Brush::Solid(c) => c.components,
        _ => panic!("expected a solid color"),
      })
      .collect();
    assert_ne!(colors[0], colors[1]);
  }

  #[test]
  fn draws_into_a_scene() {
    let (x, y) = columns(&[1.0, 3.0, 5.0], &[2.0, 4.0, 6.0]);
    let mut plot = Plot::new();
    plot.title("a.csv").grid(true);
    plot.x.title("x");
    plot.y.title("y");
    plot.line(&x, &y).unwrap().markers(2.0);

    let mut render = Render::new();
    plot.draw(&mut render, plot.figure_size());
    assert!(!render.scene.encoding().is_empty());
  }
}
