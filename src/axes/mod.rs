mod line;

pub use line::{LineAxes, LineOptions, MarkerOptions};
use peniko::Brush;
use polars::prelude::*;

use crate::{Plot, theme};

/// One plot axis. Only the label is configurable; limits follow the data.
#[derive(Debug, Clone, Default)]
pub struct Axis {
  title: Option<String>,
}

impl Axis {
  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn title_text(&self) -> Option<&str> { self.title.as_deref() }
}

impl Plot {
  /// Adds a line series through `(x[i], y[i])` in row order.
  pub fn line(&mut self, x: &Column, y: &Column) -> PolarsResult<&mut LineAxes> {
    let color = Brush::Solid(theme::SERIES.nth(self.lines.len()));
    self.lines.push(LineAxes::new(x, y, color)?);
    let index = self.lines.len() - 1;
    Ok(&mut self.lines[index])
  }
}
