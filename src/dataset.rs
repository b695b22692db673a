//! Loading of headerless `x,y` CSV files.

use std::{path::Path, sync::Arc};

use polars::prelude::*;

use crate::error::LoadError;

/// One file's worth of `(x, y)` pairs, in file order.
#[derive(Debug, Clone)]
pub struct Dataset {
  name: String,
  x:    Column,
  y:    Column,
}

impl Dataset {
  /// Reads `path` as rows of exactly two numeric fields. There is no header
  /// row: a header would be read as data and fail to parse.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
    let path = path.as_ref();
    let frame = CsvReadOptions::default()
      .with_has_header(false)
      .with_schema(Some(schema()))
      .try_into_reader_with_file_path(Some(path.to_path_buf()))?
      .finish()?;

    let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy().into_owned();
    Dataset::from_frame(name, &frame)
  }

  /// Builds a dataset from a frame with `x` and `y` columns. Rows missing
  /// both values (blank lines) are dropped; a row missing only one is an
  /// error, as is a frame left with no rows.
  pub fn from_frame(name: impl Into<String>, frame: &DataFrame) -> Result<Self, LoadError> {
    let x = frame.column("x")?.cast(&DataType::Float64)?;
    let y = frame.column("y")?.cast(&DataType::Float64)?;

    let x_missing = x.as_materialized_series().is_null();
    let y_missing = y.as_materialized_series().is_null();

    // Short rows come back from the reader padded with nulls.
    if let Some(row) = (&x_missing).into_iter().zip(&y_missing).position(|(x, y)| x != y) {
      let column = if x_missing.get(row) == Some(true) { "x" } else { "y" };
      return Err(LoadError::MissingField { row: row + 1, column });
    }

    let keep = !(&x_missing & &y_missing);
    let x = Column::from(x.as_materialized_series().filter(&keep)?);
    let y = Column::from(y.as_materialized_series().filter(&keep)?);

    if x.len() < frame.height() {
      log::debug!("skipped {} blank line(s)", frame.height() - x.len());
    }
    if x.len() == 0 {
      return Err(LoadError::Empty);
    }

    Ok(Dataset { name: name.into(), x, y })
  }

  pub fn name(&self) -> &str { &self.name }
  pub fn len(&self) -> usize { self.x.len() }
  pub fn is_empty(&self) -> bool { self.x.len() == 0 }

  pub fn x(&self) -> &Column { &self.x }
  pub fn y(&self) -> &Column { &self.y }

  pub fn points(&self) -> PolarsResult<Vec<(f64, f64)>> {
    let x = self.x.as_materialized_series().f64()?;
    let y = self.y.as_materialized_series().f64()?;
    Ok(x.into_no_null_iter().zip(y.into_no_null_iter()).collect())
  }
}

fn schema() -> SchemaRef {
  Arc::new(Schema::from_iter([
    Field::new("x".into(), DataType::Float64),
    Field::new("y".into(), DataType::Float64),
  ]))
}
