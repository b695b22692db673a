//! The directory walk: list, load and present one plot per CSV file.

use std::{
  fs,
  path::{Path, PathBuf},
};

use crate::{
  Plot,
  config::{FigureStyle, RunConfig},
  dataset::Dataset,
  error::{DisplayError, Error, LoadError, Result},
};

/// Shows a plot and returns once the viewer is done with it.
pub trait Presenter {
  fn present(&mut self, plot: &Plot) -> std::result::Result<(), DisplayError>;
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
  fn present(&mut self, plot: &Plot) -> std::result::Result<(), DisplayError> {
    (**self).present(plot)
  }
}

pub struct Runner<P> {
  config:    RunConfig,
  presenter: P,
}

/// What a completed run showed, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
  pub presented: Vec<String>,
}

impl<P: Presenter> Runner<P> {
  pub fn new(config: RunConfig, presenter: P) -> Self { Runner { config, presenter } }

  pub fn config(&self) -> &RunConfig { &self.config }

  /// Presents every qualifying file of the data directory, in file name
  /// order. The first file that fails to load or display ends the run.
  pub fn run(&mut self) -> Result<RunSummary> {
    let files = qualifying_files(&self.config.data_dir)?;
    log::info!("{} csv file(s) in {}", files.len(), self.config.data_dir.display());

    let mut summary = RunSummary::default();
    for path in files {
      let dataset =
        Dataset::load(&path).map_err(|source| Error::Load { path: path.clone(), source })?;
      let plot = figure(&dataset, &self.config.style)
        .map_err(|e| Error::Load { path: path.clone(), source: LoadError::Csv(e) })?;

      log::info!("showing {} ({} points)", dataset.name(), dataset.len());
      self.presenter.present(&plot)?;
      summary.presented.push(dataset.name().to_string());
    }

    Ok(summary)
  }
}

/// Entries of `dir` whose name ends in `.csv`, sorted by file name.
pub fn qualifying_files(dir: &Path) -> Result<Vec<PathBuf>> {
  let list_err = |source| Error::ListDir { path: dir.to_path_buf(), source };

  let mut files = vec![];
  for entry in fs::read_dir(dir).map_err(list_err)? {
    let entry = entry.map_err(list_err)?;
    let name = entry.file_name();
    if name.to_string_lossy().ends_with(".csv") {
      files.push(entry.path());
    } else {
      log::debug!("skipping {}", entry.path().display());
    }
  }

  files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
  Ok(files)
}

/// The figure for one dataset: titled with the file name, axes labeled `x`
/// and `y`, grid on, one line through the points in file order with a circle
/// at each point.
pub fn figure(dataset: &Dataset, style: &FigureStyle) -> polars::error::PolarsResult<Plot> {
  let mut plot = Plot::new();
  plot.title(dataset.name()).grid(true).size(f64::from(style.width), f64::from(style.height));
  plot.x.title("x");
  plot.y.title("y");
  plot
    .line(dataset.x(), dataset.y())?
    .width(style.line_width)
    .markers(style.marker_size);
  Ok(plot)
}
