use std::{io, path::PathBuf};

use polars::error::PolarsError;
use thiserror::Error;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum Error {
  /// The data directory could not be listed (missing, not a directory, ...)
  #[error("cannot list {}", path.display())]
  ListDir {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  /// A qualifying file did not parse as two numeric columns
  #[error("cannot load {}", path.display())]
  Load {
    path:   PathBuf,
    #[source]
    source: LoadError,
  },

  #[error(transparent)]
  Display(#[from] DisplayError),
}

#[derive(Debug, Error)]
pub enum LoadError {
  #[error(transparent)]
  Csv(#[from] PolarsError),

  #[error("row {row} has no `{column}` field")]
  MissingField { row: usize, column: &'static str },

  #[error("file has no rows")]
  Empty,
}

/// Failures setting up or driving a plot window.
#[derive(Debug, Error)]
pub enum DisplayError {
  #[error("event loop: {0}")]
  EventLoop(#[from] winit::error::EventLoopError),

  #[error("window: {0}")]
  Window(#[from] winit::error::OsError),

  #[error("surface: {0}")]
  Surface(#[from] vello::wgpu::CreateSurfaceError),

  #[error("gpu adapter: {0}")]
  Adapter(String),

  #[error("gpu device: {0}")]
  Device(#[from] vello::wgpu::RequestDeviceError),

  #[error("renderer: {0}")]
  Renderer(#[from] vello::Error),
}

/// Bad command line arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("unknown argument `{0}`")]
  UnknownArgument(String),

  #[error("`{0}` expects a value")]
  MissingValue(String),

  #[error("invalid value `{value}` for `{flag}`")]
  InvalidValue { flag: String, value: String },

  #[error("more than one data directory given")]
  ExtraDirectory,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Logs and discards an error where a failure should not stop the caller.
pub(crate) trait ResultExt<T> {
  fn log_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        log::warn!("{e}");
        None
      }
    }
  }
}
