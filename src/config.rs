//! Run configuration, taken from the command line and environment.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Directory read when neither an argument nor `PLOTDIR_DATA_DIR` names one.
pub const DEFAULT_DATA_DIR: &str = "csv_data";
pub const DATA_DIR_ENV: &str = "PLOTDIR_DATA_DIR";

pub const USAGE: &str = "\
usage: plotdir [DIR] [--width PX] [--height PX] [--marker-size PX] [--line-width PX]

Shows every *.csv file in DIR (default: $PLOTDIR_DATA_DIR, then csv_data) as a
line plot, one window at a time. Close the window, or press q or Escape, to
move on to the next file.";

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
  pub data_dir: PathBuf,
  pub style:    FigureStyle,
}

/// Geometry shared by every figure of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureStyle {
  /// Window size in logical pixels.
  pub width:       u32,
  pub height:      u32,
  /// Marker diameter in logical pixels.
  pub marker_size: f64,
  pub line_width:  f64,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
  Run(RunConfig),
  Help,
}

impl Default for RunConfig {
  fn default() -> Self {
    RunConfig { data_dir: PathBuf::from(DEFAULT_DATA_DIR), style: FigureStyle::default() }
  }
}

impl Default for FigureStyle {
  fn default() -> Self { FigureStyle { width: 1000, height: 500, marker_size: 2.0, line_width: 1.5 } }
}

impl RunConfig {
  pub fn new(data_dir: impl Into<PathBuf>) -> Self {
    RunConfig { data_dir: data_dir.into(), ..Default::default() }
  }

  /// Parses the arguments after the program name. `env_dir` is the value of
  /// [`DATA_DIR_ENV`], used when no directory argument is given.
  pub fn from_args(
    args: impl IntoIterator<Item = String>,
    env_dir: Option<String>,
  ) -> Result<Command, ConfigError> {
    let mut config = RunConfig::default();
    let mut dir = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
      let (flag, inline) = match arg.split_once('=') {
        Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
        _ => (arg.clone(), None),
      };

      match flag.as_str() {
        "-h" | "--help" => return Ok(Command::Help),
        "--width" | "--height" | "--marker-size" | "--line-width" => {
          let value =
            inline.or_else(|| args.next()).ok_or_else(|| ConfigError::MissingValue(flag.clone()))?;
          config.style.set(&flag, &value)?;
        }
        _ if flag.starts_with('-') && flag.len() > 1 => {
          return Err(ConfigError::UnknownArgument(arg));
        }
        _ => {
          if dir.replace(PathBuf::from(arg)).is_some() {
            return Err(ConfigError::ExtraDirectory);
          }
        }
      }
    }

    if let Some(dir) = dir.or_else(|| env_dir.filter(|d| !d.is_empty()).map(PathBuf::from)) {
      config.data_dir = dir;
    }
    Ok(Command::Run(config))
  }
}

impl FigureStyle {
  fn set(&mut self, flag: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidValue { flag: flag.to_string(), value: value.to_string() };

    match flag {
      "--width" => self.width = value.parse::<u32>().ok().filter(|v| *v > 0).ok_or_else(invalid)?,
      "--height" => {
        self.height = value.parse::<u32>().ok().filter(|v| *v > 0).ok_or_else(invalid)?
      }
      "--marker-size" => {
        self.marker_size =
          value.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0).ok_or_else(invalid)?
      }
      "--line-width" => {
        self.line_width =
          value.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0).ok_or_else(invalid)?
      }
      _ => return Err(ConfigError::UnknownArgument(flag.to_string())),
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(args: &[&str], env: Option<&str>) -> Result<Command, ConfigError> {
    RunConfig::from_args(args.iter().map(|s| s.to_string()), env.map(str::to_string))
  }

  fn run(args: &[&str], env: Option<&str>) -> RunConfig {
    match parse(args, env).unwrap() {
      Command::Run(config) => config,
      Command::Help => panic!("unexpected help"),
    }
  }

  #[test]
  fn defaults() {
    let config = run(&[], None);
    assert_eq!(config.data_dir, PathBuf::from("csv_data"));
    assert_eq!(config.style, FigureStyle::default());
    assert_eq!((config.style.width, config.style.height), (1000, 500));
  }

  #[test]
  fn directory_argument_beats_environment() {
    assert_eq!(run(&["plots"], Some("from_env")).data_dir, PathBuf::from("plots"));
    assert_eq!(run(&[], Some("from_env")).data_dir, PathBuf::from("from_env"));
    assert_eq!(run(&[], Some("")).data_dir, PathBuf::from("csv_data"));
  }

  #[test]
  fn style_flags() {
    let config = run(&["--width", "800", "--height=400", "--marker-size", "3.5", "data"], None);
    assert_eq!(config.style.width, 800);
    assert_eq!(config.style.height, 400);
    assert_eq!(config.style.marker_size, 3.5);
    assert_eq!(config.data_dir, PathBuf::from("data"));
  }

  #[test]
  fn help() {
    assert_eq!(parse(&["dir", "--help"], None), Ok(Command::Help));
  }

  #[test]
  fn bad_arguments() {
    assert_eq!(parse(&["--colour"], None), Err(ConfigError::UnknownArgument("--colour".into())));
    assert_eq!(parse(&["--width"], None), Err(ConfigError::MissingValue("--width".into())));
    assert_eq!(
      parse(&["--width", "wide"], None),
      Err(ConfigError::InvalidValue { flag: "--width".into(), value: "wide".into() })
    );
    assert_eq!(
      parse(&["--height", "0"], None).unwrap_err().to_string(),
      "invalid value `0` for `--height`"
    );
    assert_eq!(parse(&["a", "b"], None), Err(ConfigError::ExtraDirectory));
  }
}
