use std::{fs, path::Path};

use plotdir::{DisplayError, Error, LoadError, Plot, Presenter, RunConfig, Runner};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq)]
struct Shown {
  title:  String,
  points: Vec<(f64, f64)>,
}

#[derive(Default)]
struct Recorder {
  shown: Vec<Shown>,
}

impl Presenter for Recorder {
  fn present(&mut self, plot: &Plot) -> Result<(), DisplayError> {
    self.shown.push(Shown {
      title:  plot.title_text().unwrap_or_default().to_string(),
      points: plot.lines()[0].points().iter().map(|p| (p.x, p.y)).collect(),
    });
    Ok(())
  }
}

fn data_dir(files: &[(&str, &str)]) -> TempDir {
  let dir = tempfile::tempdir().unwrap();
  for (name, contents) in files {
    fs::write(dir.path().join(name), contents).unwrap();
  }
  dir
}

fn titles(recorder: &Recorder) -> Vec<&str> {
  recorder.shown.iter().map(|s| s.title.as_str()).collect()
}

fn run(dir: &Path, recorder: &mut Recorder) -> plotdir::Result<plotdir::RunSummary> {
  Runner::new(RunConfig::new(dir), recorder).run()
}

#[test]
fn shows_csv_files_in_order_and_skips_the_rest() {
  let dir = data_dir(&[
    ("b.csv", "0,1\n1,0\n"),
    ("notes.txt", "not, a, csv, file\n???\n"),
    ("a.csv", "1,2\n3,4\n5,6\n"),
  ]);

  let mut recorder = Recorder::default();
  let summary = run(dir.path(), &mut recorder).unwrap();

  assert_eq!(titles(&recorder), vec!["a.csv", "b.csv"]);
  assert_eq!(summary.presented, vec!["a.csv".to_string(), "b.csv".to_string()]);
}

#[test]
fn points_keep_row_order() {
  let dir = data_dir(&[("a.csv", "1,2\n3,4\n5,6\n")]);

  let mut recorder = Recorder::default();
  run(dir.path(), &mut recorder).unwrap();

  let points = &recorder.shown[0].points;
  let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
  let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
  assert_eq!(xs, vec![1.0, 3.0, 5.0]);
  assert_eq!(ys, vec![2.0, 4.0, 6.0]);
}

#[test]
fn trailing_blank_lines_are_still_shown() {
  let dir = data_dir(&[("a.csv", "1,2\n3,4\n\n"), ("b.csv", "0,0\n\n1,1\n\n\n")]);

  let mut recorder = Recorder::default();
  run(dir.path(), &mut recorder).unwrap();

  assert_eq!(titles(&recorder), vec!["a.csv", "b.csv"]);
  assert_eq!(recorder.shown[0].points, vec![(1.0, 2.0), (3.0, 4.0)]);
  assert_eq!(recorder.shown[1].points, vec![(0.0, 0.0), (1.0, 1.0)]);
}

#[test]
fn empty_directory_shows_nothing() {
  let dir = data_dir(&[]);

  let mut recorder = Recorder::default();
  let summary = run(dir.path(), &mut recorder).unwrap();

  assert!(recorder.shown.is_empty());
  assert!(summary.presented.is_empty());
}

#[test]
fn short_row_stops_the_run_at_that_file() {
  let dir = data_dir(&[("a.csv", "1,2\n"), ("b.csv", "1,2\n7\n"), ("c.csv", "3,4\n")]);

  let mut recorder = Recorder::default();
  let err = run(dir.path(), &mut recorder).unwrap_err();

  match err {
    Error::Load { path, source: LoadError::MissingField { row: 2, column: "y" } } => {
      assert_eq!(path.file_name().unwrap(), "b.csv");
    }
    other => panic!("expected a load error for b.csv, got {other:?}"),
  }
  assert_eq!(titles(&recorder), vec!["a.csv"]);
}

#[test]
fn non_numeric_field_stops_the_run() {
  let dir = data_dir(&[("a.csv", "1,2\nthree,4\n")]);

  let mut recorder = Recorder::default();
  let err = run(dir.path(), &mut recorder).unwrap_err();

  assert!(matches!(err, Error::Load { .. }), "{err:?}");
  assert!(recorder.shown.is_empty());
}

#[test]
fn missing_directory_fails_before_showing_anything() {
  let dir = data_dir(&[]);
  let missing = dir.path().join("csv_data");

  let mut recorder = Recorder::default();
  let err = run(&missing, &mut recorder).unwrap_err();

  match err {
    Error::ListDir { source, .. } => assert_eq!(source.kind(), std::io::ErrorKind::NotFound),
    other => panic!("expected a listing error, got {other:?}"),
  }
  assert!(recorder.shown.is_empty());
}

#[test]
fn repeated_runs_show_the_same_plots() {
  let dir = data_dir(&[("x2.csv", "0,0\n1,1\n2,4\n"), ("line.csv", "0,1\n1,3\n")]);

  let mut first = Recorder::default();
  let mut second = Recorder::default();
  run(dir.path(), &mut first).unwrap();
  run(dir.path(), &mut second).unwrap();

  assert_eq!(first.shown.len(), 2);
  assert_eq!(first.shown, second.shown);
}

#[test]
fn display_failure_ends_the_run() {
  struct NoDisplay {
    attempts: usize,
  }

  impl Presenter for NoDisplay {
    fn present(&mut self, _: &Plot) -> Result<(), DisplayError> {
      self.attempts += 1;
      Err(DisplayError::Adapter("no display".to_string()))
    }
  }

  let dir = data_dir(&[("a.csv", "1,2\n"), ("b.csv", "3,4\n")]);
  let mut presenter = NoDisplay { attempts: 0 };
  let err = Runner::new(RunConfig::new(dir.path()), &mut presenter).run().unwrap_err();

  assert!(matches!(err, Error::Display(DisplayError::Adapter(_))), "{err:?}");
  assert_eq!(presenter.attempts, 1);
}
