use anyhow::Context;
use plotdir::{
  Runner, Viewer,
  config::{self, Command, RunConfig},
};

fn main() -> anyhow::Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let config =
    match RunConfig::from_args(std::env::args().skip(1), std::env::var(config::DATA_DIR_ENV).ok())? {
      Command::Run(config) => config,
      Command::Help => {
        println!("{}", config::USAGE);
        return Ok(());
      }
    };

  let mut runner = Runner::new(config, Viewer::new());
  let summary = runner
    .run()
    .with_context(|| format!("plotting {}", runner.config().data_dir.display()))?;

  log::info!("done, {} plot(s) shown", summary.presented.len());
  Ok(())
}
