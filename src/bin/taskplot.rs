use chrono::prelude::*;
use log::info;
use std::io::Write;
use taskplot::chart::{self, ChartOptions};
use taskplot::cli::parse_cli;
use taskplot::config::Config;
use taskplot::summary::write_summary;
use taskplot::{Result, TaskPlot, TaskPlotError};

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = parse_cli()?;
    let today = Local::now().naive_local().date();

    let config = match args.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let color_map = config.color_map()?;

    info!(
        "read data from {} and plot to {}",
        args.path.display(),
        args.output.display()
    );
    let taskplot = TaskPlot::from_path(&args.path, args.data, &args.datefmt)?;
    if taskplot.is_empty() {
        return Err(TaskPlotError::NoEntries(args.path));
    }
    let tasks = args.tasks.as_deref();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_summary(&mut out, &taskplot, tasks, args.summary_range(today))?;
    out.flush()?;

    chart::render(
        &taskplot,
        tasks,
        args.graph_range(today),
        &color_map,
        &args.output,
        &ChartOptions::default(),
    )
}
