use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;
use taskplot::chart::{self, ChartOptions};
use taskplot::summary::write_summary;
use taskplot::{DateRange, Result, TaskPlot};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2014, 2, day).expect("valid February date")
}

fn main() -> Result<()> {
    let mut taskplot = TaskPlot::new();
    taskplot.add_effort("READING", date(1), 0.5);
    taskplot.add_effort("READING", date(5), 1.0);
    taskplot.add_effort("READING", date(8), 0.5);
    taskplot.add_effort("READING", date(12), 0.5);
    taskplot.add_effort("CODING", date(1), 1.0);
    taskplot.add_effort("CODING", date(3), 1.0);
    taskplot.add_effort("CODING", date(7), 1.0);
    taskplot.add_effort("MUSIC", date(9), 1.0);
    taskplot.add_effort("MUSIC", date(15), 1.0);

    write_summary(&mut std::io::stdout(), &taskplot, None, DateRange::default())?;
    chart::render(
        &taskplot,
        None,
        DateRange::default(),
        &BTreeMap::new(),
        Path::new("taskplot.png"),
        &ChartOptions::default(),
    )
}
