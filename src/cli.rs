use super::{month_end, month_start, DateRange, Result, TaskPlotError, DATE_FORMAT, VERSION};
use chrono::{Duration, NaiveDate};
use clap::{App, Arg, ArgMatches, Values};
use std::ffi::OsString;
use std::path::PathBuf;

const LICENSE: &str = "\
This is free software. You are permitted to redistribute and use it in
source and binary forms, with or without modification, under the terms
of the Simplified BSD License.";

/// Date given on the command line for an open range bound
const OPEN_BOUND: &str = "-";

/// Days shown by the summary when no range is given, today included.
pub const SUMMARY_DAYS: i64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub path: PathBuf,
    pub datefmt: String,
    pub tasks: Option<Vec<String>>,
    pub data: DateRange,
    pub summary: DateRange,
    pub graph: DateRange,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// summary range, the last `SUMMARY_DAYS` days for any open bound
    pub fn summary_range(&self, today: NaiveDate) -> DateRange {
        DateRange::new(
            Some(
                self.summary
                    .start
                    .unwrap_or(today - Duration::days(SUMMARY_DAYS - 1)),
            ),
            Some(self.summary.end.unwrap_or(today)),
        )
    }

    /// graph range, the current month for any open bound
    pub fn graph_range(&self, today: NaiveDate) -> DateRange {
        DateRange::new(
            Some(self.graph.start.unwrap_or_else(|| month_start(today))),
            Some(self.graph.end.unwrap_or_else(|| month_end(today))),
        )
    }
}

fn range_arg<'a>(name: &'a str, short: &'a str, help: &'a str) -> Arg<'a, 'a> {
    Arg::with_name(name)
        .help(help)
        .short(short)
        .long(name)
        .takes_value(true)
        .number_of_values(2)
        .value_names(&["START", "END"])
}

pub fn build_cli() -> App<'static, 'static> {
    let arg_path = Arg::with_name("path")
        .help("path to a directory containing task files, or a file containing a task list")
        .index(1)
        .default_value(".");
    let arg_datefmt = Arg::with_name("datefmt")
        .help(
            "date format of the task file names (without extension) in a task directory, \
            or of the dates in a task list",
        )
        .short("f")
        .long("datefmt")
        .value_name("FORMAT")
        .takes_value(true)
        .default_value(DATE_FORMAT);
    let arg_tasks = Arg::with_name("tasks")
        .help("tasks to summarize and plot (default: all tasks)")
        .short("t")
        .long("tasks")
        .value_name("TASK")
        .takes_value(true)
        .multiple(true);
    let arg_data = range_arg(
        "data",
        "d",
        "date range of the effort data to read, '-' for open (default: all data)",
    );
    let arg_summary = range_arg(
        "summary",
        "s",
        "date range of the summary, '-' for default (default: last 5 days)",
    );
    let arg_graph = range_arg(
        "graph",
        "g",
        "date range of the graph, '-' for default (default: current month)",
    );
    let arg_output = Arg::with_name("output")
        .help("output path of the graph image, png or svg")
        .short("o")
        .long("output")
        .value_name("IMAGE")
        .takes_value(true)
        .default_value("taskplot.png");
    let arg_config = Arg::with_name("config")
        .help("configuration file (default: ~/.taskplotrc)")
        .short("c")
        .long("config")
        .value_name("FILE")
        .takes_value(true);
    App::new("taskplot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to summarize and plot the cumulative effort spent on tasks")
        .after_help(LICENSE)
        .arg(arg_path)
        .arg(arg_datefmt)
        .arg(arg_tasks)
        .arg(arg_data)
        .arg(arg_summary)
        .arg(arg_graph)
        .arg(arg_output)
        .arg(arg_config)
}

/// Takes the CLI arguments of the process, exits on --help, --version and usage errors.
pub fn parse_cli() -> Result<CliArgs> {
    args_from_matches(&build_cli().get_matches())
}

/// Same as `parse_cli`, but reporting usage errors instead of exiting.
pub fn parse_cli_from<I, T>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_cli()
        .get_matches_from_safe(args)
        .map_err(|e| TaskPlotError::InvalidArgument(e.message))?;
    args_from_matches(&matches)
}

fn args_from_matches(matches: &ArgMatches) -> Result<CliArgs> {
    Ok(CliArgs {
        path: PathBuf::from(matches.value_of("path").unwrap_or(".")),
        datefmt: matches.value_of("datefmt").unwrap_or(DATE_FORMAT).to_string(),
        tasks: matches
            .values_of("tasks")
            .map(|v| v.map(String::from).collect()),
        data: parse_range(matches.values_of("data"))?,
        summary: parse_range(matches.values_of("summary"))?,
        graph: parse_range(matches.values_of("graph"))?,
        output: PathBuf::from(matches.value_of("output").unwrap_or("taskplot.png")),
        config: matches.value_of("config").map(PathBuf::from),
    })
}

fn parse_range(values: Option<Values>) -> Result<DateRange> {
    let mut values = match values {
        Some(v) => v,
        None => return Ok(DateRange::default()),
    };
    let start = parse_date(values.next())?;
    let end = parse_date(values.next())?;
    Ok(DateRange::new(start, end))
}

/// a YYYY-MM-DD date, None for the open bound
pub fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value {
        None | Some(OPEN_BOUND) => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|_| TaskPlotError::InvalidArgument(format!("invalid date: '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse_cli_from(vec!["taskplot"]).unwrap();
        assert_eq!(
            args,
            CliArgs {
                path: PathBuf::from("."),
                datefmt: DATE_FORMAT.to_string(),
                tasks: None,
                data: DateRange::default(),
                summary: DateRange::default(),
                graph: DateRange::default(),
                output: PathBuf::from("taskplot.png"),
                config: None,
            }
        );
    }

    #[test]
    fn all_options() {
        let args = parse_cli_from(vec![
            "taskplot",
            "tasks.txt",
            "-f",
            "%d/%m/%Y",
            "-d",
            "2014-02-01",
            "-",
            "-s",
            "-",
            "2014-02-10",
            "--graph",
            "2014-01-01",
            "2014-03-31",
            "-o",
            "effort.svg",
            "-c",
            "rc.toml",
            "-t",
            "GYM",
            "WORK",
        ])
        .unwrap();
        assert_eq!(args.path, PathBuf::from("tasks.txt"));
        assert_eq!(args.datefmt, "%d/%m/%Y");
        assert_eq!(args.tasks, Some(vec!["GYM".to_string(), "WORK".to_string()]));
        assert_eq!(args.data, DateRange::new(Some(date(2014, 2, 1)), None));
        assert_eq!(args.summary, DateRange::new(None, Some(date(2014, 2, 10))));
        assert_eq!(
            args.graph,
            DateRange::new(Some(date(2014, 1, 1)), Some(date(2014, 3, 31)))
        );
        assert_eq!(args.output, PathBuf::from("effort.svg"));
        assert_eq!(args.config, Some(PathBuf::from("rc.toml")));
    }

    #[test]
    fn invalid_dates_are_rejected() {
        let err = parse_cli_from(vec!["taskplot", "-g", "2014-02-30", "-"]).unwrap_err();
        assert!(matches!(err, TaskPlotError::InvalidArgument(_)));
        assert!(parse_cli_from(vec!["taskplot", "-s", "2014-02-01"]).is_err());
    }

    #[test]
    fn default_ranges_follow_today() {
        let args = parse_cli_from(vec!["taskplot"]).unwrap();
        let today = date(2014, 2, 17);
        assert_eq!(
            args.summary_range(today),
            DateRange::new(Some(date(2014, 2, 13)), Some(today))
        );
        assert_eq!(
            args.graph_range(today),
            DateRange::new(Some(date(2014, 2, 1)), Some(date(2014, 2, 28)))
        );

        let args = parse_cli_from(vec!["taskplot", "-g", "2014-01-15", "-"]).unwrap();
        assert_eq!(
            args.graph_range(today),
            DateRange::new(Some(date(2014, 1, 15)), Some(date(2014, 2, 28)))
        );
    }
}
