use crate::{DateRange, Result, TaskPlot, TaskPlotError, DATE_FORMAT};
use std::io::Write;

const EFFORT_WIDTH: usize = 7;

/// Writes the daily and the cumulative summary of `task_names` (all tasks when None),
/// followed by the effort totals:
///
/// ```text
/// [DAILY]
///               CHESS     MUSIC
/// 2014-02-01:     0.0 +     3.0 =     3.0
/// ...
///
/// [CUMULATIVE]
/// ...
///
/// TOTAL: 15.0 hours in 3 days (5.0 h/d)
/// ```
pub fn write_summary(
    out: &mut dyn Write,
    taskplot: &TaskPlot,
    task_names: Option<&[String]>,
    range: DateRange,
) -> Result<()> {
    let (min_date, max_date) = taskplot.date_range().ok_or(TaskPlotError::NoData)?;
    // unknown task names fail before anything is written
    taskplot.total_effort(task_names)?;

    writeln!(out, "[DAILY]")?;
    write_bare_summary(out, taskplot, task_names, range, false)?;
    writeln!(out)?;
    writeln!(out, "[CUMULATIVE]")?;
    write_bare_summary(out, taskplot, task_names, range, true)?;

    let end = range.end.unwrap_or(max_date);
    let days = (end - min_date).num_days() + 1;
    writeln!(out)?;

    if let Some(names) = task_names {
        let tasks_effort = taskplot.total_effort(Some(names))?;
        writeln!(out, "TASKS: {}", effort_per_day(tasks_effort, days))?;
    }
    let total_effort = taskplot.total_effort(None)?;
    writeln!(out, "TOTAL: {}", effort_per_day(total_effort, days))?;
    Ok(())
}

/// One row per day, efforts per task and their sum.
/// The range start is never earlier than the first date of effort.
pub fn write_bare_summary(
    out: &mut dyn Write,
    taskplot: &TaskPlot,
    task_names: Option<&[String]>,
    range: DateRange,
    cumulative: bool,
) -> Result<()> {
    let (min_date, max_date) = taskplot.date_range().ok_or(TaskPlotError::NoData)?;
    let names = taskplot.resolve_task_names(task_names);
    let start = range.start.map_or(min_date, |s| s.max(min_date));
    let end = range.end.unwrap_or(max_date);

    let date_width = min_date.format(DATE_FORMAT).to_string().len();
    let name_width = names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max(EFFORT_WIDTH);

    let header: Vec<String> = names
        .iter()
        .map(|n| format!("{:>w$}", n, w = name_width))
        .collect();
    writeln!(out, "{}  {}", " ".repeat(date_width), header.join("   "))?;

    for (date, efforts) in taskplot.efforts(&names, start, end, cumulative)? {
        let cells: Vec<String> = efforts
            .iter()
            .map(|e| format!("{:>w$.1}", e, w = name_width))
            .collect();
        let total: f64 = efforts.iter().sum();
        writeln!(
            out,
            "{}: {} = {:>w$.1}",
            date.format(DATE_FORMAT),
            cells.join(" + "),
            total,
            w = EFFORT_WIDTH
        )?;
    }
    Ok(())
}

fn effort_per_day(effort: f64, days: i64) -> String {
    let per_day = if days > 0 { effort / days as f64 } else { 0. };
    format!("{:.1} hours in {} days ({:.1} h/d)", effort, days, per_day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_taskplot() -> TaskPlot {
        let mut tp = TaskPlot::new();
        tp.add_effort("MUSIC", date(2014, 2, 1), 1.);
        tp.add_effort("MUSIC", date(2014, 2, 1), 2.);
        tp.add_effort("CHESS", date(2014, 2, 2), 3.);
        tp.add_effort("CHESS", date(2014, 2, 2), 4.);
        tp.add_effort("CHESS", date(2014, 2, 3), 5.);
        tp
    }

    fn render(tp: &TaskPlot, task_names: Option<&[String]>, range: DateRange) -> String {
        let mut out = Vec::new();
        write_summary(&mut out, tp, task_names, range).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn summary_of_all_tasks() {
        let expected = "\
[DAILY]
              CHESS     MUSIC
2014-02-01:     0.0 +     3.0 =     3.0
2014-02-02:     7.0 +     0.0 =     7.0
2014-02-03:     5.0 +     0.0 =     5.0

[CUMULATIVE]
              CHESS     MUSIC
2014-02-01:     0.0 +     3.0 =     3.0
2014-02-02:     7.0 +     3.0 =    10.0
2014-02-03:    12.0 +     3.0 =    15.0

TOTAL: 15.0 hours in 3 days (5.0 h/d)
";
        assert_eq!(render(&test_taskplot(), None, DateRange::default()), expected);
    }

    #[test]
    fn summary_of_selected_tasks_over_a_later_range() {
        let names = vec!["CHESS".to_string()];
        let range = DateRange::new(Some(date(2014, 2, 3)), Some(date(2014, 2, 4)));
        let expected = "\
[DAILY]
              CHESS
2014-02-03:     5.0 =     5.0
2014-02-04:     0.0 =     0.0

[CUMULATIVE]
              CHESS
2014-02-03:    12.0 =    12.0
2014-02-04:    12.0 =    12.0

TASKS: 12.0 hours in 4 days (3.0 h/d)
TOTAL: 15.0 hours in 4 days (3.8 h/d)
";
        assert_eq!(render(&test_taskplot(), Some(&names[..]), range), expected);
    }

    #[test]
    fn long_task_names_widen_the_columns() {
        let mut tp = TaskPlot::new();
        tp.add_effort("PROGRAMMING", date(2014, 2, 1), 1.5);
        tp.add_effort("GYM", date(2014, 2, 1), 1.);
        let mut out = Vec::new();
        write_bare_summary(&mut out, &tp, None, DateRange::default(), false).unwrap();
        let expected = concat!(
            "                    GYM   PROGRAMMING\n",
            "2014-02-01:         1.0 +         1.5 =     2.5\n",
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn start_before_first_effort_is_clamped() {
        let mut out = Vec::new();
        let range = DateRange::new(Some(date(2014, 1, 1)), Some(date(2014, 2, 1)));
        write_bare_summary(&mut out, &test_taskplot(), None, range, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().starts_with("2014-02-01:"));
    }

    #[test]
    fn empty_taskplot_has_no_summary() {
        let mut out = Vec::new();
        let err = write_summary(&mut out, &TaskPlot::new(), None, DateRange::default());
        assert!(matches!(err, Err(TaskPlotError::NoData)));
    }

    #[test]
    fn unknown_task_is_an_error() {
        let mut out = Vec::new();
        let names = vec!["GOLF".to_string()];
        let err = write_summary(&mut out, &test_taskplot(), Some(&names[..]), DateRange::default());
        assert!(matches!(err, Err(TaskPlotError::UnknownTask(_))));
        assert!(out.is_empty());
    }
}
