use chrono::prelude::*;
use chrono::Duration;
use std::collections::BTreeMap;
pub mod chart;
pub mod cli;
pub mod config;
pub mod days;
pub mod error;
pub mod input;
pub mod summary;

pub use error::{Result, TaskPlotError};

use days::DayIterator;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Default format of the dates in task file names and task lists.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Effort, in hours, of every `x` in a task entry.
pub const EFFORT_PER_MARK: f64 = 0.5;

/// Inclusive date bounds, None stands for unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| s <= date) && self.end.map_or(true, |e| date <= e)
    }
}

/// The effort spent on a single task, summed per day
#[derive(Debug, Clone, Default)]
pub struct Task {
    efforts: BTreeMap<NaiveDate, f64>,
}

impl Task {
    pub fn new() -> Task {
        Task::default()
    }

    /// add the effort to whatever was already recorded for the date
    pub fn add_effort(&mut self, date: NaiveDate, effort: f64) {
        *self.efforts.entry(date).or_insert(0.) += effort;
    }

    /// effort on the date, 0 when nothing was recorded
    pub fn effort(&self, date: NaiveDate) -> f64 {
        self.efforts.get(&date).copied().unwrap_or(0.)
    }

    pub fn total_effort(&self) -> f64 {
        self.efforts.values().sum()
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.efforts.keys().next().copied()
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.efforts.keys().next_back().copied()
    }
}

/// The main struct: effort per task name.
///
/// Effort can be fed from a task directory (`add_effort_from_directory`),
/// from a task list (`add_effort_from_file`) or directly with `add_effort`.
/// The same task and date can be fed several times, the efforts are summed.
#[derive(Debug, Clone, Default)]
pub struct TaskPlot {
    tasks: BTreeMap<String, Task>,
}

impl TaskPlot {
    pub fn new() -> TaskPlot {
        TaskPlot::default()
    }

    pub fn add_effort(&mut self, task_name: &str, date: NaiveDate, effort: f64) {
        self.tasks
            .entry(task_name.to_string())
            .or_insert_with(Task::new)
            .add_effort(date, effort);
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, task_name: &str) -> Result<&Task> {
        self.tasks
            .get(task_name)
            .ok_or_else(|| TaskPlotError::UnknownTask(task_name.to_string()))
    }

    pub fn sorted_task_names(&self) -> Vec<String> {
        self.tasks.keys().cloned().collect()
    }

    /// the given task names, or all of them sorted when None
    pub fn resolve_task_names(&self, task_names: Option<&[String]>) -> Vec<String> {
        match task_names {
            Some(names) => names.to_vec(),
            None => self.sorted_task_names(),
        }
    }

    /// total effort of the given tasks, all tasks when None
    pub fn total_effort(&self, task_names: Option<&[String]>) -> Result<f64> {
        let mut total = 0.;
        for name in self.resolve_task_names(task_names) {
            total += self.task(&name)?.total_effort();
        }
        Ok(total)
    }

    /// first and last date of effort on any task
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        min_and_max(
            self.tasks
                .values()
                .flat_map(|t| t.min_date().into_iter().chain(t.max_date())),
        )
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.date_range().map(|(min, _)| min)
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.date_range().map(|(_, max)| max)
    }

    /// Daily efforts of `task_names` for every day between `start` and `end`.
    ///
    /// Each item holds the date and one effort per task, in the order of `task_names`.
    /// With `cumulative` the efforts are summed from the first date of effort,
    /// also when `start` comes later, so that the first item already carries
    /// everything done before the range.
    pub fn efforts(
        &self,
        task_names: &[String],
        start: NaiveDate,
        end: NaiveDate,
        cumulative: bool,
    ) -> Result<Efforts<'_>> {
        let tasks = task_names
            .iter()
            .map(|name| self.task(name))
            .collect::<Result<Vec<&Task>>>()?;
        let first = match self.min_date() {
            Some(min) if cumulative && min < start => min,
            _ => start,
        };
        Ok(Efforts {
            running: vec![0.; tasks.len()],
            tasks,
            days: DayIterator::new(first, end),
            start,
            cumulative,
        })
    }
}

/// Iterator returned by `TaskPlot::efforts`.
#[derive(Debug, Clone)]
pub struct Efforts<'a> {
    tasks: Vec<&'a Task>,
    days: DayIterator,
    start: NaiveDate,
    cumulative: bool,
    running: Vec<f64>,
}

impl Iterator for Efforts<'_> {
    type Item = (NaiveDate, Vec<f64>);

    fn next(&mut self) -> Option<Self::Item> {
        for date in self.days.by_ref() {
            let daily: Vec<f64> = self.tasks.iter().map(|t| t.effort(date)).collect();
            if self.cumulative {
                for (r, e) in self.running.iter_mut().zip(daily.iter()) {
                    *r += e;
                }
            }
            if date >= self.start {
                let efforts = if self.cumulative {
                    self.running.clone()
                } else {
                    daily
                };
                return Some((date, efforts));
            }
        }
        None
    }
}

pub fn min_and_max<T: PartialOrd + Copy>(s: impl IntoIterator<Item = T>) -> Option<(T, T)> {
    let mut self_iter = s.into_iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (v, v),
        None => return None,
    };
    for es in self_iter {
        if es > max {
            max = es
        }
        if es < min {
            min = es
        }
    }
    Some((min, max))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    // day 1 + 31 days always lands in the following month
    month_start(month_start(date) + Duration::days(31)) - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
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

    #[test]
    fn total_effort() {
        let tp = TaskPlot::new();
        assert_eq!(tp.total_effort(None).unwrap(), 0.);
        assert!(matches!(
            tp.total_effort(Some(&names(&["INVALID"])[..])),
            Err(TaskPlotError::UnknownTask(_))
        ));

        let tp = test_taskplot();
        assert_eq!(tp.total_effort(None).unwrap(), 15.);
        assert_eq!(tp.total_effort(Some(&names(&["MUSIC"])[..])).unwrap(), 3.);
        assert_eq!(tp.total_effort(Some(&names(&["CHESS"])[..])).unwrap(), 12.);
        assert_eq!(tp.total_effort(Some(&[][..])).unwrap(), 0.);
        assert!(tp.total_effort(Some(&names(&["INVALID"])[..])).is_err());
    }

    #[test]
    fn min_and_max_date() {
        let tp = TaskPlot::new();
        assert_eq!(tp.min_date(), None);
        assert_eq!(tp.max_date(), None);

        let tp = test_taskplot();
        assert_eq!(tp.min_date(), Some(date(2014, 2, 1)));
        assert_eq!(tp.max_date(), Some(date(2014, 2, 3)));
    }

    #[test]
    fn sorted_task_names() {
        assert!(TaskPlot::new().sorted_task_names().is_empty());
        assert_eq!(test_taskplot().sorted_task_names(), names(&["CHESS", "MUSIC"]));
    }

    #[test]
    fn daily_efforts_fill_missing_days_with_zero() {
        let tp = test_taskplot();
        let efforts: Vec<_> = tp
            .efforts(&names(&["CHESS", "MUSIC"]), date(2014, 2, 1), date(2014, 2, 4), false)
            .unwrap()
            .collect();
        assert_eq!(
            efforts,
            vec![
                (date(2014, 2, 1), vec![0., 3.]),
                (date(2014, 2, 2), vec![7., 0.]),
                (date(2014, 2, 3), vec![5., 0.]),
                (date(2014, 2, 4), vec![0., 0.]),
            ]
        );
    }

    #[test]
    fn cumulative_efforts_include_effort_before_start() {
        let tp = test_taskplot();
        let efforts: Vec<_> = tp
            .efforts(&names(&["MUSIC", "CHESS"]), date(2014, 2, 2), date(2014, 2, 3), true)
            .unwrap()
            .collect();
        assert_eq!(
            efforts,
            vec![
                (date(2014, 2, 2), vec![3., 7.]),
                (date(2014, 2, 3), vec![3., 12.]),
            ]
        );
    }

    #[test]
    fn cumulative_efforts_never_decrease() {
        let tp = test_taskplot();
        let all = tp.sorted_task_names();
        let efforts: Vec<_> = tp
            .efforts(&all, date(2014, 1, 30), date(2014, 2, 10), true)
            .unwrap()
            .collect();
        assert_eq!(efforts.len(), 12);
        for pair in efforts.windows(2) {
            for (a, b) in pair[0].1.iter().zip(pair[1].1.iter()) {
                assert!(a <= b);
            }
        }
        let last: f64 = efforts.last().unwrap().1.iter().sum();
        assert_eq!(last, tp.total_effort(None).unwrap());
    }

    #[test]
    fn efforts_reject_unknown_task() {
        let tp = test_taskplot();
        assert!(tp
            .efforts(&names(&["GOLF"]), date(2014, 2, 1), date(2014, 2, 3), true)
            .is_err());
    }

    #[test]
    fn month_bounds() {
        assert_eq!(month_start(date(2014, 2, 17)), date(2014, 2, 1));
        assert_eq!(month_end(date(2014, 2, 17)), date(2014, 2, 28));
        assert_eq!(month_end(date(2016, 2, 1)), date(2016, 2, 29));
        assert_eq!(month_end(date(2014, 12, 31)), date(2014, 12, 31));
        assert_eq!(month_end(date(2014, 1, 31)), date(2014, 1, 31));
    }

    #[test]
    fn min_and_max_of_empty_is_none() {
        assert_eq!(min_and_max(Vec::<f64>::new()), None);
        assert_eq!(min_and_max(vec![3., -1., 2.]), Some((-1., 3.)));
    }
}
