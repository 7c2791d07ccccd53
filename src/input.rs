//! Readers for the two text formats.
//!
//! A task directory holds one file per day, named after the date (`2014-02-01.txt`),
//! with task entries such as
//!
//! ```text
//! GYM: [xx]
//! WORK: [xxxx] [xx] [x.]
//! ```
//!
//! where every `x` is half an hour and dots are no effort.
//! Lines that are not task entries are ignored and can be used as comments.
//!
//! A task list is a single file of blocks, each opened by a `DATE` header
//! naming the tasks of the following rows:
//!
//! ```text
//! DATE        GYM   WORK  MUSIC
//! 2014-02-01  2     0     2.5
//! 2014-02-03  1     5.5   1
//! ```

use crate::{DateRange, Result, TaskPlot, TaskPlotError, EFFORT_PER_MARK};
use chrono::NaiveDate;
use log::{debug, info, warn};
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// e.g. `PROGRAMMING: [xx] [xx] [..]`
const TASK_ENTRY_PATTERN: &str = r"^\s*\w+:(?:\s+\[(?:x|\.)+\])+\s*$";

const HEADER_KEYWORD: &str = "date";

impl TaskPlot {
    /// Load a task directory or a task list, depending on what `path` is.
    pub fn from_path(path: &Path, range: DateRange, datefmt: &str) -> Result<TaskPlot> {
        let mut taskplot = TaskPlot::new();
        if path.is_dir() {
            info!("reading task directory {}", path.display());
            taskplot.add_effort_from_directory(path, range, datefmt)?;
        } else if path.is_file() {
            info!("reading task list {}", path.display());
            taskplot.add_effort_from_file(path, range, datefmt)?;
        } else {
            return Err(TaskPlotError::NotFound(path.to_path_buf()));
        }
        info!("loaded {} task(s)", taskplot.sorted_task_names().len());
        Ok(taskplot)
    }

    /// Add effort from every task file found under `path`, subdirectories included.
    /// Files whose name (up to the first dot) is not a date in `datefmt`
    /// and files dated out of `range` are skipped.
    pub fn add_effort_from_directory(
        &mut self,
        path: &Path,
        range: DateRange,
        datefmt: &str,
    ) -> Result<()> {
        let pattern = Regex::new(TASK_ENTRY_PATTERN).expect("task entry pattern is valid");
        for filepath in task_files(path)? {
            let date = match date_from_filename(&filepath, datefmt) {
                Some(d) => d,
                None => {
                    debug!("skipping {}, the file name is not a date", filepath.display());
                    continue;
                }
            };
            if !range.contains(date) {
                debug!("skipping {}, out of the date range", filepath.display());
                continue;
            }
            let file = File::open(&filepath).map_err(|e| TaskPlotError::io(&filepath, e))?;
            for line in BufReader::new(file).lines() {
                let line = line.map_err(|e| TaskPlotError::io(&filepath, e))?;
                if let Some((task_name, effort)) = parse_task_entry(&pattern, &line) {
                    self.add_effort(task_name, date, effort);
                }
            }
        }
        Ok(())
    }

    /// Add effort from a task list file.
    /// Rows dated out of `range` are skipped without parsing their efforts.
    pub fn add_effort_from_file(&mut self, path: &Path, range: DateRange, datefmt: &str) -> Result<()> {
        let file = File::open(path).map_err(|e| TaskPlotError::io(path, e))?;
        let mut task_names: Option<Vec<String>> = None;
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| TaskPlotError::io(path, e))?;
            let lineno = i + 1;
            let mut tokens = line.split_whitespace();
            let first = match tokens.next() {
                Some(t) => t,
                None => continue,
            };
            if first.eq_ignore_ascii_case(HEADER_KEYWORD) {
                task_names = Some(tokens.map(String::from).collect());
                continue;
            }
            let names = task_names.as_ref().ok_or_else(|| TaskPlotError::MissingHeader {
                path: path.to_path_buf(),
                line: lineno,
            })?;
            let date = NaiveDate::parse_from_str(first, datefmt).map_err(|_| {
                TaskPlotError::InvalidDate {
                    path: path.to_path_buf(),
                    line: lineno,
                    value: first.to_string(),
                    datefmt: datefmt.to_string(),
                }
            })?;
            if !range.contains(date) {
                continue;
            }
            let efforts: Vec<&str> = tokens.collect();
            if efforts.len() > names.len() {
                warn!(
                    "{}:{}: ignoring {} effort value(s) without a task name",
                    path.display(),
                    lineno,
                    efforts.len() - names.len()
                );
            }
            for (name, value) in names.iter().zip(efforts) {
                let effort: f64 = value.parse().map_err(|_| TaskPlotError::InvalidEffort {
                    path: path.to_path_buf(),
                    line: lineno,
                    value: value.to_string(),
                })?;
                self.add_effort(name, date, effort);
            }
        }
        Ok(())
    }
}

/// task name and effort of a task entry line, None for any other line
pub fn parse_task_entry<'a>(pattern: &Regex, line: &'a str) -> Option<(&'a str, f64)> {
    if !pattern.is_match(line) {
        return None;
    }
    let (name, groups) = line.trim().split_once(':')?;
    let marks = groups.chars().filter(|&c| c == 'x').count();
    Some((name, marks as f64 * EFFORT_PER_MARK))
}

/// date in the file name, ignoring everything from the first dot
pub fn date_from_filename(path: &Path, datefmt: &str) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let extless = name.split('.').next()?;
    NaiveDate::parse_from_str(extless, datefmt).ok()
}

/// all the files under dir, recursively, in path order.
/// Symlinked directories are not descended into, symlinked files are kept.
fn task_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(d) = pending.pop() {
        let entries = fs::read_dir(&d).map_err(|e| TaskPlotError::io(&d, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| TaskPlotError::io(&d, e))?;
            let file_type = entry.file_type().map_err(|e| TaskPlotError::io(&d, e))?;
            let p = entry.path();
            if file_type.is_dir() {
                pending.push(p);
            } else if file_type.is_symlink() && p.is_dir() {
                debug!("not following symlinked directory {}", p.display());
            } else {
                files.push(p);
            }
        }
    }
    files.sort();
    Ok(files)
}
