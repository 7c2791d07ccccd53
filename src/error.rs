//! Error type shared by the readers, the summary, the chart and the CLI.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, TaskPlotError>;

#[derive(Debug, thiserror::Error)]
pub enum TaskPlotError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: invalid date '{value}' for format '{datefmt}'", .path.display())]
    InvalidDate {
        path: PathBuf,
        line: usize,
        value: String,
        datefmt: String,
    },

    #[error("{}:{line}: invalid effort '{value}'", .path.display())]
    InvalidEffort {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("{}:{line}: date entry found before any DATE header", .path.display())]
    MissingHeader { path: PathBuf, line: usize },

    #[error("unknown task: '{0}'")]
    UnknownTask(String),

    #[error("no effort data")]
    NoData,

    #[error("no task entries found in {}", .0.display())]
    NoEntries(PathBuf),

    #[error("no such file or directory: '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("could not render the graph: {0}")]
    Render(String),

    #[error("could not write the summary: {0}")]
    Output(#[from] std::io::Error),
}

impl TaskPlotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TaskPlotError::Io {
            path: path.into(),
            source,
        }
    }
}
