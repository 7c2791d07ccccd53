use crate::{min_and_max, DateRange, Result, TaskPlot, TaskPlotError};
use chrono::prelude::*;
use chrono::Duration;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// Colours handed out to the tasks without a configured colour, in this order.
pub const COLOR_BANK: [&str; 10] = [
    "red", "green", "blue", "magenta", "purple", "orange", "crimson", "brown", "deeppink",
    "maroon",
];

/// Image size and axis descriptions
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub size: (u32, u32),
    pub x_desc: String,
    pub y_desc: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            size: (1600, 900),
            x_desc: String::from("Days"),
            y_desc: String::from("Effort"),
        }
    }
}

/// One line of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub task_name: String,
    pub color: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// RGB value of a colour name or of a `#rrggbb` string, case insensitive
pub fn named_color(name: &str) -> Option<RGBColor> {
    let name = name.trim().to_ascii_lowercase();
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(RGBColor(channel(0)?, channel(2)?, channel(4)?));
    }
    let rgb = match name.as_str() {
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "magenta" => (255, 0, 255),
        "purple" => (128, 0, 128),
        "orange" => (255, 165, 0),
        "crimson" => (220, 20, 60),
        "brown" => (165, 42, 42),
        "deeppink" => (255, 20, 147),
        "maroon" => (128, 0, 0),
        "black" => (0, 0, 0),
        "gray" | "grey" => (128, 128, 128),
        "cyan" => (0, 255, 255),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        "olive" => (128, 128, 0),
        "gold" => (255, 215, 0),
        "pink" => (255, 192, 203),
        "darkgreen" => (0, 100, 0),
        "darkblue" => (0, 0, 139),
        "darkred" => (139, 0, 0),
        _ => return None,
    };
    Some(RGBColor(rgb.0, rgb.1, rgb.2))
}

/// Colour per task: the configured one when present, otherwise the next bank colour
/// that is not configured for another task, starting over when the bank runs out.
pub fn assign_colors(
    task_names: &[String],
    color_map: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut unused: Vec<&str> = COLOR_BANK
        .iter()
        .copied()
        .filter(|c| !color_map.values().any(|v| v == c))
        .collect();
    if unused.is_empty() {
        unused = COLOR_BANK.to_vec();
    }
    let mut colors = color_map.clone();
    let without_color = task_names.iter().filter(|t| !color_map.contains_key(*t));
    for (i, task_name) in without_color.enumerate() {
        colors.insert(task_name.clone(), unused[i % unused.len()].to_string());
    }
    colors
}

/// cumulative effort per day of each task, from start to end
pub fn cumulative_series(
    taskplot: &TaskPlot,
    task_names: &[String],
    colors: &BTreeMap<String, String>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Series>> {
    let mut series: Vec<Series> = task_names
        .iter()
        .map(|t| Series {
            task_name: t.clone(),
            color: colors.get(t).cloned().unwrap_or_else(|| COLOR_BANK[0].to_string()),
            points: Vec::new(),
        })
        .collect();
    for (date, efforts) in taskplot.efforts(task_names, start, end, true)? {
        for (s, e) in series.iter_mut().zip(efforts) {
            s.points.push((date, e));
        }
    }
    Ok(series)
}

/// top of the effort axis, the multiple of 5 above the largest final effort
pub fn effort_axis_max(series: &[Series]) -> f64 {
    match min_and_max(series.iter().filter_map(|s| s.points.last().map(|&(_, e)| e))) {
        Some((_, max)) => max + 5. - max % 5.,
        None => 5.,
    }
}

pub fn suitable_xfmt(d: Duration) -> &'static str {
    let xfmt = if d > Duration::weeks(26) {
        "%Y-%m"
    } else if d > Duration::weeks(1) {
        "%b %d"
    } else {
        "%a %d"
    };
    return xfmt;
}

/// Plots the cumulative effort of `task_names` (all tasks when None) to `output`.
///
/// The time axis covers `range`, by default from the first to the last date of effort,
/// while the lines stop at the dates with data.
/// An `svg` extension selects the SVG backend, anything else is a bitmap (png by default).
pub fn render(
    taskplot: &TaskPlot,
    task_names: Option<&[String]>,
    range: DateRange,
    color_map: &BTreeMap<String, String>,
    output: &Path,
    options: &ChartOptions,
) -> Result<()> {
    let (min_date, max_date) = taskplot.date_range().ok_or(TaskPlotError::NoData)?;
    let names = taskplot.resolve_task_names(task_names);
    let colors = assign_colors(&taskplot.sorted_task_names(), color_map);

    let start = range.start.unwrap_or(min_date);
    let end = range.end.unwrap_or(max_date).max(start);
    let series = cumulative_series(
        taskplot,
        &names,
        &colors,
        start.max(min_date),
        end.min(max_date),
    )?;
    let ymax = effort_axis_max(&series);

    info!(
        "plotting {} task(s) from {} to {} into {}",
        series.len(),
        start,
        end,
        output.display()
    );
    let is_svg = output
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(output, options.size).into_drawing_area();
        draw(root, &series, (start, end), ymax, options)
    } else {
        let root = BitMapBackend::new(output, options.size).into_drawing_area();
        draw(root, &series, (start, end), ymax, options)
    }
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    series: &[Series],
    (start, end): (NaiveDate, NaiveDate),
    ymax: f64,
    options: &ChartOptions,
) -> Result<()> {
    let xmin = day_start(start);
    let xmax = day_start(end + Duration::days(1));
    let xfmt = suitable_xfmt(end - start);
    root.fill(&WHITE).map_err(render_error)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(xmin..xmax, 0f64..ymax)
        .map_err(render_error)?;
    chart
        .configure_mesh()
        .light_line_style(RGBColor(200, 200, 200).stroke_width(1))
        .bold_line_style(RGBColor(60, 60, 60).stroke_width(1))
        .set_all_tick_mark_size(2)
        .label_style(("sans-serif", 20))
        .x_labels(16)
        .y_labels(((ymax / 5.) as usize + 1).max(2))
        .x_label_formatter(&|x: &DateTime<Utc>| x.format(xfmt).to_string())
        .y_label_formatter(&|y: &f64| format!("{:.0}", y))
        .x_desc(options.x_desc.as_str())
        .y_desc(options.y_desc.as_str())
        .draw()
        .map_err(render_error)?;

    for s in series {
        let color = match named_color(&s.color) {
            Some(c) => c,
            None => {
                return Err(TaskPlotError::Config(format!(
                    "unknown color '{}' for task '{}'",
                    s.color, s.task_name
                )))
            }
        };
        chart
            .draw_series(LineSeries::new(
                s.points.iter().map(|&(d, e)| (day_start(d), e)),
                color.stroke_width(2),
            ))
            .map_err(render_error)?
            .label(s.task_name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart
            .draw_series(
                s.points
                    .iter()
                    .map(|&(d, e)| Circle::new((day_start(d), e), 3, color.filled())),
            )
            .map_err(render_error)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 20))
        .draw()
        .map_err(render_error)?;
    root.present().map_err(render_error)?;
    Ok(())
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_hms_opt(0, 0, 0).expect("midnight exists on every date");
    TimeZone::from_utc_datetime(&Utc, &midnight)
}

fn render_error<E: std::fmt::Display>(e: E) -> TaskPlotError {
    TaskPlotError::Render(e.to_string())
}
