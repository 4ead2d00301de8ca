//! Terminal rendering of widgets

use chrono::{Datelike, Duration, NaiveDate};
use colored::Colorize;
use std::collections::HashMap;

use super::{ChartData, ChartKind, Widget};

const BAR_WIDTH: usize = 30;
const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub(super) fn render_widget(widget: &Widget, no_color: bool) -> String {
    let mut lines = vec![header(widget.title(), no_color)];

    if let Some(message) = widget.empty_message() {
        lines.push(format!("  {}", dim(message, no_color)));
        return lines.join("\n");
    }

    match widget.visible_data() {
        None => lines.push(format!("  {}", dim("(not loaded)", no_color))),
        Some(data) => lines.extend(match widget.kind() {
            ChartKind::Pie => slices(data, no_color),
            ChartKind::Bar => bars(data, no_color),
            ChartKind::Line => sparklines(data, no_color),
            ChartKind::Radar => axes(data, no_color),
            ChartKind::Heatmap => calendar(data, no_color),
            ChartKind::Cards => cards(data, no_color),
        }),
    }
    lines.join("\n")
}

fn header(title: &str, no_color: bool) -> String {
    let text = format!("── {} ──", title);
    if no_color {
        text
    } else {
        text.bold().to_string()
    }
}

fn dim(text: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        text.dimmed().to_string()
    }
}

/// Parse "#rrggbb"
fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn paint(text: &str, hex: Option<&str>, no_color: bool) -> String {
    match hex.and_then(rgb) {
        Some((r, g, b)) if !no_color => text.truecolor(r, g, b).to_string(),
        _ => text.to_string(),
    }
}

fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let cells = ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize;
    "█".repeat(cells)
}

fn spark(value: Option<f64>, min: f64, max: f64) -> char {
    let Some(v) = value else {
        return ' ';
    };
    let span = max - min;
    if span <= 0.0 {
        return SPARK[0];
    }
    let idx = (((v - min) / span).clamp(0.0, 1.0) * (SPARK.len() - 1) as f64).round() as usize;
    SPARK[idx]
}

fn label_width(data: &ChartData) -> usize {
    data.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0)
}

fn slices(data: &ChartData, no_color: bool) -> Vec<String> {
    let Some(ds) = data.datasets.first() else {
        return Vec::new();
    };
    let width = label_width(data);
    data.labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let value = ds.values.get(i).copied().flatten().unwrap_or(0.0);
            let shown = data.display.get(i).cloned().unwrap_or_default();
            format!(
                "  {} {:<width$} {:>6} {}",
                paint("●", ds.color_at(i), no_color),
                label,
                shown,
                paint(&bar(value, 100.0, BAR_WIDTH), ds.color_at(i), no_color),
                width = width
            )
        })
        .collect()
}

fn bars(data: &ChartData, no_color: bool) -> Vec<String> {
    let Some(ds) = data.datasets.first() else {
        return Vec::new();
    };
    let width = label_width(data);
    let max = ds.values.iter().flatten().copied().fold(0.0, f64::max);
    data.labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let value = ds.values.get(i).copied().flatten().unwrap_or(0.0);
            format!(
                "  {:<width$} {} {}",
                label,
                paint(&bar(value, max, BAR_WIDTH), ds.color_at(i), no_color),
                data.display.get(i).cloned().unwrap_or_default(),
                width = width
            )
        })
        .collect()
}

fn sparklines(data: &ChartData, no_color: bool) -> Vec<String> {
    let (min, max) = data.scale.unwrap_or_else(|| {
        let max = data
            .datasets
            .iter()
            .flat_map(|ds| ds.values.iter().flatten().copied())
            .fold(0.0, f64::max);
        (0.0, max)
    });
    let width = data.datasets.iter().map(|ds| ds.label.chars().count()).max().unwrap_or(0);

    let mut lines = Vec::new();
    if let (Some(first), Some(last)) = (data.labels.first(), data.labels.last()) {
        lines.push(format!("  {:<width$} {} → {}", "", first, last, width = width));
    }
    for ds in &data.datasets {
        let line: String = ds.values.iter().map(|v| spark(*v, min, max)).collect();
        lines.push(format!(
            "  {:<width$} {}",
            ds.label,
            paint(&line, ds.color_at(0), no_color),
            width = width
        ));
    }
    lines
}

fn axes(data: &ChartData, no_color: bool) -> Vec<String> {
    let Some(ds) = data.datasets.first() else {
        return Vec::new();
    };
    let (_, max) = data.scale.unwrap_or((0.0, 1.0));
    let width = label_width(data);
    data.labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let value = ds.values.get(i).copied().flatten().unwrap_or(0.0);
            format!(
                "  {:<width$} {:<20} {}",
                label,
                paint(&bar(value, max, 20), ds.color_at(0), no_color),
                data.display.get(i).cloned().unwrap_or_default(),
                width = width
            )
        })
        .collect()
}

fn shade(intensity: f64) -> char {
    match intensity {
        i if i < 0.25 => '░',
        i if i < 0.5 => '▒',
        i if i < 0.75 => '▓',
        _ => '█',
    }
}

fn calendar(data: &ChartData, no_color: bool) -> Vec<String> {
    let Some(ds) = data.datasets.first() else {
        return Vec::new();
    };
    let cells: HashMap<NaiveDate, f64> = data
        .labels
        .iter()
        .zip(ds.values.iter())
        .filter_map(|(label, value)| {
            let date = NaiveDate::parse_from_str(label, "%Y-%m-%d").ok()?;
            Some((date, (*value)?))
        })
        .collect();

    let (Some(first), Some(last)) = (cells.keys().min().copied(), cells.keys().max().copied()) else {
        return Vec::new();
    };
    let start = first - Duration::days(i64::from(first.weekday().num_days_from_monday()));
    let weeks = ((last - start).num_days() / 7 + 1) as usize;

    let mut lines = vec![format!("      {} → {}", first, last)];
    for (row, name) in WEEKDAYS.iter().enumerate() {
        let row_cells: String = (0..weeks)
            .map(|week| {
                let date = start + Duration::days((week * 7 + row) as i64);
                match cells.get(&date) {
                    Some(intensity) => shade(*intensity),
                    None => '·',
                }
            })
            .collect();
        lines.push(format!("  {} {}", name, paint(&row_cells, ds.color_at(0), no_color)));
    }
    lines.push(format!("      {}", dim("· none  ░ low  ▒  ▓  █ high", no_color)));
    lines
}

fn cards(data: &ChartData, no_color: bool) -> Vec<String> {
    let line = data
        .labels
        .iter()
        .zip(data.display.iter())
        .map(|(title, value)| {
            let value = if no_color { value.clone() } else { value.bold().to_string() };
            format!("{}: {}", title, value)
        })
        .collect::<Vec<_>>()
        .join("  │  ");
    vec![format!("  {}", line)]
}
