//! Plain-text rendering: pipe-delimited columns, one block per location,
//! summary last

use crate::report::{BlockRow, HourLine, LocationBlock, Report, Summary};

/// Render the combined report string
#[must_use]
pub fn render(report: &Report) -> String {
    let mut out = String::new();
    for block in &report.blocks {
        out.push_str(&render_block(block));
        out.push('\n');
    }
    out.push_str(&render_summary(&report.summary));
    out
}

/// Render a single location block; also served individually when
/// per-location exposure is enabled
#[must_use]
pub fn render_block(block: &LocationBlock) -> String {
    let mut out = String::new();
    out.push_str(&block.header);
    out.push('\n');

    for row in &block.rows {
        match row {
            BlockRow::DayHeader(label) => out.push_str(label),
            BlockRow::Hour(line) => out.push_str(&format_line(line)),
        }
        out.push('\n');
    }
    out
}

fn format_line(line: &HourLine) -> String {
    format!(
        "{:>5} │ {} │ {:>3}/{:>3} ºF │ {} {:.2}\" │ {:>2} {:>2} G {:>2} mph │ {:.2}\"",
        line.time_label,
        line.vis_icon,
        line.temperature,
        line.dewpoint,
        line.sky_icon,
        line.precip_amount,
        line.compass,
        line.wind_speed,
        line.wind_gust,
        line.pressure
    )
}

fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&summary.heading);
    out.push('\n');
    for bullet in &summary.bullets {
        out.push_str(bullet);
        out.push('\n');
    }
    out
}
