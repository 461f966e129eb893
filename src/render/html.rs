//! HTML table rendering of an assembled report
//!
//! Same field set and ordering as the text renderer, one row group per
//! location with a full-width header row and an `<hr/>` separator between
//! locations.

use crate::report::{BlockRow, HourLine, Report};

const COLUMNS: usize = 6;

/// Render the full report page
#[must_use]
pub fn render_page(report: &Report, title: &str) -> String {
    let mut body = String::new();
    for block in &report.blocks {
        body.push_str(&header_row(&block.header));
        for row in &block.rows {
            match row {
                BlockRow::DayHeader(label) => body.push_str(&header_row(label)),
                BlockRow::Hour(line) => body.push_str(&hour_row(line)),
            }
        }
        body.push_str(&header_row("<hr/>"));
    }

    let mut summary = String::new();
    summary.push_str(&report.summary.heading);
    summary.push('\n');
    for bullet in &report.summary.bullets {
        summary.push_str(bullet);
        summary.push('\n');
    }

    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        <title>{title}</title>
        <style>
            html, body {{ font-size: 1.5em; background: black; color: white; }}
            table {{ width: 100vw; }}
            .emoji {{ font-family: 'Apple Color Emoji', 'Segoe UI Emoji' }}
        </style>
    </head>
    <body>
        <table>
{body}        </table>
        <pre>{summary}</pre>
    </body>
</html>"#
    )
}

fn header_row(content: &str) -> String {
    format!(
        "            <tr>\n                <td colspan=\"{COLUMNS}\" style=\"text-align: center;\">{content}</td>\n            </tr>\n"
    )
}

fn hour_row(line: &HourLine) -> String {
    format!(
        "            <tr>\n                <td>{}</td>\n                <td><span class=\"emoji\">{}</span></td>\n                <td>{}º/{}ºF</td>\n                <td><span class=\"emoji\">{}</span> {:.2}\"</td>\n                <td>{} {} G {} mph</td>\n                <td>{:.2}\"</td>\n            </tr>\n",
        line.time_label,
        line.vis_icon,
        line.temperature,
        line.dewpoint,
        line.sky_icon,
        line.precip_amount,
        line.arrow,
        line.wind_speed,
        line.wind_gust,
        line.pressure
    )
}
