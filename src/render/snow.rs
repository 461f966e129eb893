//! Snow-depth heat-map table
//!
//! One Total/New column pair per location, hourly rows from `now`, cell
//! backgrounds from the snow accumulation color ramp.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::models::ModelRun;

/// Snow accumulation color ramp: upper bound in inches and the cell color
/// below it. Totals past the table render in the final cream tone.
const RAMP: [(f64, [u8; 3]); 38] = [
    (0.1, [255, 255, 255]),
    (0.25, [200, 200, 200]),
    (0.5, [175, 175, 175]),
    (0.75, [150, 150, 150]),
    (1.0, [169, 231, 242]),
    (1.5, [114, 191, 215]),
    (2.0, [59, 152, 187]),
    (2.5, [4, 112, 160]),
    (3.0, [0, 70, 176]),
    (3.5, [39, 100, 188]),
    (4.0, [77, 130, 200]),
    (4.5, [116, 160, 211]),
    (5.0, [154, 190, 223]),
    (5.5, [193, 220, 235]),
    (6.0, [201, 173, 219]),
    (7.0, [193, 149, 210]),
    (8.0, [185, 126, 201]),
    (9.0, [176, 102, 193]),
    (10.0, [169, 79, 184]),
    (11.0, [160, 55, 175]),
    (12.0, [135, 10, 71]),
    (14.0, [151, 28, 90]),
    (16.0, [167, 45, 110]),
    (18.0, [182, 63, 129]),
    (20.0, [198, 80, 149]),
    (22.0, [214, 98, 168]),
    (24.0, [235, 167, 183]),
    (26.0, [232, 155, 161]),
    (28.0, [230, 143, 138]),
    (30.0, [227, 130, 116]),
    (32.0, [225, 118, 93]),
    (34.0, [222, 106, 71]),
    (36.0, [220, 129, 80]),
    (40.0, [225, 149, 104]),
    (44.0, [230, 169, 127]),
    (48.0, [236, 189, 151]),
    (52.0, [241, 209, 175]),
    (56.0, [246, 229, 198]),
];

const OVERFLOW: [u8; 3] = [251, 249, 222];

fn cell_color(total_inches: f64) -> String {
    let [r, g, b] = RAMP
        .iter()
        .find(|(bound, _)| total_inches < *bound)
        .map_or(OVERFLOW, |(_, color)| *color);
    format!("rgb({r},{g},{b})")
}

/// Render the snow-depth page for one model run
#[must_use]
pub fn render_page(run: &ModelRun, now: DateTime<Utc>, time_zone: Tz) -> String {
    let places = run.places();
    let columns = places.len() * 2 + 1;

    let mut head = String::from("<tr><td></td>");
    for place in &places {
        head.push_str(&format!("<td colspan=\"2\">{}</td>", place.name));
    }
    head.push_str("</tr><tr><td>Time</td>");
    for _ in &places {
        head.push_str("<td>Total</td><td>New</td>");
    }
    head.push_str("</tr>");

    let mut body = String::new();
    for (index, instant) in run.forecast_times.iter().enumerate() {
        if *instant < now {
            continue;
        }

        let local = instant.with_timezone(&time_zone);
        if local.hour() == 0 {
            body.push_str(&format!(
                "<tr><td colspan=\"{columns}\">{}</td></tr>",
                local.format("%A %m/%d")
            ));
        }

        body.push_str(&format!("<tr><td>{}</td>", local.format("%-I %p")));
        for place in &places {
            let totals = place
                .series
                .as_ref()
                .map(|s| s.total_snow.as_slice())
                .unwrap_or_default();
            let total = totals.get(index).copied().unwrap_or(0.0);
            let new_snow = if index > 0 {
                total - totals.get(index - 1).copied().unwrap_or(0.0)
            } else {
                total
            };
            let color = cell_color(total);
            body.push_str(&format!(
                "<td style=\"background: {color}\">{total:.2}</td><td style=\"background: {color}\">{new_snow:.2}</td>"
            ));
        }
        body.push_str("</tr>");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        <title>Snow Depth</title>
        <style>
            table {{text-align: center; font-family: sans-serif; table-layout: fixed; width: 100%; border-collapse: collapse; box-sizing: border-box;}}
            thead, [colspan] {{font-weight: bold;}}
            td {{border-right: solid black 1px;}}
        </style>
    </head>
    <body>
<table><thead>{head}</thead><tbody>{body}</tbody></table>
    </body>
</html>"#
    )
}
