use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::Result;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use gridcast::config::GridcastConfig;
use gridcast::render;
use gridcast::report::build_report;
use gridcast::web;

struct Options {
    serve: bool,
    config_path: Option<PathBuf>,
    forecast_dir: Option<String>,
    max_rows: Option<usize>,
    first_hour: Option<u32>,
    hour: Option<String>,
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {program} [-serve] [-config <file>] [-forecastPath <dir>] [-maxRows <n>] [-firstHour <h>] [-hour <hh>]"
    );
    exit(1);
}

fn options_from_args() -> Options {
    let mut options = Options {
        serve: false,
        config_path: None,
        forecast_dir: None,
        max_rows: None,
        first_hour: None,
        hour: None,
    };

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "gridcast".to_string());

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-serve" => options.serve = true,
            "-config" => options.config_path = Some(PathBuf::from(next_value(&mut args, &program))),
            "-forecastPath" => options.forecast_dir = Some(next_value(&mut args, &program)),
            "-maxRows" => match next_value(&mut args, &program).parse() {
                Ok(rows) => options.max_rows = Some(rows),
                Err(_) => usage(&program),
            },
            "-firstHour" => match next_value(&mut args, &program).parse() {
                Ok(hour) => options.first_hour = Some(hour),
                Err(_) => usage(&program),
            },
            "-hour" => options.hour = Some(next_value(&mut args, &program)),
            _ => usage(&program),
        }
    }

    options
}

fn next_value(args: &mut std::env::Args, program: &str) -> String {
    args.next().unwrap_or_else(|| usage(program))
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = options_from_args();

    let mut config = GridcastConfig::load_from_path(options.config_path.clone())?;
    if let Some(dir) = options.forecast_dir {
        config.data.forecast_dir = dir;
    }
    if let Some(rows) = options.max_rows {
        config.report.max_rows = rows;
    }
    if let Some(hour) = options.first_hour {
        config.report.first_hour = Some(hour);
    }
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    if options.serve {
        return web::run(config).await;
    }

    // One-shot mode: render the requested (or latest) run to stdout
    let run = web::load_run(
        Path::new(&config.data.forecast_dir),
        options.hour.as_deref(),
    )?;
    let report = build_report(&run, &config.report_config()?, Utc::now())?;
    print!("{}", render::text::render(&report));
    Ok(())
}
