//! Command-line front end: configuration, dispatch and renderers

pub mod config;
pub mod gantt;
pub mod json;
pub mod plot;

use tracing::info;

use crate::lib::{record::UsageRecord, sort, timeline::Timeline};
use crate::load::{
    self,
    error::{Record, Report},
};
use config::{Command, Config, Source};

/// Execute a command, printing its output on stdout
///
/// Warnings are printed on stderr as they come; the returned `Record`
/// holds the fatal reports.
pub fn run(config: Config) -> Result<(), Record> {
    let mut errs = Record::new();
    let res = dispatch(config.command, &mut errs);
    if !errs.is_empty() {
        eprintln!("{}", errs);
    }
    res.map_err(|report| {
        let mut fatal = Record::new();
        fatal.push(report);
        fatal
    })
}

fn dispatch(command: Command, errs: &mut Record) -> Result<(), Report> {
    match command {
        Command::Show {
            source,
            width,
            color,
            svg,
        } => {
            let tl = timeline(&source, errs)?;
            print!("{}", gantt::Gantt::from(&tl).with_width(width).with_color(color));
            if let Some(out) = svg {
                plot::Plotter::from(&tl).render(&out).map_err(|e| {
                    let mut report = Report::new(format!("Could not write '{}'", out.display()));
                    report.text(e);
                    report
                })?;
                info!(path = %out.display(), "svg written");
            }
        }
        Command::Records(source) => {
            let mut records = records(&source, errs)?;
            sort::sort_records(&mut records);
            println!("{}", serialized(json::records(&records))?);
        }
        Command::Timeline(source) => {
            let tl = timeline(&source, errs)?;
            println!("{}", serialized(json::timeline(&tl))?);
        }
        Command::Files(dir) => {
            let files = load::list_files(&dir).map_err(|e| e.report())?;
            println!("{}", serialized(json::files(&files))?);
        }
        Command::Sheets(file) => {
            let sheets = load::sheet_list(&file).map_err(|e| e.report())?;
            println!("{}", serialized(json::sheets(&sheets))?);
        }
    }
    Ok(())
}

fn records(source: &Source, errs: &mut Record) -> Result<Vec<UsageRecord>, Report> {
    match source {
        Source::File { path, options } => load::read_records(path, options),
        Source::Dir(dir) => load::read_dir_records(dir, errs),
    }
    .map_err(|e| e.report())
}

fn timeline(source: &Source, errs: &mut Record) -> Result<Timeline, Report> {
    let records = records(source, errs)?;
    Timeline::build(records).map_err(|e| {
        let mut report = Report::new("No usage records");
        report.text(e);
        if let Source::Dir(dir) = source {
            report.hint(format!("add .csv or .xlsx sources under '{}'", dir.display()));
        }
        report
    })
}

fn serialized(res: serde_json::Result<String>) -> Result<String, Report> {
    res.map_err(|e| {
        let mut report = Report::new("Could not serialize the output");
        report.text(e);
        report
    })
}
