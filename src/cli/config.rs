//! Command-line configuration

use clap::{App, Arg, ArgMatches, SubCommand};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::cli::gantt::NAME_WIDTH;
use crate::load::Options;

pub const DEFAULT_FILE: &str = "usage.csv";
pub const DEFAULT_DIR: &str = "./_works";

/// Where records come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File { path: PathBuf, options: Options },
    /// every supported file under the directory
    Dir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// terminal gantt, optionally exported as SVG too
    Show {
        source: Source,
        width: usize,
        color: bool,
        svg: Option<PathBuf>,
    },
    Records(Source),
    Timeline(Source),
    Files(PathBuf),
    Sheets(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub command: Command,
}

fn show_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("FILE").help("Usage source (.csv or .xlsx)").index(1),
        Arg::with_name("dir")
            .long("dir")
            .takes_value(true)
            .value_name("DIR")
            .help("Directory FILE is relative to, or to aggregate when FILE is absent"),
        Arg::with_name("sheet")
            .long("sheet")
            .takes_value(true)
            .value_name("NAME")
            .help("Workbook sheet to read (default: greatest name)"),
        Arg::with_name("no-color").long("no-color").help("Disable weekend colors"),
        Arg::with_name("width")
            .long("width")
            .takes_value(true)
            .value_name("N")
            .help("Display width of the name column"),
        Arg::with_name("svg")
            .long("svg")
            .takes_value(true)
            .value_name("OUT")
            .help("Also write the gantt as an SVG file"),
    ]
}

fn source_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("dir")
            .long("dir")
            .takes_value(true)
            .value_name("DIR")
            .default_value(DEFAULT_DIR)
            .help("Directory holding the usage sources"),
        Arg::with_name("file")
            .long("file")
            .takes_value(true)
            .value_name("FILE")
            .help("Single source, relative to DIR"),
        Arg::with_name("sheet")
            .long("sheet")
            .takes_value(true)
            .value_name("NAME")
            .requires("file")
            .help("Workbook sheet to read (default: greatest name)"),
    ]
}

pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("usage-timeline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Equipment usage gantt charts from CSV and XLSX logs")
        .args(&show_args())
        .subcommand(SubCommand::with_name("show").about("Render the gantt in the terminal").args(&show_args()))
        .subcommand(SubCommand::with_name("records").about("Print records as JSON").args(&source_args()))
        .subcommand(
            SubCommand::with_name("timeline")
                .about("Print the computed timeline as JSON")
                .args(&source_args()),
        )
        .subcommand(
            SubCommand::with_name("files")
                .about("List usage sources as JSON")
                .arg(source_args().remove(0)),
        )
        .subcommand(
            SubCommand::with_name("sheets")
                .about("List workbook sheets as JSON")
                .arg(source_args().remove(0))
                .arg(source_args().remove(1).required(true)),
        )
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let command = match matches.subcommand() {
            ("show", Some(sub)) => show(sub)?,
            ("records", Some(sub)) => Command::Records(source(sub)),
            ("timeline", Some(sub)) => Command::Timeline(source(sub)),
            ("files", Some(sub)) => Command::Files(dir(sub)),
            ("sheets", Some(sub)) => Command::Sheets(dir(sub).join(sub.value_of("file").unwrap_or_default())),
            _ => show(matches)?,
        };
        Ok(Self { command })
    }
}

fn dir(matches: &ArgMatches) -> PathBuf {
    PathBuf::from(matches.value_of("dir").unwrap_or(DEFAULT_DIR))
}

fn options(matches: &ArgMatches) -> Options {
    Options {
        sheet: matches.value_of("sheet").map(String::from),
    }
}

/// `--file` joined onto `--dir`, or the whole directory
fn source(matches: &ArgMatches) -> Source {
    let dir = dir(matches);
    match matches.value_of("file") {
        Some(file) => Source::File {
            path: dir.join(file),
            options: options(matches),
        },
        None => Source::Dir(dir),
    }
}

fn show(matches: &ArgMatches) -> Result<Command, clap::Error> {
    let source = match (matches.value_of("FILE"), matches.value_of("dir")) {
        (None, Some(_)) if matches.is_present("sheet") => {
            // aggregation always reads the default sheet of each workbook
            return Err(clap::Error::with_description(
                "'--sheet <NAME>' selects a sheet of FILE and cannot be used with a whole '--dir'",
                clap::ErrorKind::ArgumentConflict,
            ));
        }
        (None, Some(dir)) => Source::Dir(PathBuf::from(dir)),
        (file, dir) => {
            let file = file.unwrap_or(DEFAULT_FILE);
            Source::File {
                path: dir.map(PathBuf::from).unwrap_or_default().join(file),
                options: options(matches),
            }
        }
    };
    let width = match matches.value_of("width") {
        Some(n) => n.parse::<usize>().map_err(|e| {
            clap::Error::with_description(
                &format!("Invalid value for '--width <N>': {}", e),
                clap::ErrorKind::InvalidValue,
            )
        })?,
        None => NAME_WIDTH,
    };
    Ok(Command::Show {
        source,
        width,
        color: !matches.is_present("no-color"),
        svg: matches.value_of("svg").map(PathBuf::from),
    })
}
