//! Flexible date parsing
//!
//! A source date is tried against an ordered list of layouts and the first
//! one that both matches syntactically and names a real calendar day wins.
//! The order is part of the contract: changing it could change how
//! ambiguous text is read.

use pest::Parser;
use pest_derive::*;
use std::fmt;

use crate::lib::date::{Date, DateError};

/// Pest-generated parser
#[derive(Parser)]
#[grammar = "load/date.pest"]
pub struct DateParser;

/// Wrapper around Pest's `Pair`
type Pair<'i> = pest::iterators::Pair<'i, Rule>;

/// One accepted textual representation of a date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `2024-3-5` or `2024-03-05`
    DashFlex,
    /// `2024-03-05`
    DashFixed,
    /// `2024/3/5` or `2024/03/05`
    SlashFlex,
    /// `2024/03/05`
    SlashFixed,
    /// `03-05-24`
    Sheet,
}

/// Layouts of delimited text sources, in the order they are tried
pub const DELIMITED: &[Layout] = &[
    Layout::DashFlex,
    Layout::DashFixed,
    Layout::SlashFlex,
    Layout::SlashFixed,
];

/// Layouts of spreadsheet sources
pub const SPREADSHEET: &[Layout] = &[Layout::Sheet];

impl Layout {
    fn rule(self) -> Rule {
        match self {
            Layout::DashFlex => Rule::dash_flex,
            Layout::DashFixed => Rule::dash_fixed,
            Layout::SlashFlex => Rule::slash_flex,
            Layout::SlashFixed => Rule::slash_fixed,
            Layout::Sheet => Rule::sheet,
        }
    }

    /// Human-readable pattern, for hints
    pub fn pattern(self) -> &'static str {
        match self {
            Layout::DashFlex => "YYYY-M-D",
            Layout::DashFixed => "YYYY-MM-DD",
            Layout::SlashFlex => "YYYY/M/D",
            Layout::SlashFixed => "YYYY/MM/DD",
            Layout::Sheet => "MM-DD-YY",
        }
    }

    /// Read `text` in this layout only
    pub fn parse(self, text: &str) -> Result<Date, Rejection> {
        let pair = DateParser::parse(self.rule(), text)
            .map_err(|e| Rejection::Syntax(Box::new(e.renamed_rules(rule_rename))))?
            .next()
            .ok_or(Rejection::Empty)?;
        let nums = pair
            .into_inner()
            .filter(|p| p.as_rule() != Rule::EOI)
            .map(number)
            .collect::<Vec<_>>();
        let (year, month, day) = match (self, nums.as_slice()) {
            (Layout::Sheet, &[m, d, y]) => (expand_year(y), m, d),
            (_, &[y, m, d]) => (y, m, d),
            _ => return Err(Rejection::Empty),
        };
        Date::from_ymd(year, month, day).map_err(Rejection::Calendar)
    }
}

/// Why a text is not a date
#[derive(Debug, Clone)]
pub enum Rejection {
    /// the text does not have the shape of any layout
    Syntax(Box<pest::error::Error<Rule>>),
    /// the shape is right but the day does not exist
    Calendar(DateError),
    /// nothing to parse
    Empty,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Syntax(e) => write!(f, "{}", e.variant.message()),
            Rejection::Calendar(e) => write!(f, "{}", e),
            Rejection::Empty => write!(f, "no date given"),
        }
    }
}

impl std::error::Error for Rejection {}

/// Try each layout in turn and return the first success
///
/// On failure a calendar rejection (right shape, impossible day) is
/// preferred over a syntax one, otherwise the last layout's rejection is
/// returned.
pub fn parse_date(layouts: &[Layout], text: &str) -> Result<Date, Rejection> {
    let mut rejection = Rejection::Empty;
    for layout in layouts {
        match layout.parse(text) {
            Ok(date) => return Ok(date),
            Err(e) => {
                if !matches!(rejection, Rejection::Calendar(_)) {
                    rejection = e;
                }
            }
        }
    }
    Err(rejection)
}

// the grammar only lets at most four ASCII digits through
fn number(pair: Pair) -> usize {
    pair.as_str().bytes().fold(0, |n, b| n * 10 + (b - b'0') as usize)
}

/// Two-digit years pivot at 69: `69` is 1969, `68` is 2068
fn expand_year(yy: usize) -> usize {
    if yy >= 69 {
        1900 + yy
    } else {
        2000 + yy
    }
}

fn rule_rename(r: &Rule) -> String {
    String::from(match r {
        Rule::EOI => "end of date",
        Rule::year => "a 4-digit year",
        Rule::short_year => "a 2-digit year",
        Rule::flex_num => "a 1- or 2-digit month or day",
        Rule::fixed_num => "a 2-digit month or day",
        Rule::dash_flex => "a date YYYY-M-D",
        Rule::dash_fixed => "a date YYYY-MM-DD",
        Rule::slash_flex => "a date YYYY/M/D",
        Rule::slash_fixed => "a date YYYY/MM/DD",
        Rule::sheet => "a date MM-DD-YY",
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::date::Month::*;

    macro_rules! date {
        ( $text:expr => $y:expr, $m:expr, $d:expr ) => {
            assert_eq!(
                parse_date(DELIMITED, $text).unwrap(),
                Date::from($y, $m, $d).unwrap(),
                "parsing {:?}", $text
            );
        };
    }

    macro_rules! bad {
        ( $layouts:expr, $text:expr ) => {
            assert!(parse_date($layouts, $text).is_err(), "{:?} should be rejected", $text);
        };
    }

    #[test]
    fn every_delimited_layout() {
        date!("2024-3-5" => 2024, Mar, 5);
        date!("2024-03-05" => 2024, Mar, 5);
        date!("2024/3/5" => 2024, Mar, 5);
        date!("2024/03/05" => 2024, Mar, 5);
        date!("2024-12-31" => 2024, Dec, 31);
        date!("2024/1/09" => 2024, Jan, 9);
    }

    #[test]
    fn delimited_rejections() {
        bad!(DELIMITED, "");
        bad!(DELIMITED, "24-3-5");
        bad!(DELIMITED, "2024.03.05");
        bad!(DELIMITED, "2024-003-05");
        bad!(DELIMITED, "2024-3/5");
        bad!(DELIMITED, " 2024-3-5");
        bad!(DELIMITED, "2024-13-01");
        bad!(DELIMITED, "2023-2-29");
        bad!(DELIMITED, "03-05-24");
    }

    #[test]
    fn calendar_rejection_is_reported() {
        match parse_date(DELIMITED, "2023-2-29") {
            Err(Rejection::Calendar(DateError::NotBissextile(2023))) => (),
            other => panic!("unexpected {:?}", other),
        }
        match parse_date(DELIMITED, "hello") {
            Err(Rejection::Syntax(_)) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn first_layout_wins() {
        assert_eq!(DELIMITED[0], Layout::DashFlex);
        assert!(Layout::DashFlex.parse("2024-03-05").is_ok());
        assert!(Layout::DashFixed.parse("2024-3-5").is_err());
        assert!(Layout::SlashFixed.parse("2024/3/05").is_err());
    }

    #[test]
    fn spreadsheet_layout() {
        assert_eq!(
            parse_date(SPREADSHEET, "03-05-24").unwrap(),
            Date::from(2024, Mar, 5).unwrap()
        );
        assert_eq!(
            parse_date(SPREADSHEET, "12-31-99").unwrap(),
            Date::from(1999, Dec, 31).unwrap()
        );
        assert_eq!(
            parse_date(SPREADSHEET, "01-01-69").unwrap(),
            Date::from(1969, Jan, 1).unwrap()
        );
        assert_eq!(
            parse_date(SPREADSHEET, "01-01-68").unwrap(),
            Date::from(2068, Jan, 1).unwrap()
        );
        bad!(SPREADSHEET, "3-5-24");
        bad!(SPREADSHEET, "2024-03-05");
        bad!(SPREADSHEET, "13-01-24");
        bad!(SPREADSHEET, "02-30-24");
    }
}
