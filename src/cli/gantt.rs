//! Colorized terminal gantt
//!
//! ```txt
//! User Name | 01 02 03 04 05 06 07
//!           | Mo Tu We Th Fr Sa Su
//! ----------+----------------------
//! alice     |    ** ** **
//! bob       |       ?? ?? ?? ?? ??
//! ----------+----------------------
//! 山田      | **
//! ```
//!
//! Each day takes three columns; Saturdays are blue, Sundays red.

use std::fmt;
use unicode_width::UnicodeWidthStr;

use crate::lib::{date::Weekday, timeline::Timeline};

pub struct Gantt<'d> {
    data: &'d Timeline,
    /// display width of the name column
    width: usize,
    color: bool,
}

impl<'d> Gantt<'d> {
    pub fn from(data: &'d Timeline) -> Self {
        Self {
            data,
            width: NAME_WIDTH,
            color: true,
        }
    }

    pub fn with_width(self, width: usize) -> Self {
        Self { width, ..self }
    }

    pub fn with_color(self, color: bool) -> Self {
        Self { color, ..self }
    }

    /// Write `text` in the color of `weekday` followed by a space
    fn write_day(&self, f: &mut fmt::Formatter, weekday: Weekday, text: &str) -> fmt::Result {
        if self.color {
            write!(f, "{}{}{} ", day_color(weekday), text, RESET)
        } else {
            write!(f, "{} ", text)
        }
    }

    fn separator(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{}+-{}",
            "-".repeat(self.width),
            "---".repeat(self.data.labels.len())
        )
    }
}

/// Default display width of the name column
pub const NAME_WIDTH: usize = 10;

const RESET: &str = "\x1b[0m";
const BLUE: &str = "\x1b[34m";
const RED: &str = "\x1b[31m";

fn day_color(w: Weekday) -> &'static str {
    match w {
        Weekday::Sat => BLUE,
        Weekday::Sun => RED,
        _ => RESET,
    }
}

/// Pad `name` with spaces up to `width` display columns
///
/// Wide characters (CJK) count for two columns. Names already wider
/// than `width` are left untouched.
pub fn pad_name(name: &str, width: usize) -> String {
    let pad = width.saturating_sub(name.width());
    format!("{}{}", name, " ".repeat(pad))
}

impl fmt::Display for Gantt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let labels = &self.data.labels;
        // day numbers
        write!(f, "{}| ", pad_name("User Name", self.width))?;
        for (day, w) in labels.days.iter().zip(&labels.weekdays) {
            self.write_day(f, *w, day)?;
        }
        writeln!(f)?;
        // weekdays
        write!(f, "{}| ", pad_name("", self.width))?;
        for w in &labels.weekdays {
            self.write_day(f, *w, w.code())?;
        }
        writeln!(f)?;

        let mut prev: Option<&str> = None;
        for (rec, cells) in self.data.lines() {
            if prev != Some(rec.equipment_id()) {
                self.separator(f)?;
            }
            write!(f, "{}| ", pad_name(rec.user(), self.width))?;
            for cell in cells {
                self.write_day(f, cell.weekday, cell.occupancy.glyph())?;
            }
            writeln!(f)?;
            prev = Some(rec.equipment_id());
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{
        date::{Date, Month::*},
        record::{End, UsageRecord},
    };

    fn dt(d: usize) -> Date {
        Date::from(2024, Jan, d).unwrap()
    }

    fn timeline() -> Timeline {
        Timeline::build(vec![
            UsageRecord::new(1, "E1", "alice", dt(2), End::Until(dt(4))),
            UsageRecord::new(2, "E2", "山田", dt(1), End::Until(dt(1))),
            UsageRecord::new(3, "E1", "bob", dt(3), End::Ongoing),
        ])
        .unwrap()
    }

    #[test]
    fn padding_is_width_aware() {
        assert_eq!(pad_name("山田", 10), "山田      ");
        assert_eq!(pad_name("bob", 5), "bob  ");
        assert_eq!(pad_name("a-very-long-name", 10), "a-very-long-name");
        assert_eq!(pad_name("", 3), "   ");
    }

    #[test]
    fn plain_rendering() {
        let tl = timeline();
        let out = Gantt::from(&tl).with_color(false).to_string();
        let expected = [
            "User Name | 01 02 03 04 ",
            "          | Mo Tu We Th ",
            "----------+-------------",
            "alice     |    ** ** ** ",
            "bob       |       ?? ?? ",
            "----------+-------------",
            "山田      | **          ",
        ];
        assert_eq!(out.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn weekend_colors() {
        let tl = Timeline::build(vec![UsageRecord::new(1, "E", "u", dt(5), End::Until(dt(7)))]).unwrap();
        let out = Gantt::from(&tl).with_width(4).to_string();
        let header = out.lines().next().unwrap();
        assert_eq!(
            header,
            "User Name| \x1b[0m05\x1b[0m \x1b[34m06\x1b[0m \x1b[31m07\x1b[0m "
        );
        assert!(out.contains("\x1b[31m**\x1b[0m"));
    }
}
