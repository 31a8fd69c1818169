use std::path::Path;
use svg::{
    node::element::{Line, Rectangle, Text},
    Document,
};

use crate::lib::{raster::Occupancy, timeline::Timeline};

/// SVG rendition of the gantt: one column per day, one bar per record
pub struct Plotter<'d> {
    data: &'d Timeline,
}

const CELL: f64 = 20.0;
const NAME_COLUMN: f64 = 120.0;
const HEADER: f64 = 2.0 * CELL;
const MARGIN: f64 = 10.0;
const FONT_SIZE: f64 = 11.0;

impl<'d> Plotter<'d> {
    pub fn from(data: &'d Timeline) -> Self {
        Self { data }
    }

    pub fn render(&self, file: &Path) -> std::io::Result<()> {
        svg::save(file, &self.document())
    }

    fn document(&self) -> Document {
        let ndays = self.data.labels.len() as f64;
        let nrows = self.data.records.len() as f64;
        let fwidth = NAME_COLUMN + ndays * CELL;
        let fheight = HEADER + nrows * CELL;
        let column = |i: usize| NAME_COLUMN + i as f64 * CELL;
        let line = |i: usize| HEADER + i as f64 * CELL;

        let mut doc = Document::new();
        // weekend background and day labels
        let labels = &self.data.labels;
        for (i, (day, w)) in labels.days.iter().zip(&labels.weekdays).enumerate() {
            if w.is_weekend() {
                doc = doc.add(
                    Rectangle::new()
                        .set("x", column(i))
                        .set("y", 0.0)
                        .set("width", CELL)
                        .set("height", fheight)
                        .set("fill", WEEKEND_FILL),
                );
            }
            doc = doc
                .add(label(column(i) + CELL / 2.0, CELL * 0.7, day, weekday_color(*w)).set("text-anchor", "middle"))
                .add(label(column(i) + CELL / 2.0, CELL * 1.7, w.code(), weekday_color(*w)).set("text-anchor", "middle"));
        }

        let mut prev: Option<&str> = None;
        for (j, (rec, cells)) in self.data.lines().enumerate() {
            if prev != Some(rec.equipment_id()) {
                doc = doc.add(rule(0.0, fwidth, line(j)));
                doc = doc.add(label(2.0, line(j) + CELL * 0.7, rec.equipment_id(), "gray").set("font-weight", "bold"));
            }
            prev = Some(rec.equipment_id());
            doc = doc.add(label(NAME_COLUMN - 4.0, line(j) + CELL * 0.7, rec.user(), "black").set("text-anchor", "end"));
            for (i, cell) in cells.iter().enumerate() {
                let fill = match cell.occupancy {
                    Occupancy::Empty => continue,
                    Occupancy::Occupied => OCCUPIED_FILL,
                    Occupancy::Ongoing => ONGOING_FILL,
                };
                doc = doc.add(
                    Rectangle::new()
                        .set("x", column(i) + 1.0)
                        .set("y", line(j) + 2.0)
                        .set("width", CELL - 2.0)
                        .set("height", CELL - 4.0)
                        .set("fill", fill),
                );
            }
        }
        let xaxis = rule(0.0, fwidth, HEADER);
        let yaxis = Line::new()
            .set("x1", NAME_COLUMN)
            .set("x2", NAME_COLUMN)
            .set("y1", 0.0)
            .set("y2", fheight)
            .set("stroke", "black")
            .set("stroke-width", 1.0);
        doc.add(xaxis)
            .add(yaxis)
            .set("viewBox", (-MARGIN, -MARGIN, fwidth + 2.0 * MARGIN, fheight + 2.0 * MARGIN))
            .set("font-family", "monospace")
            .set("font-size", FONT_SIZE)
    }
}

const WEEKEND_FILL: &str = "#eeeeee";
const OCCUPIED_FILL: &str = "steelblue";
const ONGOING_FILL: &str = "orange";

fn weekday_color(w: crate::lib::date::Weekday) -> &'static str {
    use crate::lib::date::Weekday::*;
    match w {
        Sat => "blue",
        Sun => "red",
        _ => "black",
    }
}

fn label(x: f64, y: f64, text: &str, color: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("fill", color.to_string())
        .add(svg::node::Text::new(escape(text)))
}

/// Text nodes are written verbatim, user-provided names must be escaped
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn rule(x1: f64, x2: f64, y: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("x2", x2)
        .set("y1", y)
        .set("y2", y)
        .set("stroke", "gray")
        .set("stroke-width", 0.5)
}
