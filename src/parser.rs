//! Turns the column-aligned text printed by `expressvpn list` into locations.
//!
//! The output has no escaping and no reliable delimiter. Runs of two or more
//! spaces separate columns, except that some columns hold names with single
//! spaces in them. An ordered list of [`Rule`]s finds the column boundaries
//! and the multi-word columns; the first rule that matches at a position
//! wins. Tabs already in the input are column boundaries too.
//!
//! `expressvpn list all` prints the country only on the first row of each
//! country group:
//!
//! ```text
//! usnj1 United States (US)          USA - New Jersey - 1           Y
//! usny                              USA - New York                 Y
//! ```
//!
//! so a country column followed by a location column yields the location.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{Error, Result};
use super::location::Location;

pub const DELIMITER: char = '\t';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The match is a column boundary and is dropped.
    Boundary,
    /// The match is a whole column on its own.
    Field,
}

#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    /// Must not contain capturing groups.
    pub pattern: &'static str,
    pub action: Action,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "smart-location",
        pattern: r"Smart Location",
        action: Action::Boundary,
    },
    Rule {
        // No digits, so an alias like `UK1` is never read as the first word.
        name: "country-name",
        pattern: r"\b[A-Z][^\s()\d]*(?: [^\s()\d]+)* \([A-Z]+\)",
        action: Action::Field,
    },
    Rule {
        name: "recommended-flag",
        pattern: r" {2,}Y\b",
        action: Action::Boundary,
    },
    Rule {
        name: "column-gap",
        pattern: r" {2,}",
        action: Action::Boundary,
    },
];

lazy_static! {
    static ref COLUMNS_REGEX: Regex = {
        let alternation = RULES
            .iter()
            .map(|rule| format!("({})", rule.pattern))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation).expect("COLUMNS_REGEX to compile")
    };
}

/// Lines to drop around the data region of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Trim {
    pub header: usize,
    pub footer: usize,
}

impl Trim {
    pub fn new(header: usize, footer: usize) -> Self {
        Trim { header, footer }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub text: String,
    /// Matched as a whole by a [`Action::Field`] rule.
    pub field: bool,
}

fn push_plain(columns: &mut Vec<Column>, text: &str) {
    columns.extend(
        text.split_inclusive(DELIMITER)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| Column {
                text: token.to_string(),
                field: false,
            }),
    );
}

/// Splits a line into its non-empty, trimmed columns.
pub fn columns(line: &str) -> Vec<Column> {
    let mut columns = Vec::new();
    let mut last = 0;

    for caps in COLUMNS_REGEX.captures_iter(line) {
        let (index, m) = match caps
            .iter()
            .skip(1)
            .enumerate()
            .find_map(|(i, m)| m.map(|m| (i, m)))
        {
            Some(found) => found,
            None => continue,
        };

        push_plain(&mut columns, &line[last..m.start()]);
        if RULES[index].action == Action::Field {
            columns.push(Column {
                text: m.as_str().to_string(),
                field: true,
            });
        }
        last = m.end();
    }
    push_plain(&mut columns, &line[last..]);

    columns
}

fn is_flag(text: &str) -> bool {
    matches!(text, "Y" | "N")
}

/// Picks the name out of the columns after the alias.
fn name_column(rest: &[Column]) -> Option<&Column> {
    match rest {
        [country, location, ..] if country.field && !is_flag(&location.text) => Some(location),
        [name, ..] => Some(name),
        [] => None,
    }
}

fn parse_numbered(line_number: usize, line: &str) -> Result<Location> {
    let columns = columns(line);
    log::trace!("line {}: {:?}", line_number, columns);

    let picked = columns
        .split_first()
        .and_then(|(alias, rest)| name_column(rest).map(|name| (alias, name)));
    match picked {
        Some((alias, name)) => Location::from_columns(&alias.text, &name.text, line_number, line),
        None => Err(Error::MalformedLine {
            line_number,
            line: line.to_string(),
        }),
    }
}

/// Parses a single data line. Flag columns after the name are ignored.
pub fn parse_line(line: &str) -> Result<Location> {
    parse_numbered(1, line)
}

fn parse_region<'a, I>(lines: I) -> Result<Vec<Location>>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_number, line)| parse_numbered(line_number, line))
        .collect()
}

/// Parses lines that are all data. Stops at the first malformed line.
pub fn parse_lines<'a, I>(lines: I) -> Result<Vec<Location>>
where
    I: IntoIterator<Item = &'a str>,
{
    parse_region(lines.into_iter().enumerate().map(|(i, line)| (i + 1, line)))
}

/// Drops `trim.header` leading and `trim.footer` trailing lines of `text`
/// and parses the rest. Line numbers in errors count from the top of `text`.
pub fn parse_listing(text: &str, trim: Trim) -> Result<Vec<Location>> {
    let lines: Vec<&str> = text.lines().collect();
    if trim.header + trim.footer >= lines.len() {
        log::debug!("no data lines: {} lines, trim {:?}", lines.len(), trim);
        return Ok(Vec::new());
    }

    let end = lines.len() - trim.footer;
    parse_region(
        lines[trim.header..end]
            .iter()
            .enumerate()
            .map(|(i, line)| (trim.header + i + 1, *line)),
    )
}
