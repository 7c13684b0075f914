//! Server log file filtering for the `door-logs` viewer.
//!
//! The server writes one record per line (fmt layer, no ANSI), each starting
//! with an RFC 3339 timestamp; access lines carry the client IP. Filters
//! are plain substring matches on those.

use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDate;

/// Default log path, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "./logs.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFilter {
    All,
    /// Lines containing this address (or fragment of one).
    Ip(String),
    /// Lines stamped on this calendar day.
    Date(NaiveDate),
}

impl LogFilter {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::All => true,
            Self::Ip(ip) => line.contains(ip.as_str()),
            Self::Date(date) => line.contains(&date.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Lines of `text` that pass `filter`, in file order.
pub fn filter_lines<'a>(text: &'a str, filter: &'a LogFilter) -> impl Iterator<Item = &'a str> + 'a {
    text.lines().filter(move |line| filter.matches(line))
}

pub fn read_filtered(path: &Path, filter: &LogFilter) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(filter_lines(&text, filter).map(str::to_owned).collect())
}
