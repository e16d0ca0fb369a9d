// src/data/logline.rs

//! Implements a [`LogLine`] struct and the line classifier.
//!
//! An Open5GS-style log line is rigid and position-sensitive:
//!
//! ```text
//! 04/12 10:00:00.123: [amf] INFO: registration complete (amf-sm.c:512)
//! ```
//!
//! timestamp, bracketed domain tag, severity word, free-text message,
//! trailing parenthesized source location. Lines violating this shape are
//! silently skipped; the log stream interleaves instrumentation and
//! non-instrumentation output and permissive parsing is intentional.
//!
//! A second, independent matcher recognizes the run-header sentinel that
//! the daemon prints once per start-up, delimiting runs within one file.
//!
//! [`LogLine`]: self::LogLine

use crate::common::DomainName;
use crate::data::datetime::{datetime_parse_log, DateTimeI};

use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

lazy_static! {
    /// The general log-line shape. Anchored; all five fields must be
    /// present in order.
    static ref LOG_LINE_REGEX: Regex = Regex::new(
        r"^(?P<timestamp>[0-9]{2}/[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}): \[(?P<domain>.+?)\] (?P<level>[A-Z]+): (?P<message>.+?) \((?P<location>.+:[0-9]+)\)$"
    ).unwrap();

    /// The run-header sentinel printed once per daemon start.
    static ref RUN_HEADER_REGEX: Regex = Regex::new(r"^Open5GS daemon v.+").unwrap();
}

/// Log message severity word. The daemon only emits the six known words;
/// anything else still classifies (the classifier is permissive) and maps
/// to `Unknown`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    Fatal,
    Error,
    Warning,
    Info,
    Debug,
    Trace,
    Unknown,
}

impl Level {
    pub fn from_log_word(word: &str) -> Level {
        match word {
            "FATAL" => Level::Fatal,
            "ERROR" => Level::Error,
            "WARNING" => Level::Warning,
            "INFO" => Level::Info,
            "DEBUG" => Level::Debug,
            "TRACE" => Level::Trace,
            _ => Level::Unknown,
        }
    }
}

/// One classified log line. Immutable once built; consumed once by the
/// instrumentation tag parser.
#[derive(Clone, Debug, PartialEq)]
pub struct LogLine {
    /// Timestamp, year inferred from the wall-clock
    /// (see [`datetime_parse_log`]).
    pub timestamp: DateTimeI,
    /// Process/module identity, e.g. `amf`.
    pub domain: DomainName,
    pub level: Level,
    /// Free-text message body; may embed an instrumentation tag.
    pub message: String,
    /// `file:line` of the emitting source code.
    pub location: String,
}

/// Outcome of classifying one raw line.
#[derive(Clone, Debug, PartialEq)]
pub enum LineClass {
    /// The general log-line shape matched.
    Log(LogLine),
    /// The run-header sentinel matched; a new run begins at this line.
    RunHeader,
    /// Neither shape matched; the line is ignored.
    NoMatch,
}

/// Classify one raw line (without trailing newline).
///
/// The run-header check comes first; a header never matches the general
/// shape, but the precedence makes run delimiting independent of the
/// log-line grammar.
pub fn classify(line: &str) -> LineClass {
    if RUN_HEADER_REGEX.is_match(line) {
        return LineClass::RunHeader;
    }
    let captures = match LOG_LINE_REGEX.captures(line) {
        Some(captures) => captures,
        None => return LineClass::NoMatch,
    };
    // capture groups are all required by the pattern; only the timestamp
    // needs a semantic parse and can still fail (e.g. `13/32 …`)
    let timestamp: DateTimeI = match datetime_parse_log(&captures["timestamp"]) {
        Some(dt) => dt,
        None => return LineClass::NoMatch,
    };

    LineClass::Log(LogLine {
        timestamp,
        domain: captures["domain"].to_string(),
        level: Level::from_log_word(&captures["level"]),
        message: captures["message"].to_string(),
        location: captures["location"].to_string(),
    })
}

/// Is this raw line a run header?
pub fn is_run_header(line: &str) -> bool {
    RUN_HEADER_REGEX.is_match(line)
}
