// src/data/datetime.rs

//! Functions to transform log timestamp strings into chrono
//! [`NaiveDateTime`] instances, and to compare timestamps for
//! run-matching.
//!
//! Log timestamps have the fixed form `MM/DD HH:MM:SS.fff` and carry no
//! year. The year is taken from the local wall-clock at parse time.
//! This is a known precision limitation: logs spanning a year boundary,
//! or analyzed in a later year than they were captured, resolve to the
//! wrong year. The behavior is deliberately kept (it matches the log
//! format, which simply does not record a year).
//!
//! [`NaiveDateTime`]: https://docs.rs/chrono/0.4.40/chrono/naive/struct.NaiveDateTime.html

use ::chrono::{Datelike, Duration, Local, NaiveDateTime};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// An "Instrumentation" DateTime. All log timestamps are naive; the log
/// format records neither a timezone nor a year.
pub type DateTimeI = NaiveDateTime;
pub type DateTimeIOpt = Option<DateTimeI>;

/// chrono strftime pattern for the in-log timestamp, with the inferred
/// year prepended (see [`datetime_parse_log`]).
const DT_PATTERN_LOG: &str = "%Y %m/%d %H:%M:%S%.f";

/// chrono strftime pattern for a run identifier,
/// e.g. `20260412-100000`. Second resolution; used in snapshot file
/// names and as the CLI `--run` argument.
pub const DT_PATTERN_RUN: &str = "%Y%m%d-%H%M%S";

/// chrono strftime pattern for serialized event timestamps (ISO-8601).
pub const DT_PATTERN_ISO: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Two timestamps within this window belong to the same run.
/// Processes of one run start within seconds of one another; distinct
/// runs are minutes or more apart.
pub const RUN_MATCH_TOLERANCE_S: i64 = 60;

/// Parse a log timestamp, e.g. `04/12 10:00:00.123`.
///
/// Returns `None` for anything unparseable; callers treat that as a
/// malformed line and skip it.
pub fn datetime_parse_log(dt_str: &str) -> DateTimeIOpt {
    let year = Local::now().year();
    let with_year = format!("{} {}", year, dt_str);
    NaiveDateTime::parse_from_str(with_year.as_str(), DT_PATTERN_LOG).ok()
}

/// Parse a run identifier, e.g. `20260412-100000`.
pub fn datetime_parse_run(run_str: &str) -> DateTimeIOpt {
    NaiveDateTime::parse_from_str(run_str, DT_PATTERN_RUN).ok()
}

/// Format a timestamp as a run identifier.
pub fn datetime_format_run(dt: &DateTimeI) -> String {
    dt.format(DT_PATTERN_RUN).to_string()
}

/// Absolute difference of two timestamps.
fn dt_abs_diff(
    dt_a: &DateTimeI,
    dt_b: &DateTimeI,
) -> Duration {
    let diff: Duration = *dt_a - *dt_b;
    if diff < Duration::zero() {
        -diff
    } else {
        diff
    }
}

/// Is `dt_a` strictly within the run-match tolerance of `dt_b`?
///
/// Used by the run locator to decide that a run header belongs to the
/// requested run.
pub fn dt_within_run_tolerance(
    dt_a: &DateTimeI,
    dt_b: &DateTimeI,
) -> bool {
    dt_abs_diff(dt_a, dt_b) < Duration::seconds(RUN_MATCH_TOLERANCE_S)
}

/// Is `dt_a` further than the run-match tolerance from `dt_b`?
///
/// Used by the aggregator to reject a file belonging to a different run.
/// A difference of exactly the tolerance is still accepted; the check
/// mirrors [`dt_within_run_tolerance`] but both are strict comparisons,
/// so the boundary value passes neither as "within" nor as "beyond".
pub fn dt_beyond_run_tolerance(
    dt_a: &DateTimeI,
    dt_b: &DateTimeI,
) -> bool {
    dt_abs_diff(dt_a, dt_b) > Duration::seconds(RUN_MATCH_TOLERANCE_S)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// serde helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// serde adapter serializing a [`DateTimeI`] as an ISO-8601 string,
/// for `#[serde(with = "dt_iso")]` fields.
pub mod dt_iso {
    use ::chrono::NaiveDateTime;
    use ::serde::{self, Deserialize, Deserializer, Serializer};

    use super::{DateTimeI, DT_PATTERN_ISO};

    pub fn serialize<S>(
        dt: &DateTimeI,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(dt.format(DT_PATTERN_ISO).to_string().as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTimeI, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(s.as_str(), DT_PATTERN_ISO).map_err(serde::de::Error::custom)
    }
}

/// serde adapter serializing a [`DateTimeI`] as a run identifier string,
/// for the snapshot `__run_timestamp` field. Serialization truncates to
/// second resolution; the in-memory value keeps full precision.
pub mod dt_run {
    use ::serde::{self, Deserialize, Deserializer, Serializer};

    use super::{datetime_format_run, datetime_parse_run, DateTimeI};

    pub fn serialize<S>(
        dt: &DateTimeI,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(datetime_format_run(dt).as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTimeI, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        datetime_parse_run(s.as_str())
            .ok_or_else(|| serde::de::Error::custom(format!("bad run timestamp {:?}", s)))
    }
}
