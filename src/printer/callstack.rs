// src/printer/callstack.rs

//! Implements the call-stack reconstructor.
//!
//! Flattens every state event and start/stop marker of one domain into a
//! single chronological sequence and renders it as an ordered narrative,
//! one line per record:
//!
//! ```text
//! 2026-04-12 10:00:00.123000 | fnAttach | function start |
//! 2026-04-12 10:00:00.125000 | fnAttach | state access | ue1 write
//! 2026-04-12 10:00:00.126000 | fnAttach | function stop |
//! ```
//!
//! The sort key is `source_line_number`, not the timestamp: source order
//! is the authoritative ordering within a run, since the millisecond log
//! timestamps may tie. The output is deterministic and suitable for
//! diffing between runs.

use crate::common::{FunctionName, LineNumber};
use crate::data::datetime::DateTimeI;
use crate::data::instrument::MarkerKind;
use crate::data::snapshot::{DomainData, RunSnapshot};

use std::fmt;
use std::io::{Error, ErrorKind, Result};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// What one [`CallstackRecord`] represents.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordKind {
    /// A state event; an instrumented access to a tracked object.
    StateAccess,
    /// A `start` or `stop` marker of an instrumented function.
    Function(MarkerKind),
}

impl fmt::Display for RecordKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        match self {
            RecordKind::StateAccess => write!(f, "state access"),
            RecordKind::Function(MarkerKind::Start) => write!(f, "function start"),
            RecordKind::Function(MarkerKind::Stop) => write!(f, "function stop"),
        }
    }
}

/// One flattened record of the reconstructed call-stack.
#[derive(Clone, Debug, PartialEq)]
pub struct CallstackRecord {
    pub timestamp: DateTimeI,
    /// Emitting function. Empty for state events recorded by protocol
    /// version 0, which did not carry one.
    pub function: FunctionName,
    pub kind: RecordKind,
    /// `parent` or `parent->child` object path; empty for markers.
    pub object: String,
    /// Normalized event name; empty for markers.
    pub event: String,
    pub source_line_number: LineNumber,
}

impl CallstackRecord {
    /// Render as one narrative line:
    /// `timestamp | function | type | object event`.
    pub fn render(&self) -> String {
        format!(
            "{} | {} | {} | {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.6f"),
            self.function,
            self.kind,
            self.object,
            self.event,
        )
    }
}

/// Collapse the several aliases the instrumented code uses for a write
/// into one canonical event name.
fn normalize_event(event_name: &str) -> &str {
    match event_name {
        "clear" | "init" | "new" => "write",
        _ => event_name,
    }
}

/// Flatten one domain's events and markers, ordered by source line
/// number ascending.
pub fn build_callstack(domain_data: &DomainData) -> Vec<CallstackRecord> {
    defn!();
    let mut records: Vec<CallstackRecord> = Vec::new();
    for (obj_id, object) in domain_data.state_changes.iter() {
        for event in object.events.iter() {
            records.push(CallstackRecord {
                timestamp: event.timestamp,
                function: event.function.clone().unwrap_or_default(),
                kind: RecordKind::StateAccess,
                object: obj_id.clone(),
                event: normalize_event(event.event_name.as_str()).to_string(),
                source_line_number: event.source_line_number,
            });
        }
        for (child_id, child) in object.child_events.iter() {
            for event in child.events.iter() {
                records.push(CallstackRecord {
                    timestamp: event.timestamp,
                    function: event.function.clone().unwrap_or_default(),
                    kind: RecordKind::StateAccess,
                    object: format!("{}->{}", obj_id, child_id),
                    event: normalize_event(event.event_name.as_str()).to_string(),
                    source_line_number: event.source_line_number,
                });
            }
        }
    }
    for (function, markers) in domain_data.timemarker.iter() {
        for marker in markers.iter() {
            records.push(CallstackRecord {
                timestamp: marker.timestamp,
                function: function.clone(),
                kind: RecordKind::Function(marker.kind),
                object: String::new(),
                event: String::new(),
                source_line_number: marker.source_line_number,
            });
        }
    }
    // stable sort; records of one line keep insertion order
    records.sort_by_key(|record| record.source_line_number);
    defx!("return {} records", records.len());

    records
}

/// Reconstruct the call-stack for `domain` out of a snapshot.
///
/// A domain absent from the snapshot is a `NotFound` error; the caller
/// turns that into a non-zero exit.
pub fn domain_callstack(
    snapshot: &RunSnapshot,
    domain: &str,
) -> Result<Vec<CallstackRecord>> {
    let domain_data: &DomainData = snapshot.domains.get(domain).ok_or_else(|| {
        Error::new(
            ErrorKind::NotFound,
            format!("domain {:?} not available in snapshot", domain),
        )
    })?;

    Ok(build_callstack(domain_data))
}
