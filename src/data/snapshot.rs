// src/data/snapshot.rs

//! Implements the [`RunSnapshot`] aggregation root and its nested data.
//!
//! One `RunSnapshot` holds everything extracted for a single run of the
//! monitored system: per-domain duration samples, per-object state-change
//! timelines, and per-function start/stop markers. It is the unit of
//! persistence; the serialized JSON shape is pinned here via serde
//! attributes and read back by the call-stack reconstructor.
//!
//! All maps are `BTreeMap` so serialization order is deterministic and
//! snapshots of identical runs diff cleanly.
//!
//! [`RunSnapshot`]: self::RunSnapshot

use crate::common::{DomainName, FunctionName, LineNumber};
use crate::data::datetime::{dt_iso, dt_run, DateTimeI};
use crate::data::instrument::MarkerKind;

use std::collections::BTreeMap;

use ::serde::{Deserialize, Serialize};

/// One state-change event of a tracked object.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Event {
    #[serde(rename = "event")]
    pub event_name: String,
    #[serde(with = "dt_iso")]
    pub timestamp: DateTimeI,
    pub message: String,
    #[serde(rename = "linenumber")]
    pub source_line_number: LineNumber,
    /// Emitting function; recorded by state tags of version ≥ 1 only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<FunctionName>,
}

/// One duration sample.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DurationSample {
    /// Seconds.
    pub duration: f64,
    #[serde(with = "dt_iso")]
    pub timestamp: DateTimeI,
    #[serde(rename = "linenumber")]
    pub source_line_number: LineNumber,
}

/// One start or stop marker of an instrumented function.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Marker {
    #[serde(rename = "event")]
    pub kind: MarkerKind,
    #[serde(with = "dt_iso")]
    pub timestamp: DateTimeI,
    #[serde(rename = "linenumber")]
    pub source_line_number: LineNumber,
}

/// Events of one nested child object.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ChildEvents {
    pub events: Vec<Event>,
}

/// One tracked object: its own events plus, optionally, nested child
/// objects sharing its lifecycle record (e.g. a session embedded in a
/// subscriber context).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ObjectState {
    pub events: Vec<Event>,
    pub child_events: BTreeMap<String, ChildEvents>,
}

/// Everything aggregated for one domain.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct DomainData {
    /// Duration samples keyed by sample name.
    pub time: BTreeMap<String, Vec<DurationSample>>,
    /// State-change timelines keyed by object identity.
    pub state_changes: BTreeMap<String, ObjectState>,
    /// Start/stop markers keyed by function name; filled by the
    /// post-aggregation merge, empty while a scan is in flight.
    #[serde(default)]
    pub timemarker: BTreeMap<FunctionName, Vec<Marker>>,
}

/// The aggregation root; one per detected execution run.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RunSnapshot {
    /// Run identity; timestamp of the first classified line of the first
    /// processed file. Set exactly once. Full precision in memory,
    /// second resolution when serialized.
    #[serde(rename = "__run_timestamp", with = "dt_run")]
    pub run_timestamp: DateTimeI,
    /// Per-domain data, flattened to the JSON top level beside
    /// `__run_timestamp`.
    #[serde(flatten)]
    pub domains: BTreeMap<DomainName, DomainData>,
}

impl RunSnapshot {
    pub fn new(run_timestamp: DateTimeI) -> RunSnapshot {
        RunSnapshot {
            run_timestamp,
            domains: BTreeMap::new(),
        }
    }

    /// The `DomainData` for `domain`, created empty on first use.
    pub fn domain_mut(
        &mut self,
        domain: &str,
    ) -> &mut DomainData {
        self.domains
            .entry(domain.to_string())
            .or_default()
    }
}

impl DomainData {
    /// Append a state event under `obj_id`, or under `child_id` within
    /// `obj_id` when `child_id` is non-empty.
    pub fn record_state_event(
        &mut self,
        obj_id: &str,
        child_id: &str,
        event: Event,
    ) {
        let object: &mut ObjectState = self
            .state_changes
            .entry(obj_id.to_string())
            .or_default();
        if child_id.is_empty() {
            object.events.push(event);
        } else {
            object
                .child_events
                .entry(child_id.to_string())
                .or_default()
                .events
                .push(event);
        }
    }

    /// Append a duration sample under `sample_name`.
    pub fn record_duration(
        &mut self,
        sample_name: &str,
        sample: DurationSample,
    ) {
        self.time
            .entry(sample_name.to_string())
            .or_default()
            .push(sample);
    }
}
