// src/readers/runprocessor.rs

//! Implements a [`RunProcessor`], the timeline aggregator; the driver of
//! per-file run scans that folds instrumentation tags into one
//! [`RunSnapshot`].
//!
//! Processing is strictly sequential: one file at a time, in a
//! deterministic caller-visible order. The first classified line of the
//! first file anchors the run identity (`run_timestamp`); the first
//! classified line of every later file must fall within the run-match
//! tolerance of that anchor, else the whole batch is aborted and the
//! snapshot built so far is kept. Mixing two runs' events would silently
//! produce misleading timelines; a partial result is the better failure.
//!
//! Start/stop markers are accumulated across all files, balance-checked
//! once at the end of the pass, and merged into each domain's
//! `timemarker` map. Imbalance (an instrumented function that never
//! stopped, or stopped twice) is reported and kept.
//!
//! [`RunProcessor`]: self::RunProcessor
//! [`RunSnapshot`]: crate::data::snapshot::RunSnapshot

use crate::common::{Count, DomainName, FPaths, FunctionName, LineNumber};
use crate::data::datetime::{dt_beyond_run_tolerance, DateTimeIOpt};
use crate::data::instrument::{
    parse_instrument_tag,
    InstrumentTag,
    MarkerKind,
    StateTag,
    TimeTag,
};
use crate::data::logline::LogLine;
use crate::data::snapshot::{DurationSample, Event, Marker, RunSnapshot};
use crate::e_wrn;
use crate::readers::helpers::path_to_fpath;
use crate::readers::runlocator::locate_run;
use crate::readers::runreader::RunReader;

use std::collections::BTreeMap;
use std::io::Result;
use std::path::Path;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Aggregation states. One `RunProcessor` advances through these while
/// folding files; `Aborted` is terminal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProcessingState {
    /// No classified line seen yet; run identity unknown.
    AwaitingFirstEvent,
    /// Run identity anchored; folding lines.
    InRun,
    /// A file belonged to a different run. The snapshot built so far is
    /// kept; no further files are processed.
    Aborted,
}

/// Markers accumulated per (domain, function) across all files of a run,
/// merged into the snapshot by [`RunProcessor::finish`].
type MarkerAccumulator = BTreeMap<(DomainName, FunctionName), Vec<Marker>>;

pub struct RunProcessor {
    state: ProcessingState,
    /// `None` until the first classified line anchors the run.
    snapshot: Option<RunSnapshot>,
    markers: MarkerAccumulator,
}

impl Default for RunProcessor {
    fn default() -> RunProcessor {
        RunProcessor::new()
    }
}

impl RunProcessor {
    pub fn new() -> RunProcessor {
        RunProcessor {
            state: ProcessingState::AwaitingFirstEvent,
            snapshot: None,
            markers: MarkerAccumulator::new(),
        }
    }

    pub fn state(&self) -> ProcessingState {
        self.state
    }

    /// Fold one file's run line stream into the snapshot.
    ///
    /// `source_line_number` restarts at 1 for each file; it is the
    /// position within that file's stream.
    pub fn process_file(
        &mut self,
        lines: impl Iterator<Item = LogLine>,
    ) {
        if self.state == ProcessingState::Aborted {
            defñ!("aborted; skip file");
            return;
        }
        defn!();
        let mut first_line: bool = true;
        let mut line_number: LineNumber = 0;
        for logline in lines {
            line_number += 1;
            match self.snapshot.as_ref() {
                None => {
                    defo!("run timestamp anchored to {}", logline.timestamp);
                    self.snapshot = Some(RunSnapshot::new(logline.timestamp));
                    self.state = ProcessingState::InRun;
                }
                Some(snapshot) if first_line => {
                    let run_timestamp = snapshot.run_timestamp;
                    if dt_beyond_run_tolerance(&logline.timestamp, &run_timestamp) {
                        e_wrn!(
                            "Log data not matching run of previously analyzed logs! (prev: {}, this: {})",
                            run_timestamp,
                            logline.timestamp,
                        );
                        self.state = ProcessingState::Aborted;
                        defx!("aborted");
                        return;
                    }
                }
                Some(_) => {}
            }
            first_line = false;

            self.dispatch(&logline, line_number);
        }
        defx!("{} lines", line_number);
    }

    /// Route one classified line to the handler of the tag its message
    /// carries, if any.
    fn dispatch(
        &mut self,
        logline: &LogLine,
        line_number: LineNumber,
    ) {
        let tag = match parse_instrument_tag(logline.message.as_str()) {
            Some(tag) => tag,
            None => return,
        };
        // `snapshot` is always `Some` here; the first classified line
        // anchored it before any dispatch
        let snapshot: &mut RunSnapshot = match self.snapshot.as_mut() {
            Some(snapshot) => snapshot,
            None => return,
        };
        match tag {
            InstrumentTag::State(state) => {
                handle_state_tag(snapshot, logline, line_number, state)
            }
            InstrumentTag::Time(time) => {
                handle_time_tag(snapshot, logline, line_number, time)
            }
            InstrumentTag::Marker(marker) => {
                self.markers
                    .entry((logline.domain.clone(), marker.function))
                    .or_default()
                    .push(Marker {
                        kind: marker.kind,
                        timestamp: logline.timestamp,
                        source_line_number: line_number,
                    });
            }
        }
    }

    /// End of the aggregation pass: balance-check the markers collected
    /// across all files and merge them into the snapshot.
    ///
    /// Returns `None` when no file contributed a single classified line.
    pub fn finish(self) -> Option<RunSnapshot> {
        defn!();
        let mut snapshot: RunSnapshot = self.snapshot?;
        for ((domain, function), markers) in self.markers.into_iter() {
            let starts: Count = markers
                .iter()
                .filter(|m| m.kind == MarkerKind::Start)
                .count() as Count;
            let stops: Count = markers.len() as Count - starts;
            if starts != stops {
                e_wrn!(
                    "Unbalanced timemarkers for function {:?} in domain {:?} ({} start, {} stop)",
                    function,
                    domain,
                    starts,
                    stops,
                );
            }
            snapshot
                .domain_mut(domain.as_str())
                .timemarker
                .insert(function, markers);
        }
        defx!();

        Some(snapshot)
    }
}

fn handle_state_tag(
    snapshot: &mut RunSnapshot,
    logline: &LogLine,
    line_number: LineNumber,
    state: StateTag,
) {
    let event = Event {
        event_name: state.event_name().to_string(),
        timestamp: logline.timestamp,
        message: state.message().to_string(),
        source_line_number: line_number,
        function: state.function().map(String::from),
    };
    snapshot
        .domain_mut(logline.domain.as_str())
        .record_state_event(state.obj_id(), state.child_id(), event);
}

fn handle_time_tag(
    snapshot: &mut RunSnapshot,
    logline: &LogLine,
    line_number: LineNumber,
    time: TimeTag,
) {
    let sample = DurationSample {
        duration: time.duration,
        timestamp: logline.timestamp,
        source_line_number: line_number,
    };
    snapshot
        .domain_mut(logline.domain.as_str())
        .record_duration(time.sample_name.as_str(), sample);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// directory driver
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Enumerate the `*.log` files of `logdir`, sorted for a deterministic
/// processing order, excluding any file whose name contains one of the
/// `exclude` substrings (non-instrumented producers, e.g. the database).
pub fn log_dir_files(
    logdir: &Path,
    exclude: &[String],
) -> Result<FPaths> {
    defn!("({:?})", logdir);
    let mut paths: FPaths = FPaths::new();
    for entry in std::fs::read_dir(logdir)? {
        let path = entry?.path();
        if path.extension() != Some(std::ffi::OsStr::new("log")) {
            continue;
        }
        let name: String = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if exclude.iter().any(|substr| name.contains(substr.as_str())) {
            defo!("excluded {:?}", name);
            continue;
        }
        paths.push(path_to_fpath(path.as_path()));
    }
    paths.sort();
    defx!("return {} files", paths.len());

    Ok(paths)
}

/// Aggregate one run from a directory of per-process log files.
///
/// With a `target` run identifier the run closest to it is selected in
/// each file; without one, the most recent run. Files holding no run
/// header are skipped. Returns `None` when nothing classified.
pub fn process_log_dir(
    logdir: &Path,
    target: &DateTimeIOpt,
    exclude: &[String],
) -> Result<Option<RunSnapshot>> {
    defn!("({:?}, {:?})", logdir, target);
    let mut processor = RunProcessor::new();
    for path in log_dir_files(logdir, exclude)?.iter() {
        let offset = match locate_run(path, target)? {
            Some(offset) => offset,
            None => {
                defo!("no run header in {:?}", path);
                continue;
            }
        };
        let reader: RunReader = RunReader::open(path, offset)?;
        processor.process_file(reader);
    }
    defx!();

    Ok(processor.finish())
}
