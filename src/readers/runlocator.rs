// src/readers/runlocator.rs

//! Implements the run locator.
//!
//! One log file may hold many runs of the monitored system, each starting
//! with a run-header sentinel line (see [`logline`]). The locator makes a
//! single forward scan over a file, tracking the byte offset of the most
//! recent header seen, and answers one of:
//!
//! - which byte offset does the requested run's header start at
//!   ([`locate_run`]), or
//! - which runs does this file hold at all ([`dump_runs`], discovery).
//!
//! A run is identified by the timestamp of the first classifiable log
//! line after its header. Malformed lines never raise; they simply do
//! not identify a run.
//!
//! Scanning is a plain linear pass. Files are scanned once per
//! invocation and building a line index is not worth the complexity.
//!
//! [`logline`]: crate::data::logline

use crate::common::{FPath, File, FileOffset};
use crate::data::datetime::{dt_within_run_tolerance, DateTimeI, DateTimeIOpt};
use crate::data::logline::{classify, is_run_header, LineClass};
use crate::readers::helpers::chomp;

use std::io::{BufRead, BufReader, Result};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Find the byte offset of the header line of the wanted run.
///
/// With a `target` timestamp, the scan stops at the first run whose
/// identifying line is within the 1-minute run-match tolerance of the
/// target, selecting the header immediately preceding that line; if no
/// run matches, the last header in the file is selected (same as no
/// target). Without a `target`, the whole file is scanned and the last
/// header wins (default "analyze the most recent run").
///
/// Returns `None` for a file containing no run header at all.
/// The scan is read-only and idempotent.
pub fn locate_run(
    path: &FPath,
    target: &DateTimeIOpt,
) -> Result<Option<FileOffset>> {
    defn!("({:?}, {:?})", path, target);
    let file: File = File::open(path)?;
    let mut reader: BufReader<File> = BufReader::new(file);
    let mut line: String = String::new();

    let mut run_header_offset: Option<FileOffset> = None;
    let mut running_offset: FileOffset = 0;
    let mut last_was_head: bool = false;
    loop {
        line.clear();
        let sz: usize = reader.read_line(&mut line)?;
        if sz == 0 {
            break;
        }
        chomp(&mut line);
        if is_run_header(line.as_str()) {
            defo!("run header at offset {}", running_offset);
            run_header_offset = Some(running_offset);
            last_was_head = true;
        } else if last_was_head {
            if let Some(target) = target {
                if let LineClass::Log(logline) = classify(line.as_str()) {
                    if dt_within_run_tolerance(&logline.timestamp, target) {
                        defx!("matched target, header offset {:?}", run_header_offset);
                        return Ok(run_header_offset);
                    }
                    last_was_head = false;
                }
            }
        }
        running_offset += sz as FileOffset;
    }
    defx!("return {:?}", run_header_offset);

    Ok(run_header_offset)
}

/// Scan a whole file and report the identifying timestamp of every run
/// found (discovery mode). Headers never followed by a classifiable line
/// are not reported.
pub fn dump_runs(path: &FPath) -> Result<Vec<DateTimeI>> {
    defn!("({:?})", path);
    let file: File = File::open(path)?;
    let mut reader: BufReader<File> = BufReader::new(file);
    let mut line: String = String::new();

    let mut candidates: Vec<DateTimeI> = Vec::new();
    let mut last_was_head: bool = false;
    loop {
        line.clear();
        let sz: usize = reader.read_line(&mut line)?;
        if sz == 0 {
            break;
        }
        chomp(&mut line);
        if is_run_header(line.as_str()) {
            last_was_head = true;
        } else if last_was_head {
            if let LineClass::Log(logline) = classify(line.as_str()) {
                candidates.push(logline.timestamp);
                last_was_head = false;
            }
        }
    }
    defx!("return {} candidates", candidates.len());

    Ok(candidates)
}
