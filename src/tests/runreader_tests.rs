// src/tests/runreader_tests.rs

//! tests for `runreader.rs`

use crate::common::FileOffset;
use crate::data::logline::LogLine;
use crate::readers::runlocator::locate_run;
use crate::readers::runreader::RunReader;
use crate::tests::common::{create_log_file, dt_log, LOG_CONTENT_TWO_RUNS};

#[test]
fn test_runreader_first_run_stops_at_next_header() {
    let (_file, path) = create_log_file(LOG_CONTENT_TWO_RUNS);
    // first run's header is the first line of the file
    let reader = RunReader::open(&path, 0 as FileOffset).unwrap();
    let lines: Vec<LogLine> = reader.collect();
    // 3 classifiable lines before the second run header; noise skipped
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].domain, "app");
    assert_eq!(lines[1].message, "[state]{ue1,,init,first run}");
    assert_eq!(lines[2].message, "[time]{setup,0.250}");
    assert_eq!(lines[0].timestamp, dt_log(4, 12, 9, 0, 0, 100));
}

#[test]
fn test_runreader_last_run_ends_at_eof() {
    let (_file, path) = create_log_file(LOG_CONTENT_TWO_RUNS);
    let offset = locate_run(&path, &None).unwrap().unwrap();
    let reader = RunReader::open(&path, offset).unwrap();
    let lines: Vec<LogLine> = reader.collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].timestamp, dt_log(4, 12, 10, 0, 0, 123));
    assert_eq!(lines[3].message, "[timemarker]{fnAttach,stop}");
}

#[test]
fn test_runreader_single_pass() {
    let (_file, path) = create_log_file(LOG_CONTENT_TWO_RUNS);
    let offset = locate_run(&path, &None).unwrap().unwrap();
    let mut reader = RunReader::open(&path, offset).unwrap();
    while reader.next().is_some() {}
    // exhausted; not restartable
    assert!(reader.next().is_none());
}
