// src/tests/callstack_tests.rs

//! tests for `callstack.rs`, the call-stack reconstructor

use crate::data::instrument::MarkerKind;
use crate::data::snapshot::RunSnapshot;
use crate::printer::callstack::{build_callstack, domain_callstack, RecordKind};
use crate::readers::runprocessor::RunProcessor;
use crate::tests::common::logline;

use std::io::ErrorKind;

use ::more_asserts::assert_ge;
use ::test_case::test_case;

/// One synthetic run of a single domain, mixing state accesses in parent
/// and child objects with a bracketing marker pair.
fn sample_snapshot() -> RunSnapshot {
    let lines = [
        "04/12 10:00:00.100: [amf] INFO: [timemarker]{fnAttach,start} (amf.c:10)",
        "04/12 10:00:00.120: [amf] INFO: [state]{ue1,,init,ctx,fnAttach}{1} (amf.c:20)",
        "04/12 10:00:00.120: [amf] INFO: [state]{ue1,sess1,read,pdu,fnAttach}{1} (amf.c:30)",
        "04/12 10:00:00.150: [amf] INFO: [timemarker]{fnAttach,stop} (amf.c:40)",
    ];
    let mut processor = RunProcessor::new();
    processor.process_file(lines.iter().map(|line| logline(line)));

    processor.finish().unwrap()
}

#[test]
fn test_callstack_ordered_by_line_number() {
    let snapshot = sample_snapshot();
    let records = domain_callstack(&snapshot, "amf").unwrap();
    assert_eq!(records.len(), 4);
    let linenumbers: Vec<usize> = records.iter().map(|r| r.source_line_number).collect();
    assert_eq!(linenumbers, vec![1, 2, 3, 4]);
}

#[test]
fn test_callstack_round_trip_non_decreasing() {
    // aggregate → serialize → parse back → reconstruct
    let snapshot = sample_snapshot();
    let serialized: String = serde_json::to_string(&snapshot).unwrap();
    let reloaded: RunSnapshot = serde_json::from_str(serialized.as_str()).unwrap();
    let records = domain_callstack(&reloaded, "amf").unwrap();
    let mut previous: usize = 0;
    for record in records.iter() {
        assert_ge!(record.source_line_number, previous);
        previous = record.source_line_number;
    }
}

#[test]
fn test_callstack_record_fields() {
    let snapshot = sample_snapshot();
    let records = domain_callstack(&snapshot, "amf").unwrap();

    assert_eq!(records[0].kind, RecordKind::Function(MarkerKind::Start));
    assert_eq!(records[0].function, "fnAttach");
    assert_eq!(records[0].object, "");

    assert_eq!(records[1].kind, RecordKind::StateAccess);
    assert_eq!(records[1].object, "ue1");
    // "init" normalizes to the canonical write
    assert_eq!(records[1].event, "write");

    assert_eq!(records[2].object, "ue1->sess1");
    assert_eq!(records[2].event, "read");

    assert_eq!(records[3].kind, RecordKind::Function(MarkerKind::Stop));
}

#[test_case("clear", "write")]
#[test_case("init", "write")]
#[test_case("new", "write")]
#[test_case("read", "read"; "read passes through")]
#[test_case("attach", "attach"; "others pass through")]
fn test_event_normalization(
    raw: &str,
    expect: &str,
) {
    let line = format!(
        "04/12 10:00:00.100: [amf] INFO: [state]{{ue1,,{},msg}} (amf.c:1)",
        raw
    );
    let mut processor = RunProcessor::new();
    processor.process_file([logline(line.as_str())].into_iter());
    let snapshot = processor.finish().unwrap();
    let records = build_callstack(&snapshot.domains["amf"]);
    assert_eq!(records[0].event, expect);
}

#[test]
fn test_render_format() {
    let snapshot = sample_snapshot();
    let records = domain_callstack(&snapshot, "amf").unwrap();
    let rendered: String = records[1].render();
    // timestamp | function | type | object event
    assert!(rendered.contains(" | fnAttach | state access | ue1 write"));
    assert!(rendered.starts_with(&format!("{}", records[1].timestamp.format("%Y-%m-%d"))));
}

#[test]
fn test_unknown_domain_is_not_found() {
    // Scenario E
    let snapshot = sample_snapshot();
    let err = domain_callstack(&snapshot, "upf").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_v0_events_render_empty_function() {
    let mut processor = RunProcessor::new();
    processor.process_file(
        [logline(
            "04/12 10:00:00.100: [amf] INFO: [state]{ue1,,attach,ok} (amf.c:1)",
        )]
        .into_iter(),
    );
    let snapshot = processor.finish().unwrap();
    let records = build_callstack(&snapshot.domains["amf"]);
    assert_eq!(records[0].function, "");
}
