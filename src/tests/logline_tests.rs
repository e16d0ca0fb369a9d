// src/tests/logline_tests.rs

//! tests for `logline.rs`, the line classifier

use crate::data::logline::{classify, is_run_header, Level, LineClass};
use crate::tests::common::{dt_log, logline, RUN_HEADER_1};

use ::test_case::test_case;

#[test]
fn test_classify_log_line() {
    let ll = logline("04/12 10:00:00.123: [amf] INFO: registration complete (amf-sm.c:512)");
    assert_eq!(ll.timestamp, dt_log(4, 12, 10, 0, 0, 123));
    assert_eq!(ll.domain, "amf");
    assert_eq!(ll.level, Level::Info);
    assert_eq!(ll.message, "registration complete");
    assert_eq!(ll.location, "amf-sm.c:512");
}

#[test]
fn test_classify_message_with_brackets() {
    // message body may itself contain brackets and parentheses
    let ll = logline("04/12 10:00:00.123: [amf] INFO: [state]{ue1,,attach,ok} (amf.c:42)");
    assert_eq!(ll.domain, "amf");
    assert_eq!(ll.message, "[state]{ue1,,attach,ok}");
    assert_eq!(ll.location, "amf.c:42");
}

#[test_case("FATAL", Level::Fatal)]
#[test_case("ERROR", Level::Error)]
#[test_case("WARNING", Level::Warning)]
#[test_case("INFO", Level::Info)]
#[test_case("DEBUG", Level::Debug)]
#[test_case("TRACE", Level::Trace)]
#[test_case("NOTICE", Level::Unknown; "unknown word still classifies")]
fn test_classify_level(
    word: &str,
    level: Level,
) {
    let line = format!("04/12 10:00:00.123: [smf] {}: something happened (smf.c:7)", word);
    assert_eq!(logline(line.as_str()).level, level);
}

#[test]
fn test_classify_run_header() {
    assert_eq!(classify(RUN_HEADER_1), LineClass::RunHeader);
    assert!(is_run_header("Open5GS daemon v2.7.0-12-gdeadbee"));
    assert!(!is_run_header("  Open5GS daemon v2.7.0"));
}

#[test_case(""; "empty")]
#[test_case("free text without structure"; "free text")]
#[test_case("04/12 10:00:00.123: [amf] INFO: no trailing location"; "missing location")]
#[test_case("04/12 10:00:00.123: amf INFO: message (f.c:1)"; "missing domain brackets")]
#[test_case("04/12 10:00:00.123: [amf] info: message (f.c:1)"; "lowercase severity")]
#[test_case("13/45 10:00:00.123: [amf] INFO: message (f.c:1)"; "shape ok but impossible date")]
#[test_case("PID[1234]: some daemon chatter"; "unrelated chatter")]
fn test_classify_no_match(line: &str) {
    assert_eq!(classify(line), LineClass::NoMatch);
}
