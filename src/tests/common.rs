// src/tests/common.rs

//! Common test helpers and fixture data.

use crate::common::FPath;
use crate::data::datetime::DateTimeI;
use crate::data::logline::{classify, LineClass, LogLine};

use std::io::Write;

use ::chrono::{Datelike, Local, NaiveDate};
use ::tempfile::NamedTempFile;

/// A `DateTimeI` in the wall-clock year, matching what
/// [`datetime_parse_log`] resolves year-less log timestamps to.
///
/// [`datetime_parse_log`]: crate::data::datetime::datetime_parse_log
pub fn dt_log(
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    milli: u32,
) -> DateTimeI {
    NaiveDate::from_ymd_opt(Local::now().year(), month, day)
        .unwrap()
        .and_hms_milli_opt(hour, minute, second, milli)
        .unwrap()
}

/// Classify `line`, expecting the general log-line shape.
pub fn logline(line: &str) -> LogLine {
    match classify(line) {
        LineClass::Log(logline) => logline,
        class => panic!("expected LineClass::Log for {:?}, got {:?}", line, class),
    }
}

/// Write `content` to a named temporary file. The file is removed when
/// the returned handle drops; keep it alive for the test duration.
pub fn create_log_file(content: &str) -> (NamedTempFile, FPath) {
    let mut file: NamedTempFile = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    let path: FPath = file.path().to_string_lossy().to_string();

    (file, path)
}

pub const RUN_HEADER_1: &str = "Open5GS daemon v2.6.4";
pub const RUN_HEADER_2: &str = "Open5GS daemon v2.6.4-3-g12ab34c";

/// Two runs in one file, an hour apart, with interleaved
/// non-instrumentation noise.
pub const LOG_CONTENT_TWO_RUNS: &str = "\
Open5GS daemon v2.6.4

04/12 09:00:00.100: [app] INFO: Configuration: '/etc/open5gs/amf.yaml' (app.c:93)
04/12 09:00:00.150: [amf] INFO: [state]{ue1,,init,first run} (amf-sm.c:40)
not a log line
04/12 09:00:00.200: [amf] INFO: [time]{setup,0.250} (amf-sm.c:55)
Open5GS daemon v2.6.4-3-g12ab34c

04/12 10:00:00.123: [app] INFO: Configuration: '/etc/open5gs/amf.yaml' (app.c:93)
04/12 10:00:00.150: [amf] INFO: [state]{ue1,,attach,ok,fnAttach}{1} (amf-sm.c:42)
04/12 10:00:00.200: [amf] INFO: [timemarker]{fnAttach,start} (amf-sm.c:50)
04/12 10:00:00.300: [amf] INFO: [timemarker]{fnAttach,stop} (amf-sm.c:60)
";
