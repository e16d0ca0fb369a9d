// src/data/instrument.rs

//! Implements the instrumentation tag parser.
//!
//! Instrumented code embeds a mini-protocol in otherwise free-text log
//! messages. Three tag grammars exist:
//!
//! ```text
//! [state]{obj_id,child_id,event,message}       state transition, version 0
//! [state]{obj_id,child_id,event,message,fn}{1} state transition, version 1
//! [time]{sample_name,duration}                 duration sample, seconds
//! [timemarker]{function,start|stop}            paired execution marker
//! ```
//!
//! Tags are searched for anywhere within a message (surrounding prose is
//! allowed) in the fixed priority state → time → timemarker; the first
//! grammar that matches wins and at most one tag is recognized per line.
//!
//! Version handling happens here, at the decode boundary. One trailing
//! `{N}` marker selects the protocol version; no marker means version 0.
//! An unknown or non-integer version is reported and the line skipped.
//! A field count not matching the resolved version is treated as a
//! corrupt individual line and skipped without a diagnostic.

use crate::common::FunctionName;
use crate::e_wrn;

use ::lazy_static::lazy_static;
use ::regex::Regex;
use ::serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

lazy_static! {
    // each grammar: literal keyword, brace-delimited comma-separated
    // field list (at least one comma), optional brace-delimited version
    static ref STATE_TAG_REGEX: Regex =
        Regex::new(r"\[state\]\{(?P<csv>(.*?,)+.*?)\}(\{(?P<version>.*?)\})?").unwrap();
    static ref TIME_TAG_REGEX: Regex =
        Regex::new(r"\[time\]\{(?P<csv>(.*?,)+.*?)\}(\{(?P<version>.*?)\})?").unwrap();
    static ref TIMEMARKER_TAG_REGEX: Regex =
        Regex::new(r"\[timemarker\]\{(?P<csv>(.*?,)+.*?)\}(\{(?P<version>.*?)\})?").unwrap();
}

/// A state-transition tag, one variant per protocol version.
///
/// Version 0 carries exactly 4 fields; version 1 appends the emitting
/// function name. An empty `child_id` targets the root object.
#[derive(Clone, Debug, PartialEq)]
pub enum StateTag {
    V0 {
        obj_id: String,
        child_id: String,
        event_name: String,
        message: String,
    },
    V1 {
        obj_id: String,
        child_id: String,
        event_name: String,
        message: String,
        function: FunctionName,
    },
}

impl StateTag {
    pub fn obj_id(&self) -> &str {
        match self {
            StateTag::V0 { obj_id, .. } | StateTag::V1 { obj_id, .. } => obj_id,
        }
    }

    pub fn child_id(&self) -> &str {
        match self {
            StateTag::V0 { child_id, .. } | StateTag::V1 { child_id, .. } => child_id,
        }
    }

    pub fn event_name(&self) -> &str {
        match self {
            StateTag::V0 { event_name, .. } | StateTag::V1 { event_name, .. } => event_name,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            StateTag::V0 { message, .. } | StateTag::V1 { message, .. } => message,
        }
    }

    /// The emitting function name; only version ≥ 1 records it.
    pub fn function(&self) -> Option<&str> {
        match self {
            StateTag::V0 { .. } => None,
            StateTag::V1 { function, .. } => Some(function),
        }
    }
}

/// A duration sample tag.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeTag {
    pub sample_name: String,
    /// Seconds.
    pub duration: f64,
}

/// `start` or `stop` of a [`MarkerTag`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum MarkerKind {
    #[serde(rename = "start")]
    Start,
    #[serde(rename = "stop")]
    Stop,
}

/// A paired start/stop marker tag bracketing an instrumented
/// function's execution.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerTag {
    pub function: FunctionName,
    pub kind: MarkerKind,
}

/// Any recognized instrumentation tag.
#[derive(Clone, Debug, PartialEq)]
pub enum InstrumentTag {
    State(StateTag),
    Time(TimeTag),
    Marker(MarkerTag),
}

/// Search a message body for an instrumentation tag.
///
/// Returns `None` when no grammar matches, when the matched tag carries
/// an unsupported version (reported), or when the field count is wrong
/// for the resolved version (silent; corrupt individual line).
pub fn parse_instrument_tag(message: &str) -> Option<InstrumentTag> {
    if let Some(captures) = STATE_TAG_REGEX.captures(message) {
        return parse_state_tag(
            &captures["csv"],
            captures.name("version").map(|m| m.as_str()),
        )
        .map(InstrumentTag::State);
    }
    if let Some(captures) = TIME_TAG_REGEX.captures(message) {
        return parse_time_tag(
            &captures["csv"],
            captures.name("version").map(|m| m.as_str()),
        )
        .map(InstrumentTag::Time);
    }
    if let Some(captures) = TIMEMARKER_TAG_REGEX.captures(message) {
        return parse_timemarker_tag(
            &captures["csv"],
            captures.name("version").map(|m| m.as_str()),
        )
        .map(InstrumentTag::Marker);
    }

    None
}

fn parse_state_tag(
    csv: &str,
    version: Option<&str>,
) -> Option<StateTag> {
    let fields: Vec<&str> = csv.split(',').collect();
    match version {
        None => {
            if fields.len() != 4 {
                return None;
            }
            Some(StateTag::V0 {
                obj_id: fields[0].to_string(),
                child_id: fields[1].to_string(),
                event_name: fields[2].to_string(),
                message: fields[3].to_string(),
            })
        }
        Some(version) => match version.parse::<u32>() {
            Ok(1) => {
                if fields.len() != 5 {
                    return None;
                }
                Some(StateTag::V1 {
                    obj_id: fields[0].to_string(),
                    child_id: fields[1].to_string(),
                    event_name: fields[2].to_string(),
                    message: fields[3].to_string(),
                    function: fields[4].to_string(),
                })
            }
            Ok(_) | Err(_) => {
                e_wrn!("Unsupported version {:?} for state data!", version);
                None
            }
        },
    }
}

fn parse_time_tag(
    csv: &str,
    version: Option<&str>,
) -> Option<TimeTag> {
    if let Some(version) = version {
        e_wrn!("Unsupported version {:?} for time data!", version);
        return None;
    }
    let fields: Vec<&str> = csv.split(',').collect();
    if fields.len() != 2 {
        return None;
    }
    let duration: f64 = fields[1].parse().ok()?;

    Some(TimeTag {
        sample_name: fields[0].to_string(),
        duration,
    })
}

fn parse_timemarker_tag(
    csv: &str,
    version: Option<&str>,
) -> Option<MarkerTag> {
    if let Some(version) = version {
        e_wrn!("Unsupported version {:?} for timemarker data!", version);
        return None;
    }
    let fields: Vec<&str> = csv.split(',').collect();
    if fields.len() != 2 {
        return None;
    }
    let kind: MarkerKind = match fields[1] {
        "start" => MarkerKind::Start,
        "stop" => MarkerKind::Stop,
        _ => return None,
    };

    Some(MarkerTag {
        function: fields[0].to_string(),
        kind,
    })
}
