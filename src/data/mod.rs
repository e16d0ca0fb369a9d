// src/data/mod.rs

//! The _data_ modules. Data representations of log timestamps, classified
//! log lines, instrumentation tags, and the aggregated run snapshot.

pub mod datetime;
pub mod instrument;
pub mod logline;
pub mod snapshot;
