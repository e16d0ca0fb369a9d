// src/lib.rs

//! _irrlib_, the library behind the _irr_ and _irrstack_ programs.
//!
//! Extracts instrumentation events embedded in Open5GS-style log files,
//! reconstructs per-entity state-change timelines and time-duration
//! series for one run of the monitored system, and replays them as an
//! ordered call-stack.
//!
//! Data flows one way: raw log file → [`runlocator`] → [`runreader`] →
//! [`instrument`] tag parsing → [`runprocessor`] aggregation →
//! serialized [`RunSnapshot`] → [`callstack`] reconstruction.
//!
//! [`runlocator`]: crate::readers::runlocator
//! [`runreader`]: crate::readers::runreader
//! [`instrument`]: crate::data::instrument
//! [`runprocessor`]: crate::readers::runprocessor
//! [`RunSnapshot`]: crate::data::snapshot::RunSnapshot
//! [`callstack`]: crate::printer::callstack

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
