// src/readers/mod.rs

//! The _reader_ modules. Everything that scans log files: locating a run,
//! streaming its lines, and folding them into a [`RunSnapshot`].
//!
//! [`RunSnapshot`]: crate::data::snapshot::RunSnapshot

pub mod helpers;
pub mod runlocator;
pub mod runprocessor;
pub mod runreader;
