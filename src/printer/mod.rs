// src/printer/mod.rs

//! The _printer_ modules. Render an aggregated [`RunSnapshot`] back into
//! human-readable form.
//!
//! [`RunSnapshot`]: crate::data::snapshot::RunSnapshot

pub mod callstack;
