// src/debug/mod.rs

//! Diagnostic print macros used throughout the crate.

pub mod printers;
